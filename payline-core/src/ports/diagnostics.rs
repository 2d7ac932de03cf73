//! Diagnostic channel port
//!
//! Transport failures and rejected requests are reported here rather than
//! to the user. Recording must never fail the operation being reported on.

use crate::domain::LogEvent;

pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: LogEvent);
}
