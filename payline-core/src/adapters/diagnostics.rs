//! Simple diagnostic sinks
//!
//! `LoggingService` is the persistent sink; these cover the cases where
//! nothing should be written to disk.

use std::sync::Mutex;

use crate::domain::LogEvent;
use crate::ports::DiagnosticSink;

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _event: LogEvent) {}
}

/// Keeps events in memory so callers can inspect them
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events recorded so far, oldest first
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Recorded events that carry an error message
    pub fn errors(&self) -> Vec<LogEvent> {
        self.events().into_iter().filter(|e| e.is_error()).collect()
    }

    /// Names of recorded events, oldest first
    pub fn event_names(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.event).collect()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, event: LogEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.record(LogEvent::new("first"));
        sink.record(LogEvent::new("second").with_error("boom"));

        assert_eq!(sink.event_names(), vec!["first", "second"]);
        assert_eq!(sink.errors().len(), 1);
        assert_eq!(sink.errors()[0].error_message.as_deref(), Some("boom"));
    }
}
