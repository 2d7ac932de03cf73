//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. Controllers
//! depend only on these traits, not on concrete implementations.

mod diagnostics;
mod payments_api;
mod session_store;

pub use diagnostics::DiagnosticSink;
pub use payments_api::PaymentsApi;
pub use session_store::SessionStore;
