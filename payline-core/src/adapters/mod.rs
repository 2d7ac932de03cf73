//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest HTTP client for the PaymentsApi port
//! - JSON file and in-memory stores for the SessionStore port
//! - Null and in-memory sinks for the DiagnosticSink port
//!   (the DuckDB-backed sink is `services::LoggingService`)

pub mod diagnostics;
pub mod http;
pub mod session_file;
pub mod session_memory;

#[cfg(test)]
pub mod mock_server;
