//! CLI command implementations

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod logs;
pub mod open;
pub mod pay;
pub mod search;
pub mod shell;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use payline_core::adapters::diagnostics::NullSink;
use payline_core::ports::DiagnosticSink;
use payline_core::services::{EntryPoint, LoggingService};
use payline_core::PaylineContext;

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger(entry_point: EntryPoint) -> Option<LoggingService> {
    let payline_dir = get_payline_dir();
    // Ensure directory exists
    std::fs::create_dir_all(&payline_dir).ok()?;
    LoggingService::new(&payline_dir, entry_point, env!("CARGO_PKG_VERSION")).ok()
}

/// Get the payline directory from environment or default
pub fn get_payline_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PAYLINE_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".payline")
    }
}

/// Build the payline context for one command run
///
/// The command name is recorded in the diagnostic log.
pub fn get_context(command: &str, entry_point: EntryPoint) -> Result<PaylineContext> {
    let payline_dir = get_payline_dir();

    // Create directory if it doesn't exist
    std::fs::create_dir_all(&payline_dir)
        .with_context(|| format!("Failed to create payline directory: {:?}", payline_dir))?;

    let logger = get_logger(entry_point);
    if let Some(l) = &logger {
        // Logging should never break the app
        let _ = l.log_command(command);
    }

    let diagnostics: Arc<dyn DiagnosticSink> = match logger {
        Some(logger) => Arc::new(logger),
        None => Arc::new(NullSink),
    };

    PaylineContext::new(&payline_dir, diagnostics)
        .context("Failed to initialize payline context")
}
