//! Output formatting utilities

use std::time::Duration;

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use payline_core::domain::FieldErrors;
use payline_core::Candidate;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Spinner shown while a request is pending; call `finish_and_clear` when done
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Print per-field validation messages under the form
pub fn field_errors(errors: &FieldErrors) {
    for (field, msg) in errors.iter() {
        eprintln!("  {} {}", format!("{}:", field.name()).red().bold(), msg);
    }
}

/// Table of search candidates
pub fn candidates_table(candidates: &[Candidate]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["", "Name", "Email", "ID"]);
    for candidate in candidates {
        let initial = candidate
            .firstname
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default();
        table.add_row(vec![
            initial,
            candidate.display_name(),
            candidate.email.clone(),
            candidate.id.clone(),
        ]);
    }
    table
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
