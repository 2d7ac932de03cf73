//! Logging service - diagnostic event log in DuckDB
//!
//! Transport failures, rejected requests and command runs are stored in
//! `logs.duckdb` in the payline directory. No user data (balances,
//! amounts, names, emails, tokens) is ever logged.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use duckdb::Connection;
use serde::{Deserialize, Serialize};

use crate::domain::LogEvent;
use crate::log_migrations::LOG_MIGRATIONS;
use crate::ports::DiagnosticSink;

const LOG_DB_FILENAME: &str = "logs.duckdb";

/// Counter for generating unique IDs within the same millisecond
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Get current unix timestamp in milliseconds
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Generate a unique ID based on timestamp + counter
fn generate_id() -> u64 {
    // Lower 16 bits: counter (65536 IDs per millisecond)
    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    ((now_ms() as u64) << 16) | counter
}

fn detect_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "linux") {
        "linux"
    } else {
        "unknown"
    }
}

/// Entry point for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPoint {
    Cli,
    Shell,
}

impl EntryPoint {
    fn as_str(&self) -> &'static str {
        match self {
            EntryPoint::Cli => "cli",
            EntryPoint::Shell => "shell",
        }
    }
}

/// A log entry as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: i64,
    pub entry_point: String,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    pub page: Option<String>,
    pub command: Option<String>,
    pub error_message: Option<String>,
    pub error_details: Option<String>,
}

const SELECT_COLUMNS: &str = "SELECT id, timestamp, entry_point, app_version, platform, \
     event, page, command, error_message, error_details FROM sys_logs";

fn row_to_entry(row: &duckdb::Row<'_>) -> duckdb::Result<LogEntry> {
    Ok(LogEntry {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        entry_point: row.get(2)?,
        app_version: row.get(3)?,
        platform: row.get(4)?,
        event: row.get(5)?,
        page: row.get(6)?,
        command: row.get(7)?,
        error_message: row.get(8)?,
        error_details: row.get(9)?,
    })
}

/// Service for structured diagnostic logging
pub struct LoggingService {
    conn: Mutex<Connection>,
    db_path: PathBuf,
    entry_point: EntryPoint,
    app_version: String,
    platform: &'static str,
}

impl LoggingService {
    /// Open or create `logs.duckdb` in `payline_dir` and apply pending migrations
    pub fn new(
        payline_dir: &Path,
        entry_point: EntryPoint,
        app_version: impl Into<String>,
    ) -> Result<Self> {
        let db_path = payline_dir.join(LOG_DB_FILENAME);
        let conn = Connection::open(&db_path)?;

        let service = Self {
            conn: Mutex::new(conn),
            db_path,
            entry_point,
            app_version: app_version.into(),
            platform: detect_platform(),
        };

        service.run_migrations()?;

        Ok(service)
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;

        let table_exists: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM information_schema.tables WHERE table_name = 'sys_migrations'",
                [],
                |row| row.get(0),
            )
            .unwrap_or(false);

        if !table_exists {
            if let Some((name, sql)) = LOG_MIGRATIONS.iter().find(|(n, _)| *n == "000_migrations.sql")
            {
                conn.execute_batch(sql)?;
                conn.execute(
                    "INSERT INTO sys_migrations (migration_name) VALUES (?)",
                    [name],
                )?;
            }
        }

        let mut stmt = conn.prepare("SELECT migration_name FROM sys_migrations")?;
        let applied: Vec<String> = stmt
            .query_map([], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();

        for (name, sql) in LOG_MIGRATIONS.iter() {
            if *name == "000_migrations.sql" || applied.iter().any(|a| a == name) {
                continue;
            }
            conn.execute_batch(sql)?;
            conn.execute(
                "INSERT INTO sys_migrations (migration_name) VALUES (?)",
                [name],
            )?;
        }

        Ok(())
    }

    /// Log an event
    ///
    /// Entry point, app version and platform are stamped from the service.
    pub fn log(&self, event: LogEvent) -> Result<()> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;

        conn.execute(
            r#"
            INSERT INTO sys_logs (
                id, timestamp, entry_point, app_version, platform,
                event, page, command, error_message, error_details
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            duckdb::params![
                generate_id(),
                now_ms(),
                self.entry_point.as_str(),
                &self.app_version,
                self.platform,
                &event.event,
                &event.page,
                &event.command,
                &event.error_message,
                &event.error_details,
            ],
        )?;

        Ok(())
    }

    /// Log a CLI command execution
    pub fn log_command(&self, command: &str) -> Result<()> {
        self.log(LogEvent::new("command_executed").with_command(command))
    }

    /// Most recent entries, newest first
    pub fn get_recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY timestamp DESC, id DESC LIMIT ?",
            SELECT_COLUMNS
        ))?;
        let entries = stmt
            .query_map([limit as i64], row_to_entry)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(entries)
    }

    /// Most recent entries that carry an error, newest first
    pub fn get_errors(&self, limit: usize) -> Result<Vec<LogEntry>> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE error_message IS NOT NULL ORDER BY timestamp DESC, id DESC LIMIT ?",
            SELECT_COLUMNS
        ))?;
        let entries = stmt
            .query_map([limit as i64], row_to_entry)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(entries)
    }

    pub fn count(&self) -> Result<u64> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM sys_logs", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    pub fn error_count(&self) -> Result<u64> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sys_logs WHERE error_message IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Delete logs older than the given unix timestamp in milliseconds
    pub fn delete_before(&self, timestamp_ms: i64) -> Result<u64> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let deleted = conn.execute("DELETE FROM sys_logs WHERE timestamp < ?", [timestamp_ms])?;
        Ok(deleted as u64)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

impl DiagnosticSink for LoggingService {
    fn record(&self, event: LogEvent) {
        // The diagnostic channel must never fail the operation it reports on
        let _ = self.log(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_logging_service_creation() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();
        assert!(service.db_path().exists());
    }

    #[test]
    fn test_reopen_keeps_entries() {
        let dir = tempdir().unwrap();
        {
            let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();
            service.log(LogEvent::new("first_run")).unwrap();
        }
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_log_plain_event() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service.log(LogEvent::new("test_event")).unwrap();

        let entries = service.get_recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, "test_event");
        assert_eq!(entries[0].entry_point, "cli");
        assert_eq!(entries[0].app_version, "1.0.0");
    }

    #[test]
    fn test_log_with_context() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Shell, "2.0.0").unwrap();

        service
            .log(
                LogEvent::new("search_failed")
                    .with_page("dashboard")
                    .with_command("search"),
            )
            .unwrap();

        let entries = service.get_recent(10).unwrap();
        assert_eq!(entries[0].page.as_deref(), Some("dashboard"));
        assert_eq!(entries[0].command.as_deref(), Some("search"));
        assert_eq!(entries[0].entry_point, "shell");
    }

    #[test]
    fn test_log_error_and_counts() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service
            .log(LogEvent::new("page_opened").with_page("dashboard"))
            .unwrap();
        service
            .log(
                LogEvent::new("account_load_failed")
                    .with_error("Connection refused")
                    .with_error_details("GET /account/balance"),
            )
            .unwrap();

        let errors = service.get_errors(10).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].event, "account_load_failed");
        assert_eq!(errors[0].error_details.as_deref(), Some("GET /account/balance"));
        assert_eq!(service.count().unwrap(), 2);
        assert_eq!(service.error_count().unwrap(), 1);
    }

    #[test]
    fn test_delete_before() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service.log_command("search").unwrap();
        service.log_command("pay").unwrap();

        let deleted = service.delete_before(now_ms() + 1000).unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_record_as_sink() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        let sink: &dyn DiagnosticSink = &service;
        sink.record(LogEvent::new("transfer_rejected").with_error("status false"));

        assert_eq!(service.error_count().unwrap(), 1);
    }
}
