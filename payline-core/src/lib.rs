//! Payline Core - client logic for a peer-to-peer payments service
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core entities (forms, routes, candidates, transfers)
//! - **ports**: Trait definitions for external dependencies (PaymentsApi, SessionStore)
//! - **services**: Route guard, auth flows and the dashboard controllers
//! - **adapters**: Concrete implementations (reqwest client, session files)

pub mod domain;
pub mod ports;
pub mod services;
pub mod adapters;
pub mod config;
pub mod log_migrations;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::http::PaymentsHttpClient;
use adapters::session_file::FileSessionStore;
use config::Config;
use ports::{DiagnosticSink, PaymentsApi, SessionStore};
use services::*;

// Re-export commonly used types at crate root
pub use domain::{
    format_balance, AccountSnapshot, Candidate, LogEvent, Navigation, Route, SessionToken,
    SigninForm, SignupForm, TransferDraft, UserProfile,
};
pub use domain::result::{Error, OperationResult};

/// Main context for Payline operations
///
/// Holds configuration and the shared adapters, and hands out the
/// services and controllers built on top of them.
pub struct PaylineContext {
    pub config: Config,
    pub api: Arc<dyn PaymentsApi>,
    pub session: Arc<dyn SessionStore>,
    pub diagnostics: Arc<dyn DiagnosticSink>,
    pub guard: RouteGuard,
    pub auth_service: AuthService,
}

impl PaylineContext {
    /// Create a new context over the payline directory
    pub fn new(payline_dir: &Path, diagnostics: Arc<dyn DiagnosticSink>) -> Result<Self> {
        let config = Config::load(payline_dir)?;
        let api: Arc<dyn PaymentsApi> =
            Arc::new(PaymentsHttpClient::new(config.api_url(), config.timeout())?);
        let session: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(payline_dir));

        Ok(Self::with_parts(config, api, session, diagnostics))
    }

    /// Assemble a context from already-built adapters
    pub fn with_parts(
        config: Config,
        api: Arc<dyn PaymentsApi>,
        session: Arc<dyn SessionStore>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let guard = RouteGuard::new(Arc::clone(&session));
        let auth_service = AuthService::new(
            Arc::clone(&api),
            Arc::clone(&session),
            Arc::clone(&diagnostics),
        );

        Self {
            config,
            api,
            session,
            diagnostics,
            guard,
            auth_service,
        }
    }

    /// A fresh dashboard view over this context's session
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(
            Arc::clone(&self.api),
            Arc::clone(&self.session),
            Arc::clone(&self.diagnostics),
        )
    }
}
