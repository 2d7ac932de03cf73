//! Account session controller
//!
//! Exchanges the stored token for the user's profile and balance when the
//! dashboard activates, and owns logout.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::{AccountSnapshot, LogEvent, Navigation, Route, SessionToken, UserProfile};
use crate::ports::{DiagnosticSink, PaymentsApi, SessionStore};

use super::guard::SIGNED_OUT_LANDING;

/// What the account area of the dashboard shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum AccountView {
    /// Not activated yet
    Inactive,
    /// No session: leave for this route
    Redirect { route: Route },
    /// Request pending, or failed; the placeholder stays up
    Loading,
    Loaded { snapshot: AccountSnapshot },
}

pub struct AccountController {
    api: Arc<dyn PaymentsApi>,
    session: Arc<dyn SessionStore>,
    diagnostics: Arc<dyn DiagnosticSink>,
    view: AccountView,
}

impl AccountController {
    pub fn new(
        api: Arc<dyn PaymentsApi>,
        session: Arc<dyn SessionStore>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            api,
            session,
            diagnostics,
            view: AccountView::Inactive,
        }
    }

    /// Load profile and balance for the stored token
    ///
    /// Without a token the view becomes a redirect to signup and nothing is
    /// requested. A failed load is recorded and leaves the view `Loading`;
    /// there is no retry.
    pub async fn activate(&mut self) -> &AccountView {
        let Some(token) = self.current_token() else {
            self.view = AccountView::Redirect {
                route: SIGNED_OUT_LANDING,
            };
            return &self.view;
        };

        self.view = AccountView::Loading;

        match self.api.fetch_account(&token).await {
            Ok(snapshot) => self.view = AccountView::Loaded { snapshot },
            Err(e) => self.diagnostics.record(
                LogEvent::new("account_load_failed")
                    .with_page(Route::Dashboard.page_name())
                    .with_error(e.to_string()),
            ),
        }

        &self.view
    }

    pub fn view(&self) -> &AccountView {
        &self.view
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match &self.view {
            AccountView::Loaded { snapshot } => Some(&snapshot.profile),
            _ => None,
        }
    }

    pub fn balance(&self) -> Option<Decimal> {
        match &self.view {
            AccountView::Loaded { snapshot } => Some(snapshot.balance),
            _ => None,
        }
    }

    /// Replace the displayed balance with a server-reported value
    ///
    /// Only a loaded view has a balance to replace; otherwise this is a no-op.
    pub fn apply_balance(&mut self, balance: Decimal) {
        if let AccountView::Loaded { snapshot } = &mut self.view {
            snapshot.balance = balance;
        }
    }

    /// Token as stored right now; unreadable stores count as signed out
    pub fn current_token(&self) -> Option<SessionToken> {
        self.session.get().ok().flatten()
    }

    /// Forget the session and ask the front end to reload
    pub fn logout(&mut self) -> Result<Navigation> {
        self.session.clear()?;
        self.view = AccountView::Inactive;
        Ok(Navigation::Reload)
    }
}
