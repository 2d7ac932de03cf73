//! Dashboard - the session-and-transaction view
//!
//! Composes the account, search and transfer controllers over one session.
//! Search and transfer operate independently; a transfer can only be opened
//! for a candidate the current search produced, and only while signed in.

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{Candidate, Navigation};
use crate::ports::{DiagnosticSink, PaymentsApi, SessionStore};

use super::account::{AccountController, AccountView};
use super::search::{run_search, SearchController, SearchResponse, SearchTicket};
use super::transfer::{TransferController, TransferOutcome};

pub struct Dashboard {
    api: Arc<dyn PaymentsApi>,
    session: Arc<dyn SessionStore>,
    account: AccountController,
    search: SearchController,
    transfer: TransferController,
}

impl Dashboard {
    pub fn new(
        api: Arc<dyn PaymentsApi>,
        session: Arc<dyn SessionStore>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            account: AccountController::new(
                Arc::clone(&api),
                Arc::clone(&session),
                Arc::clone(&diagnostics),
            ),
            search: SearchController::new(Arc::clone(&diagnostics)),
            transfer: TransferController::new(diagnostics),
            api,
            session,
        }
    }

    pub fn account(&self) -> &AccountController {
        &self.account
    }

    pub fn search_view(&self) -> &SearchController {
        &self.search
    }

    pub fn transfer(&self) -> &TransferController {
        &self.transfer
    }

    /// Payments service handle, for issuing search tickets concurrently
    pub fn api(&self) -> Arc<dyn PaymentsApi> {
        Arc::clone(&self.api)
    }

    pub async fn activate(&mut self) -> &AccountView {
        self.account.activate().await
    }

    /// Change the query; returns the request to run, if any
    pub fn begin_search(&mut self, query: impl Into<String>) -> Option<SearchTicket> {
        self.search.set_query(query)
    }

    /// Hand back a finished search; false when it was superseded
    pub fn complete_search(&mut self, response: SearchResponse) -> bool {
        self.search.complete(response)
    }

    /// Change the query and wait for its results
    pub async fn search(&mut self, query: impl Into<String>) -> &[Candidate] {
        if let Some(ticket) = self.search.set_query(query) {
            let response = run_search(self.api.as_ref(), ticket).await;
            self.search.complete(response);
        }
        self.search.results()
    }

    /// Open the transfer dialog for a candidate from the current results
    pub fn pay(&mut self, candidate_id: &str) -> Result<&Candidate> {
        if !self.session.has_token() {
            return Err(Error::NotAuthenticated);
        }

        let candidate = self
            .search
            .select(candidate_id)
            .ok_or_else(|| Error::not_found(format!("No search result with id {}", candidate_id)))?;
        self.transfer.open(candidate);

        self.transfer
            .draft()
            .map(|draft| &draft.recipient)
            .ok_or_else(|| Error::Other("Transfer dialog did not open".to_string()))
    }

    /// Edit the amount in the open dialog
    pub fn set_amount(&mut self, text: impl Into<String>) -> bool {
        self.transfer.set_amount(text)
    }

    pub fn cancel_transfer(&mut self) {
        self.transfer.cancel();
    }

    /// Send the drafted transfer
    ///
    /// `Ok(None)` when there is nothing to send: no dialog, or an amount that
    /// is not a number (the dialog stays open). On completion the balance is
    /// replaced with the server's value and the search view is reset.
    pub async fn send_transfer(&mut self) -> Result<Option<TransferOutcome>> {
        let Some(request) = self.transfer.prepare_send() else {
            return Ok(None);
        };
        let token = self.account.current_token().ok_or(Error::NotAuthenticated)?;

        let response = self.api.transfer(&token, &request).await;
        let outcome = self.transfer.finish(response);

        if let TransferOutcome::Completed { balance } = &outcome {
            if let Some(balance) = balance {
                self.account.apply_balance(*balance);
            }
            self.search.clear();
        }

        Ok(Some(outcome))
    }

    /// Sign out; the front end reloads and the guard runs again
    pub fn logout(&mut self) -> Result<Navigation> {
        self.transfer.cancel();
        self.search.clear();
        self.account.logout()
    }
}
