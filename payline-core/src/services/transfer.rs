//! Transfer flow controller
//!
//! Two steps: pick a candidate (opens the draft), then confirm an amount.
//! The dialog closes after every send attempt, successful or not; the
//! outcome tells the caller which it was.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::{Candidate, LogEvent, Route, TransferDraft, TransferReceipt, TransferRequest};
use crate::ports::DiagnosticSink;

#[derive(Debug, Clone, PartialEq)]
pub enum TransferState {
    Closed,
    Drafting(TransferDraft),
}

/// How a send attempt ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum TransferOutcome {
    /// Service accepted the transfer; `balance` is the sender's new balance
    Completed { balance: Option<Decimal> },
    /// Service answered with its failure flag set
    Rejected,
    /// Request never got a usable answer
    Failed { error: String },
}

impl TransferOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TransferOutcome::Completed { .. })
    }
}

pub struct TransferController {
    state: TransferState,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl TransferController {
    pub fn new(diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            state: TransferState::Closed,
            diagnostics,
        }
    }

    pub fn state(&self) -> &TransferState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, TransferState::Drafting(_))
    }

    pub fn draft(&self) -> Option<&TransferDraft> {
        match &self.state {
            TransferState::Drafting(draft) => Some(draft),
            TransferState::Closed => None,
        }
    }

    /// Open the dialog for a recipient with an empty amount
    ///
    /// Opening while a draft is already up replaces it.
    pub fn open(&mut self, recipient: Candidate) {
        self.state = TransferState::Drafting(TransferDraft::new(recipient));
    }

    /// Edit the amount text; returns false when no dialog is open
    pub fn set_amount(&mut self, text: impl Into<String>) -> bool {
        match &mut self.state {
            TransferState::Drafting(draft) => {
                draft.amount = text.into();
                true
            }
            TransferState::Closed => false,
        }
    }

    pub fn cancel(&mut self) {
        self.state = TransferState::Closed;
    }

    /// Build the request for the current draft
    ///
    /// `None` when closed or when the amount is not a number; the dialog
    /// stays open in the latter case.
    pub fn prepare_send(&self) -> Option<TransferRequest> {
        let draft = self.draft()?;
        let amount = draft.parsed_amount()?;
        Some(TransferRequest {
            receiver_id: draft.recipient.id.clone(),
            amount,
        })
    }

    /// Close the dialog and classify the response
    pub fn finish(&mut self, response: Result<TransferReceipt>) -> TransferOutcome {
        self.state = TransferState::Closed;

        match response {
            Ok(receipt) if receipt.status => TransferOutcome::Completed {
                balance: receipt.balance,
            },
            Ok(_) => {
                self.diagnostics.record(
                    LogEvent::new("transfer_rejected")
                        .with_page(Route::Dashboard.page_name())
                        .with_error("transfer response reported failure"),
                );
                TransferOutcome::Rejected
            }
            Err(e) => {
                let error = e.to_string();
                self.diagnostics.record(
                    LogEvent::new("transfer_failed")
                        .with_page(Route::Dashboard.page_name())
                        .with_error(error.clone()),
                );
                TransferOutcome::Failed { error }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::diagnostics::MemorySink;
    use crate::domain::result::Error;

    fn grace() -> Candidate {
        Candidate::new("u2", "Grace", "Hopper", "grace@example.com")
    }

    #[test]
    fn test_open_starts_with_empty_amount() {
        let mut transfer = TransferController::new(Arc::new(MemorySink::new()));
        assert!(!transfer.is_open());

        transfer.open(grace());
        let draft = transfer.draft().unwrap();
        assert_eq!(draft.recipient.display_name(), "Grace Hopper");
        assert!(draft.amount.is_empty());
    }

    #[test]
    fn test_reopen_resets_amount() {
        let mut transfer = TransferController::new(Arc::new(MemorySink::new()));
        transfer.open(grace());
        transfer.set_amount("10");
        transfer.open(grace());
        assert!(transfer.draft().unwrap().amount.is_empty());
    }

    #[test]
    fn test_set_amount_requires_open_dialog() {
        let mut transfer = TransferController::new(Arc::new(MemorySink::new()));
        assert!(!transfer.set_amount("10"));
        transfer.open(grace());
        assert!(transfer.set_amount("10"));
    }

    #[test]
    fn test_non_numeric_amount_keeps_dialog_open() {
        let mut transfer = TransferController::new(Arc::new(MemorySink::new()));
        transfer.open(grace());
        transfer.set_amount("ten dollars");

        assert!(transfer.prepare_send().is_none());
        assert!(transfer.is_open());

        transfer.set_amount("");
        assert!(transfer.prepare_send().is_none());
        assert!(transfer.is_open());
    }

    #[test]
    fn test_prepare_send_builds_request() {
        let mut transfer = TransferController::new(Arc::new(MemorySink::new()));
        transfer.open(grace());
        transfer.set_amount(" 12.5 ");

        let request = transfer.prepare_send().unwrap();
        assert_eq!(request.receiver_id, "u2");
        assert_eq!(request.amount, Decimal::new(125, 1));
    }

    #[test]
    fn test_no_client_side_bounds() {
        let mut transfer = TransferController::new(Arc::new(MemorySink::new()));
        transfer.open(grace());
        transfer.set_amount("-5");
        assert_eq!(transfer.prepare_send().unwrap().amount, Decimal::new(-5, 0));
        transfer.set_amount("1000000000");
        assert!(transfer.prepare_send().is_some());
    }

    #[test]
    fn test_cancel_closes_without_side_effects() {
        let sink = Arc::new(MemorySink::new());
        let mut transfer = TransferController::new(sink.clone());
        transfer.open(grace());
        transfer.cancel();

        assert_eq!(transfer.state(), &TransferState::Closed);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_finish_success() {
        let sink = Arc::new(MemorySink::new());
        let mut transfer = TransferController::new(sink.clone());
        transfer.open(grace());

        let outcome = transfer.finish(Ok(TransferReceipt {
            status: true,
            balance: Some(Decimal::new(900, 0)),
        }));

        assert_eq!(
            outcome,
            TransferOutcome::Completed {
                balance: Some(Decimal::new(900, 0))
            }
        );
        assert!(!transfer.is_open());
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_finish_rejected_still_closes() {
        let sink = Arc::new(MemorySink::new());
        let mut transfer = TransferController::new(sink.clone());
        transfer.open(grace());

        let outcome = transfer.finish(Ok(TransferReceipt {
            status: false,
            balance: None,
        }));

        assert_eq!(outcome, TransferOutcome::Rejected);
        assert!(!transfer.is_open());
        assert_eq!(sink.event_names(), vec!["transfer_rejected"]);
    }

    #[test]
    fn test_finish_transport_error_still_closes() {
        let sink = Arc::new(MemorySink::new());
        let mut transfer = TransferController::new(sink.clone());
        transfer.open(grace());

        let outcome = transfer.finish(Err(Error::http("Request timed out")));

        assert!(matches!(outcome, TransferOutcome::Failed { .. }));
        assert!(!transfer.is_open());
        let errors = sink.errors();
        assert_eq!(errors[0].event, "transfer_failed");
        assert_eq!(errors[0].page.as_deref(), Some("dashboard"));
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(TransferOutcome::Rejected).unwrap();
        assert_eq!(json, serde_json::json!({"outcome": "rejected"}));
    }
}
