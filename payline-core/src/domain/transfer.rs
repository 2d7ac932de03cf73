//! Transfer draft and request

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use super::Candidate;

/// In-progress, unconfirmed transfer: lives only while the dialog is open
#[derive(Debug, Clone, PartialEq)]
pub struct TransferDraft {
    pub recipient: Candidate,
    /// Free text as typed; parsed only on send
    pub amount: String,
}

impl TransferDraft {
    pub fn new(recipient: Candidate) -> Self {
        Self {
            recipient,
            amount: String::new(),
        }
    }

    /// Parsed amount, if the text is a number
    pub fn parsed_amount(&self) -> Option<Decimal> {
        parse_amount(&self.amount)
    }
}

/// Body of the transfer call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub receiver_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Response of the transfer call
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReceipt {
    pub status: bool,
    pub balance: Option<Decimal>,
}

/// Parse amount text; accepts plain and scientific notation, ignores
/// surrounding whitespace. No bounds are enforced here.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("25"), Some(Decimal::new(25, 0)));
        assert_eq!(parse_amount(" 12.50 "), Some(Decimal::new(1250, 2)));
        assert_eq!(parse_amount("-3"), Some(Decimal::new(-3, 0)));
        assert_eq!(parse_amount("1e2"), Some(Decimal::new(100, 0)));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("ten"), None);
        assert_eq!(parse_amount("12abc"), None);
    }

    #[test]
    fn test_new_draft_has_empty_amount() {
        let draft = TransferDraft::new(Candidate::new("u1", "A", "B", "a@b.co"));
        assert!(draft.amount.is_empty());
        assert!(draft.parsed_amount().is_none());
    }

    #[test]
    fn test_request_wire_shape() {
        let request = TransferRequest {
            receiver_id: "u9".to_string(),
            amount: Decimal::new(1050, 2),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"receiverId": "u9", "amount": 10.5}));
    }
}
