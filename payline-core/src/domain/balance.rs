//! Account balance snapshot

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::UserProfile;

/// Profile and balance as last reported by the payments service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSnapshot {
    pub profile: UserProfile,
    pub balance: Decimal,
}

/// Format a balance for display with exactly two decimal places
pub fn format_balance(balance: Decimal) -> String {
    let rounded = balance.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", rounded)
}
