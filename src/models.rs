//! Domain models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core_types::AccountId;

/// A balance-holding account.
///
/// # Invariants:
/// - `id` and `owner` are immutable after creation
/// - `balance` is an exact decimal, never a float, and is non-negative
///   at all times observable outside a transfer's locked section
/// - the balance is mutated only by the transfer engine while the
///   account's lock is held
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub owner: String,
    pub balance: Decimal,
}
