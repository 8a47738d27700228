//! Transfer Error Types
//!
//! The closed failure taxonomy of the transfer engine. The gateway
//! pattern-matches on these variants to choose a response; the engine
//! never retries or swallows any of them.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::core_types::AccountId;

/// Transfer error types
///
/// Error codes are stable strings for API responses.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    /// Malformed or semantically invalid caller input. Recoverable by the
    /// caller correcting the request.
    #[error("{0}")]
    InvalidRequest(&'static str),

    /// The referenced account identifier does not exist in the ledger store.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// The source account lacked sufficient balance at the moment of the
    /// locked check. Carries the observed balance for diagnostics.
    #[error(
        "Insufficient funds in account {account}. Current balance: {balance}, Required: {amount}"
    )]
    InsufficientFunds {
        account: AccountId,
        balance: Decimal,
        amount: Decimal,
    },

    /// Any other internal failure (lock wait expired, arithmetic overflow).
    /// Surfaced generically to callers; details go to the log.
    #[error("Internal error: {0}")]
    Unexpected(String),
}

impl TransferError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::InvalidRequest(_) => "INVALID_REQUEST",
            TransferError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            TransferError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            TransferError::Unexpected(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::InvalidRequest(_) | TransferError::InsufficientFunds { .. } => 400,
            TransferError::AccountNotFound(_) => 404,
            TransferError::Unexpected(_) => 500,
        }
    }
}
