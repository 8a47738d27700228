//! Gateway response DTOs and the unified error body

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::core_types::{AccountId, TransferId};
use crate::journal::TransferRecord;

/// Completed transfer, as returned to the caller
#[derive(Debug, Serialize, ToSchema)]
pub struct TransferResponseData {
    pub transfer_id: TransferId,
    pub from_account: AccountId,
    pub to_account: AccountId,
    pub amount: Decimal,
    /// Commit time in unix millis
    pub timestamp: i64,
}

impl From<TransferRecord> for TransferResponseData {
    fn from(record: TransferRecord) -> Self {
        Self {
            transfer_id: record.id,
            from_account: record.from_account,
            to_account: record.to_account,
            amount: record.amount,
            timestamp: record.timestamp.timestamp_millis(),
        }
    }
}

/// Balance query response
#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponseData {
    pub account_id: AccountId,
    pub balance: Decimal,
}

/// Liveness probe response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    pub timestamp: i64,
}

/// Unified error body: `{ "error": { "code": ..., "message": ... } }`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    #[schema(example = "INSUFFICIENT_FUNDS")]
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }
}

/// Mock account creation request (dev/test builds only)
#[cfg(feature = "mock-api")]
#[derive(Debug, serde::Deserialize, ToSchema)]
pub struct MockAccountRequest {
    pub owner: String,
    pub balance: Decimal,
}
