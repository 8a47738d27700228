//! HTTP handlers for the transfer and balance endpoints
//!
//! Handlers translate the engine's failure taxonomy into status codes:
//! `InvalidRequest`/`InsufficientFunds` are client errors (400),
//! `AccountNotFound` is 404, anything else is a generic 500 with details
//! kept in the server log.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::state::AppState;
use super::types::{BalanceResponseData, ErrorResponse, HealthResponse, TransferResponseData};
use crate::engine::TransferRequest;
use crate::error::TransferError;

type HandlerResult<T> = Result<(StatusCode, Json<T>), (StatusCode, Json<ErrorResponse>)>;

/// Execute a transfer between two accounts
///
/// POST /api/v1/transfer
#[utoipa::path(
    post,
    path = "/api/v1/transfer",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transfer completed", body = TransferResponseData),
        (status = 400, description = "Invalid request or insufficient funds", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    ),
    tag = "Transfer"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransferRequest>,
) -> HandlerResult<TransferResponseData> {
    match state.engine.transfer(req).await {
        Ok(record) => Ok((StatusCode::OK, Json(record.into()))),
        Err(err) => Err(reject(err)),
    }
}

/// Query an account's current balance
///
/// GET /api/v1/balance/{id}
#[utoipa::path(
    get,
    path = "/api/v1/balance/{id}",
    params(
        ("id" = u64, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Current balance", body = BalanceResponseData),
        (status = 404, description = "Account not found", body = ErrorResponse)
    ),
    tag = "Balance"
)]
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> HandlerResult<BalanceResponseData> {
    match state.engine.balance(id) {
        Ok(balance) => Ok((
            StatusCode::OK,
            Json(BalanceResponseData {
                account_id: id,
                balance,
            }),
        )),
        Err(err) => Err(reject(err)),
    }
}

/// Liveness probe
///
/// GET /api/v1/health
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "System"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: now_ms(),
    })
}

/// Create a seeded account (dev/test builds only)
///
/// POST /internal/mock/account
#[cfg(feature = "mock-api")]
pub async fn create_mock_account(
    State(state): State<Arc<AppState>>,
    Json(req): Json<super::types::MockAccountRequest>,
) -> HandlerResult<BalanceResponseData> {
    match state.store.create_account(req.owner, req.balance) {
        Ok(account) => Ok((
            StatusCode::CREATED,
            Json(BalanceResponseData {
                account_id: account.id,
                balance: account.balance,
            }),
        )),
        Err(err) => Err(reject(err)),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Map an engine failure onto the HTTP response contract.
fn reject(err: TransferError) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(err.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = match &err {
        TransferError::Unexpected(detail) => {
            // Generic message to the caller; full detail stays server-side.
            tracing::error!(error = %detail, "request failed unexpectedly");
            ErrorResponse::new(err.code(), "An unexpected error occurred")
        }
        TransferError::InsufficientFunds {
            account,
            balance,
            amount,
        } => ErrorResponse::with_details(
            err.code(),
            err.to_string(),
            serde_json::json!({
                "account_id": account,
                "balance": balance,
                "required": amount,
            }),
        ),
        _ => ErrorResponse::new(err.code(), err.to_string()),
    };
    (status, Json(body))
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
