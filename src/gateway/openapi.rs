//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::engine::TransferRequest;
use crate::gateway::types::{
    BalanceResponseData, ErrorDetail, ErrorResponse, HealthResponse, TransferResponseData,
};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Atomic Ledger API",
        version = "1.0.0",
        description = "Atomic two-account money transfers with exact decimal accounting.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health_check,
        crate::gateway::handlers::create_transfer,
        crate::gateway::handlers::get_balance,
    ),
    components(
        schemas(
            TransferRequest,
            TransferResponseData,
            BalanceResponseData,
            HealthResponse,
            ErrorResponse,
            ErrorDetail,
        )
    ),
    tags(
        (name = "Transfer", description = "Money movement between accounts"),
        (name = "Balance", description = "Balance queries"),
        (name = "System", description = "Health and diagnostics"),
    )
)]
pub struct ApiDoc;
