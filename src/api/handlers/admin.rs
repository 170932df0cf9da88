use serde::Serialize;

use crate::api::response::ApiOk;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: String,
    pub version: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn health() -> ApiOk<HealthResponse> {
    ApiOk(HealthResponse {
        message: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
