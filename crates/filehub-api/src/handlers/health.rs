//! Health check handler.

use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

fn status_of(result: filehub_core::AppResult<bool>) -> &'static str {
    match result {
        Ok(true) => "connected",
        Ok(false) => "unavailable",
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            "unavailable"
        }
    }
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> ApiResponse<HealthResponse> {
    let database = status_of(state.db.health_check().await);
    let storage = status_of(state.storage.health_check().await);

    let status = if database == "connected" && storage == "connected" {
        "ok"
    } else {
        "degraded"
    };

    ApiResponse::data(HealthResponse {
        status: status.to_string(),
        database: database.to_string(),
        storage: storage.to_string(),
    })
}
