use axum::Json;
use axum::extract::State;
use conformity_core::HealthResponse;

use crate::state::AppState;

/// `GET /health`: liveness plus the active scorer.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        scorer: state.compliance.scorer_kind().to_string(),
    })
}
