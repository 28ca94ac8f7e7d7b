use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers::{check_compliance, get_suggestions, health};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/get_suggestions", post(get_suggestions))
        .route("/check_compliance", post(check_compliance))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
