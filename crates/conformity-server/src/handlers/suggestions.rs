use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use conformity_core::{SuggestionRequest, SuggestionResponse};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /get_suggestions`: forward `input` to the chat model as one user turn.
pub async fn get_suggestions(
    State(state): State<AppState>,
    payload: Result<Json<SuggestionRequest>, JsonRejection>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let Json(request) = payload?;
    let prompt = request
        .prompt()
        .ok_or_else(|| ApiError::BadRequest("Input text is required.".to_string()))?;

    info!(chars = prompt.len(), model = %state.chat.model(), "received suggestion request");
    let suggestion = state.chat.chat(prompt).await?;

    Ok(Json(SuggestionResponse { suggestion }))
}
