use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use conformity_core::{ComplianceRequest, ComplianceResponse, round_score};
use conformity_store::ReferenceStore;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /check_compliance`: score the submitted document against the reference.
///
/// With a reference directory configured, a `doc_reference` that looks like a
/// file name is loaded from that directory; otherwise it is the text itself.
/// Loading and scoring are CPU-bound and run on the blocking pool.
pub async fn check_compliance(
    State(state): State<AppState>,
    payload: Result<Json<ComplianceRequest>, JsonRejection>,
) -> Result<Json<ComplianceResponse>, ApiError> {
    let Json(request) = payload?;
    let (reference, submitted) = request.documents().ok_or_else(|| {
        ApiError::BadRequest("doc_reference and doc_submitted are required.".to_string())
    })?;

    let reference = resolve_reference(&state, reference).await?;
    let submitted = submitted.to_string();

    let model = state.compliance.clone();
    let score =
        tokio::task::spawn_blocking(move || model.compute_similarity(&reference, &submitted))
            .await??;

    let conformity_score = round_score(score);
    info!(
        scorer = %state.compliance.scorer_kind(),
        conformity_score,
        "scored compliance"
    );
    Ok(Json(ComplianceResponse { conformity_score }))
}

async fn resolve_reference(state: &AppState, reference: &str) -> Result<String, ApiError> {
    match &state.references {
        Some(store) if ReferenceStore::looks_like_filename(reference) => {
            let store = store.clone();
            let name = reference.trim().to_string();
            Ok(tokio::task::spawn_blocking(move || store.load(&name)).await??)
        }
        _ => Ok(reference.to_string()),
    }
}
