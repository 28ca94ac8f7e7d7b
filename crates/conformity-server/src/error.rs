//! API error type mapped to HTTP status codes.
//!
//! Each [`ApiError`] variant maps to one status code and renders the body
//! `{"error": "message"}`. Internal error types convert into it so handlers
//! can use `?` throughout.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use conformity_ai::{ChatError, ScoreError};
use conformity_core::ErrorBody;
use conformity_store::StoreError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing fields or a body that is not the expected JSON (400).
    #[error("{0}")]
    BadRequest(String),
    /// Reference document could not be resolved (404).
    #[error("{0}")]
    NotFound(String),
    /// Upstream or scoring failure (500).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Request must be JSON (missing `Content-Type: application/json` header)".to_string()
            }
            JsonRejection::JsonSyntaxError(_) => format!("Invalid JSON: {}", rejection.body_text()),
            JsonRejection::JsonDataError(_) => {
                format!("Invalid request body: {}", rejection.body_text())
            }
            _ => rejection.body_text(),
        };
        warn!(%message, "rejected request body");
        Self::BadRequest(message)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        if e.is_missing_document() {
            warn!(error = %e, "reference document unavailable");
            Self::NotFound(e.to_string())
        } else {
            error!(error = %e, "store failure");
            Self::Internal(e.to_string())
        }
    }
}

impl From<ScoreError> for ApiError {
    fn from(e: ScoreError) -> Self {
        error!(error = %e, "similarity scoring failed");
        Self::Internal(e.to_string())
    }
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        error!(error = %e, "chat request failed");
        Self::Internal(e.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        error!(error = %e, "blocking task failed");
        Self::Internal(format!("internal error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_map_to_not_found() {
        let err: ApiError = StoreError::DocumentNotFound("policy.pdf".into()).into();
        assert!(matches!(err, ApiError::NotFound(ref m) if m.contains("policy.pdf")));

        let err: ApiError = StoreError::UnsupportedExtension("policy.docx".into()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: ApiError = StoreError::JsonNotFound("data/a.json".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn chat_errors_are_internal() {
        let err: ApiError = ChatError::UnexpectedResponse.into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("unexpected response format"));
    }
}
