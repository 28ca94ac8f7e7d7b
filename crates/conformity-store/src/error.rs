use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("reference document not found: {0}")]
    DocumentNotFound(String),

    #[error("unsupported document extension: {0}")]
    UnsupportedExtension(String),

    #[error("failed to extract text from {path:?}: {message}")]
    PdfExtract { path: PathBuf, message: String },

    #[error("JSON file not found: {0}")]
    JsonNotFound(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// True for every failure the HTTP layer reports as "document not found".
    pub fn is_missing_document(&self) -> bool {
        matches!(
            self,
            Self::DocumentNotFound(_)
                | Self::UnsupportedExtension(_)
                | Self::PdfExtract { .. }
                | Self::Io(_)
        )
    }
}
