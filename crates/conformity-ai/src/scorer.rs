//! The contract shared by every similarity strategy.

use conformity_core::ScorerKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("embedding failed: {0}")]
    Embedding(String),

    #[error("embedding model lock poisoned")]
    Poisoned,
}

impl From<anyhow::Error> for ScoreError {
    fn from(e: anyhow::Error) -> Self {
        Self::Embedding(format!("{e:#}"))
    }
}

/// A document-pair similarity strategy.
///
/// Implementations are constructed once and shared across requests, so any
/// expensive state (model weights, tokenizers) lives inside the scorer.
pub trait SimilarityScorer: Send + Sync {
    /// Similarity between two documents. Deterministic for identical inputs.
    fn score(&self, a: &str, b: &str) -> Result<f32, ScoreError>;

    fn kind(&self) -> ScorerKind;
}

/// Cosine similarity of two equal-length vectors.
///
/// Returns `0.0` when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}
