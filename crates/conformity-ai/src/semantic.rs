//! Semantic similarity: cosine of mean-pooled transformer embeddings.

use std::path::Path;
use std::sync::Mutex;

use conformity_core::ScorerKind;

use crate::embedder::Embedder;
use crate::scorer::{ScoreError, SimilarityScorer, cosine_similarity};

/// Embedding scorer sharing one loaded [`Embedder`] across callers.
///
/// ONNX sessions need exclusive access to run, so concurrent requests are
/// serialised on the mutex.
pub struct SemanticScorer {
    embedder: Mutex<Embedder>,
}

impl SemanticScorer {
    pub fn new(embedder: Embedder) -> Self {
        Self {
            embedder: Mutex::new(embedder),
        }
    }

    /// Load the model from `model_dir` (see [`Embedder::load`]).
    pub fn load(model_dir: &Path) -> anyhow::Result<Self> {
        Ok(Self::new(Embedder::load(model_dir)?))
    }
}

impl SimilarityScorer for SemanticScorer {
    fn score(&self, a: &str, b: &str) -> Result<f32, ScoreError> {
        let mut embedder = self.embedder.lock().map_err(|_| ScoreError::Poisoned)?;
        let vectors = embedder.embed_batch(&[a, b])?;
        match vectors.as_slice() {
            [va, vb] => Ok(cosine_similarity(va, vb)),
            other => Err(ScoreError::Embedding(format!(
                "expected 2 embeddings, got {}",
                other.len()
            ))),
        }
    }

    fn kind(&self) -> ScorerKind {
        ScorerKind::Semantic
    }
}
