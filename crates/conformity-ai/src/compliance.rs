//! Compliance façade: one entry point, whichever scorer is installed.

use std::sync::Arc;

use conformity_core::ScorerKind;
use tracing::debug;

use crate::preprocess::preprocess;
use crate::scorer::{ScoreError, SimilarityScorer};

/// Conformity between a reference document and a submitted one.
///
/// Holds a shared scorer built once at startup. Optionally normalises both
/// texts with [`preprocess`] before scoring.
#[derive(Clone)]
pub struct ComplianceModel {
    scorer: Arc<dyn SimilarityScorer>,
    preprocess: bool,
}

impl ComplianceModel {
    pub fn new(scorer: Arc<dyn SimilarityScorer>) -> Self {
        Self {
            scorer,
            preprocess: false,
        }
    }

    pub fn with_preprocessing(mut self, enabled: bool) -> Self {
        self.preprocess = enabled;
        self
    }

    pub fn scorer_kind(&self) -> ScorerKind {
        self.scorer.kind()
    }

    /// Similarity between `reference` and `submitted` as a plain `f64`.
    pub fn compute_similarity(&self, reference: &str, submitted: &str) -> Result<f64, ScoreError> {
        let score = if self.preprocess {
            self.scorer
                .score(&preprocess(reference), &preprocess(submitted))?
        } else {
            self.scorer.score(reference, submitted)?
        };
        debug!(scorer = %self.scorer.kind(), score, "computed similarity");
        Ok(f64::from(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfidf::TfidfScorer;
    use std::sync::Mutex;

    /// Records the texts it is asked to compare and returns a fixed score.
    struct Recording {
        seen: Mutex<Vec<(String, String)>>,
        result: Option<f32>,
    }

    impl Recording {
        fn returning(result: Option<f32>) -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
                result,
            })
        }
    }

    impl SimilarityScorer for Recording {
        fn score(&self, a: &str, b: &str) -> Result<f32, ScoreError> {
            self.seen
                .lock()
                .unwrap()
                .push((a.to_string(), b.to_string()));
            self.result
                .ok_or_else(|| ScoreError::Embedding("model unavailable".into()))
        }

        fn kind(&self) -> ScorerKind {
            ScorerKind::Semantic
        }
    }

    #[test]
    fn returns_native_float() {
        let model = ComplianceModel::new(Arc::new(TfidfScorer));
        let score: f64 = model.compute_similarity("", "").unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn delegates_to_scorer() {
        let stub = Recording::returning(Some(0.25));
        let model = ComplianceModel::new(stub.clone());
        assert_eq!(model.compute_similarity("Ref.", "Sub.").unwrap(), 0.25);
        assert_eq!(
            stub.seen.lock().unwrap().as_slice(),
            &[("Ref.".to_string(), "Sub.".to_string())]
        );
        assert_eq!(model.scorer_kind(), ScorerKind::Semantic);
    }

    #[test]
    fn preprocessing_applies_to_both_texts() {
        let stub = Recording::returning(Some(1.0));
        let model = ComplianceModel::new(stub.clone()).with_preprocessing(true);
        model
            .compute_similarity("The Dogs!", "All the AUDITS.")
            .unwrap();
        assert_eq!(
            stub.seen.lock().unwrap().as_slice(),
            &[("dog".to_string(), "audit".to_string())]
        );
    }

    #[test]
    fn scorer_errors_propagate() {
        let model = ComplianceModel::new(Recording::returning(None));
        let err = model.compute_similarity("a doc", "b doc").unwrap_err();
        assert!(err.to_string().contains("model unavailable"));
    }

    #[test]
    fn preprocessed_lexical_scoring() {
        let model = ComplianceModel::new(Arc::new(TfidfScorer)).with_preprocessing(true);
        let score = model
            .compute_similarity("Regular audits are required.", "We audit regularly; audits are required")
            .unwrap();
        assert!(score > 0.5, "got {score}");
    }
}
