//! Lexical similarity: TF-IDF vectors fitted on exactly the two documents.
//!
//! Terms are lower-cased runs of word characters (alphanumerics and `_`) at
//! least two characters long. Weights are raw term counts times the smoothed
//! inverse document frequency `ln((1 + n) / (1 + df)) + 1`, with `n = 2`.
//! Both vectors are L2-normalised, so their dot product is the cosine.

use std::collections::HashMap;

use conformity_core::ScorerKind;

use crate::scorer::{ScoreError, SimilarityScorer};

const N_DOCS: f64 = 2.0;

/// TF-IDF cosine scorer. Stateless: the vocabulary is rebuilt per pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfidfScorer;

impl TfidfScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score two documents. Never fails; an empty vocabulary scores `0.0`.
    pub fn similarity(&self, a: &str, b: &str) -> f32 {
        let a_lower = a.to_lowercase();
        let b_lower = b.to_lowercase();
        let counts_a = term_counts(&a_lower);
        let counts_b = term_counts(&b_lower);

        let idf = |term: &str| {
            let df = counts_a.contains_key(term) as u8 + counts_b.contains_key(term) as u8;
            ((1.0 + N_DOCS) / (1.0 + df as f64)).ln() + 1.0
        };

        let weights_a = weigh(&counts_a, idf);
        let weights_b = weigh(&counts_b, idf);

        let norm_a = l2_norm(&weights_a);
        let norm_b = l2_norm(&weights_b);
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        let dot: f64 = weights_a
            .iter()
            .filter_map(|(term, wa)| weights_b.get(term).map(|wb| wa * wb))
            .sum();

        (dot / (norm_a * norm_b)).clamp(0.0, 1.0) as f32
    }
}

impl SimilarityScorer for TfidfScorer {
    fn score(&self, a: &str, b: &str) -> Result<f32, ScoreError> {
        Ok(self.similarity(a, b))
    }

    fn kind(&self) -> ScorerKind {
        ScorerKind::Lexical
    }
}

fn term_counts(text: &str) -> HashMap<&str, u32> {
    let mut counts = HashMap::new();
    for term in text
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
    {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

fn weigh<'a>(counts: &HashMap<&'a str, u32>, idf: impl Fn(&str) -> f64) -> HashMap<&'a str, f64> {
    counts
        .iter()
        .map(|(&term, &count)| (term, count as f64 * idf(term)))
        .collect()
}

fn l2_norm(weights: &HashMap<&str, f64>) -> f64 {
    weights.values().map(|w| w * w).sum::<f64>().sqrt()
}
