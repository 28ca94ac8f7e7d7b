//! Scorer selection and score presentation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Decimal places kept in `conformity_score` responses.
pub const SCORE_DECIMALS: i32 = 4;

/// Which similarity strategy backs the compliance endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScorerKind {
    /// TF-IDF cosine over the two documents. Range [0, 1].
    #[serde(rename = "tfidf", alias = "lexical")]
    Lexical,
    /// Mean-pooled transformer embeddings, cosine similarity. Range [-1, 1].
    #[serde(rename = "bert", alias = "semantic")]
    Semantic,
}

impl ScorerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lexical => "tfidf",
            Self::Semantic => "bert",
        }
    }
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown scorer {0:?} (expected one of: tfidf, lexical, bert, semantic)")]
pub struct ParseScorerKindError(String);

impl FromStr for ScorerKind {
    type Err = ParseScorerKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tfidf" | "tf-idf" | "lexical" => Ok(Self::Lexical),
            "bert" | "semantic" => Ok(Self::Semantic),
            _ => Err(ParseScorerKindError(s.to_string())),
        }
    }
}

/// Round a score to [`SCORE_DECIMALS`] places for the wire.
///
/// Non-finite inputs collapse to `0.0` so the response always serialises.
pub fn round_score(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(SCORE_DECIMALS);
    (score * factor).round() / factor
}
