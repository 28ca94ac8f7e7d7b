//! AI layer: text similarity scoring (TF-IDF, ONNX embeddings) and LLM chat via Ollama.

pub mod chat;
pub mod compliance;
pub mod preprocess;
pub mod scorer;
pub mod tfidf;

#[cfg(feature = "onnx")]
mod embedder;
#[cfg(feature = "onnx")]
mod semantic;

pub use chat::{ChatClient, ChatError, ChatOptions};
pub use compliance::ComplianceModel;
pub use preprocess::preprocess;
pub use scorer::{ScoreError, SimilarityScorer, cosine_similarity};
pub use tfidf::TfidfScorer;

#[cfg(feature = "onnx")]
pub use embedder::Embedder;
#[cfg(feature = "onnx")]
pub use semantic::SemanticScorer;
