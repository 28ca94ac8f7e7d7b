use std::path::PathBuf;

use clap::Parser;
use conformity_ai::ChatOptions;
use conformity_core::ScorerKind;

/// Conformity: LLM suggestions and document compliance scoring over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to serve the API on
    #[arg(long, env = "CONFORMITY_ADDRESS", default_value = "0.0.0.0:5000")]
    pub address: String,

    /// Similarity scorer: `tfidf` (lexical) or `bert` (semantic, needs the onnx feature)
    #[arg(long, env = "CONFORMITY_SCORER", default_value = "bert")]
    pub scorer: ScorerKind,

    /// Directory holding `model.onnx` and `tokenizer.json` for the bert scorer
    #[arg(long, env = "CONFORMITY_MODEL_DIR", default_value = "models/bert-base-uncased")]
    pub model_dir: PathBuf,

    /// Lower-case, drop stop words and stem both documents before scoring
    #[arg(long, env = "CONFORMITY_PREPROCESS", default_value_t = false)]
    pub preprocess: bool,

    /// Directory of `.txt` / `.pdf` reference documents; enables filename references
    #[arg(long, env = "CONFORMITY_REFERENCE_DIR")]
    pub reference_dir: Option<PathBuf>,

    /// Base URL of the Ollama server
    #[arg(long, env = "OLLAMA_HOST", default_value = "http://localhost:11434")]
    pub ollama_url: String,

    /// Ollama model used for suggestions
    #[arg(long, env = "CONFORMITY_CHAT_MODEL", default_value = "llama3.2:latest")]
    pub chat_model: String,

    /// Sampling temperature for suggestions
    #[arg(long, env = "CONFORMITY_TEMPERATURE", default_value_t = 0.7)]
    pub temperature: f32,

    /// Maximum tokens generated per suggestion
    #[arg(long, env = "CONFORMITY_NUM_PREDICT", default_value_t = 128)]
    pub num_predict: u32,
}

impl ServerConfig {
    pub fn chat_options(&self) -> ChatOptions {
        ChatOptions {
            temperature: self.temperature,
            num_predict: self.num_predict,
        }
    }
}
