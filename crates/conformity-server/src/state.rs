use std::sync::Arc;

use conformity_ai::{ChatClient, ComplianceModel, SimilarityScorer, TfidfScorer};
use conformity_core::ScorerKind;
use conformity_store::ReferenceStore;
use tracing::info;

use crate::config::ServerConfig;

/// Everything a handler needs, built once at startup and shared by clone.
#[derive(Clone)]
pub struct AppState {
    pub compliance: Arc<ComplianceModel>,
    pub chat: Arc<ChatClient>,
    /// Present when filename references are enabled.
    pub references: Option<ReferenceStore>,
}

impl AppState {
    pub fn new(
        compliance: ComplianceModel,
        chat: ChatClient,
        references: Option<ReferenceStore>,
    ) -> Self {
        Self {
            compliance: Arc::new(compliance),
            chat: Arc::new(chat),
            references,
        }
    }

    /// Build the state from configuration, loading the scorer's model if needed.
    ///
    /// Blocking: the semantic scorer reads its weights from disk here.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let scorer = build_scorer(config)?;
        let compliance = ComplianceModel::new(scorer).with_preprocessing(config.preprocess);

        let chat = ChatClient::new(config.ollama_url.clone(), config.chat_model.clone())
            .with_options(config.chat_options());

        let references = config.reference_dir.as_ref().map(|dir| {
            info!(dir = %dir.display(), "filename references enabled");
            ReferenceStore::new(dir)
        });

        info!(
            scorer = %compliance.scorer_kind(),
            preprocess = config.preprocess,
            chat_model = %config.chat_model,
            "application state ready"
        );
        Ok(Self::new(compliance, chat, references))
    }
}

fn build_scorer(config: &ServerConfig) -> anyhow::Result<Arc<dyn SimilarityScorer>> {
    match config.scorer {
        ScorerKind::Lexical => Ok(Arc::new(TfidfScorer::new())),
        ScorerKind::Semantic => load_semantic(config),
    }
}

#[cfg(feature = "onnx")]
fn load_semantic(config: &ServerConfig) -> anyhow::Result<Arc<dyn SimilarityScorer>> {
    use anyhow::Context;

    let scorer = conformity_ai::SemanticScorer::load(&config.model_dir)
        .with_context(|| format!("loading embedding model from {}", config.model_dir.display()))?;
    Ok(Arc::new(scorer))
}

#[cfg(not(feature = "onnx"))]
fn load_semantic(_config: &ServerConfig) -> anyhow::Result<Arc<dyn SimilarityScorer>> {
    anyhow::bail!("the `bert` scorer requires building with the `onnx` feature; use `--scorer tfidf`")
}
