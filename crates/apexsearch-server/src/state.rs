//! Shared application state and the startup sequence that produces it.

use std::sync::Arc;

use apexsearch_core::{Error, Result, SearchConfig};
use apexsearch_infer::EmbedderBackend;
use apexsearch_rank::{CorpusIndex, SearchHit};
use tracing::info;

/// Shared application state accessible from all route handlers.
///
/// Only constructed by [`initialize`], so holding one means the corpus index
/// is complete. Nothing in it changes while serving.
pub struct AppState {
    pub config: SearchConfig,
    pub embedder: Arc<dyn EmbedderBackend>,
    pub index: CorpusIndex,
}

impl AppState {
    /// Run a top-1 search for `query` against the corpus index. Blocking.
    pub fn search(&self, query: &str) -> Result<SearchHit> {
        self.index.search(self.embedder.as_ref(), query)
    }
}

/// Embed the configured corpus with `embedder` and assemble the state.
pub async fn initialize(
    config: SearchConfig,
    embedder: Arc<dyn EmbedderBackend>,
) -> Result<Arc<AppState>> {
    let corpus = config.corpus.clone();
    let build_embedder = embedder.clone();
    let index = tokio::task::spawn_blocking(move || {
        CorpusIndex::build(build_embedder.as_ref(), corpus)
    })
    .await
    .map_err(|e| Error::Internal(format!("Corpus index task failed: {}", e)))??;

    Ok(Arc::new(AppState {
        config,
        embedder,
        index,
    }))
}

/// Load the model named by `config` and build the state.
///
/// Any failure here means the service must not become ready.
pub async fn startup(config: SearchConfig) -> Result<Arc<AppState>> {
    let model = config.model.clone();
    info!(
        "Loading embedding model {} from {}",
        model.name,
        model.dir.display()
    );
    let embedder = tokio::task::spawn_blocking(move || apexsearch_infer::create_embedder(&model))
        .await
        .map_err(|e| Error::Internal(format!("Model load task failed: {}", e)))??;

    initialize(config, embedder).await
}
