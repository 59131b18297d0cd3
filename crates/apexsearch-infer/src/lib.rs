//! apexsearch Infer — embedding engine and model loading.
//!
//! Provides the `EmbedderBackend` trait for generating embeddings.
//! When the `onnx` feature is enabled, `OnnxEmbedder` loads a
//! SentenceTransformers ONNX export (all-MiniLM-L6-v2, 384-dim).

pub mod embedder;
pub mod onnx_embedder;

pub use embedder::{EmbedInput, Embedded, EmbedderBackend, Embedding};

#[cfg(feature = "onnx")]
pub use onnx_embedder::OnnxEmbedder;

use std::sync::Arc;

use apexsearch_core::{ModelConfig, Result};

/// Create the embedder described by `config`.
///
/// There is no fallback: a model that cannot be loaded is a `ModelLoad`
/// error and the caller must not become ready.
pub fn create_embedder(config: &ModelConfig) -> Result<Arc<dyn EmbedderBackend>> {
    #[cfg(feature = "onnx")]
    {
        let embedder = OnnxEmbedder::load(config)?;
        tracing::info!("Using ONNX embedder (dim={})", embedder.dimension());
        Ok(Arc::new(embedder))
    }

    #[cfg(not(feature = "onnx"))]
    {
        Err(apexsearch_core::Error::ModelLoad(format!(
            "ONNX feature disabled; cannot load {} from {}",
            config.name,
            config.dir.display()
        )))
    }
}
