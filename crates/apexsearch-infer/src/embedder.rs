//! Embedding engine trait and input/output variants.
//!
//! The `EmbedderBackend` trait abstracts over embedding generation.
//! `OnnxEmbedder` (feature `onnx`) is the production implementation.

use apexsearch_core::{Error, Result};
use ndarray::Array1;

/// Dense float32 embedding vector (384-dim for all-MiniLM-L6-v2). Never normalized here.
pub type Embedding = Array1<f32>;

/// Text handed to [`EmbedderBackend::encode`]: one string or an ordered batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedInput {
    Single(String),
    Batch(Vec<String>),
}

impl From<&str> for EmbedInput {
    fn from(text: &str) -> Self {
        Self::Single(text.to_string())
    }
}

impl From<String> for EmbedInput {
    fn from(text: String) -> Self {
        Self::Single(text)
    }
}

impl From<Vec<String>> for EmbedInput {
    fn from(texts: Vec<String>) -> Self {
        Self::Batch(texts)
    }
}

/// Output of [`EmbedderBackend::encode`], shaped like its input.
#[derive(Debug, Clone, PartialEq)]
pub enum Embedded {
    Single(Embedding),
    Batch(Vec<Embedding>),
}

impl Embedded {
    /// Flatten into a list of embeddings in input order.
    pub fn into_vec(self) -> Vec<Embedding> {
        match self {
            Self::Single(e) => vec![e],
            Self::Batch(es) => es,
        }
    }
}

/// Trait for embedding backends.
///
/// Implementations own their model exclusively and must tolerate concurrent
/// callers, serializing internally if the runtime requires it.
pub trait EmbedderBackend: Send + Sync {
    /// Generate an embedding for a text string.
    fn embed(&self, text: &str) -> Result<Embedding>;

    /// Generate embeddings for a batch of texts, one per input, in order.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Embed either a single text or a batch.
    fn encode(&self, input: EmbedInput) -> Result<Embedded> {
        match input {
            EmbedInput::Single(text) => self.embed(&text).map(Embedded::Single),
            EmbedInput::Batch(texts) => {
                let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
                let embeddings = self.embed_batch(&refs)?;
                if embeddings.len() != texts.len() {
                    return Err(Error::Inference(format!(
                        "backend returned {} embeddings for {} inputs",
                        embeddings.len(),
                        texts.len()
                    )));
                }
                Ok(Embedded::Batch(embeddings))
            }
        }
    }

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;

    /// Name of the underlying model.
    fn model_name(&self) -> &str;
}
