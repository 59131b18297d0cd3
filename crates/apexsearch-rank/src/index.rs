//! In-memory corpus index: the corpus texts paired with their embeddings.
//!
//! Built once from a full batch embedding call and never mutated afterwards,
//! so it can be shared across request handlers without locking.

use apexsearch_core::{Error, Result};
use apexsearch_infer::{EmbedderBackend, Embedding};
use tracing::{debug, info};

use crate::similarity::best_match;
use crate::types::SearchHit;

/// Corpus texts and their embeddings; `embeddings[i]` always belongs to `texts[i]`.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    texts: Vec<String>,
    embeddings: Vec<Embedding>,
}

impl CorpusIndex {
    /// Embed every corpus text and build the index.
    ///
    /// Either the whole corpus is embedded or an error is returned; there is
    /// no partially built index.
    pub fn build(embedder: &dyn EmbedderBackend, texts: Vec<String>) -> Result<Self> {
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let embeddings = embedder.embed_batch(&refs)?;
        let index = Self::from_parts(texts, embeddings)?;
        info!(
            "Corpus index built: {} entries, model={}",
            index.len(),
            embedder.model_name()
        );
        Ok(index)
    }

    /// Pair precomputed embeddings with their texts, checking the lengths agree.
    pub fn from_parts(texts: Vec<String>, embeddings: Vec<Embedding>) -> Result<Self> {
        if texts.len() != embeddings.len() {
            return Err(Error::Inference(format!(
                "corpus has {} texts but {} embeddings",
                texts.len(),
                embeddings.len()
            )));
        }
        Ok(Self { texts, embeddings })
    }

    /// Embed `query` and return the best matching corpus entry.
    pub fn search(&self, embedder: &dyn EmbedderBackend, query: &str) -> Result<SearchHit> {
        if query.trim().is_empty() {
            return Err(Error::InvalidInput("query must not be empty".into()));
        }

        let query_embedding = embedder.embed(query)?;
        let best = best_match(&query_embedding, &self.embeddings)?;
        debug!("query={:?} best_index={} score={}", query, best.index, best.score);

        Ok(SearchHit {
            query: query.to_string(),
            best_match: self.texts[best.index].clone(),
            score: best.score,
            index: best.index,
        })
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn embeddings(&self) -> &[Embedding] {
        &self.embeddings
    }

    /// Dimension of the stored embeddings, or `None` for an empty corpus.
    pub fn dimension(&self) -> Option<usize> {
        self.embeddings.first().map(|e| e.len())
    }
}
