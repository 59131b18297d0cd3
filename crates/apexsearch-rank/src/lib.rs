//! Ranking — cosine similarity, top-1 selection, and the corpus index
//! that holds precomputed corpus embeddings for the server lifetime.

pub mod index;
pub mod similarity;
pub mod types;

pub use index::CorpusIndex;
pub use similarity::{best_match, cosine_similarity, score_all};
pub use types::{Match, SearchHit};
