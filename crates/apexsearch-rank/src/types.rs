//! Ranking result types.

use serde::{Deserialize, Serialize};

/// Position and score of the best candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub index: usize,
    pub score: f32,
}

/// A resolved top-1 search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub query: String,
    pub best_match: String,
    pub score: f32,
    pub index: usize,
}
