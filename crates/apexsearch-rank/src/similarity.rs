//! Cosine similarity and brute-force top-1 selection.

use apexsearch_core::{Error, Result};
use ndarray::Array1;

use crate::types::Match;

/// Cosine similarity of two equal-length vectors.
///
/// Returns exactly `0.0` when either vector has zero norm. The result is not
/// clamped, so float error may put it marginally outside [-1, 1].
pub fn cosine_similarity(a: &Array1<f32>, b: &Array1<f32>) -> Result<f32> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    // Accumulate in f64 so squared norms of f32 inputs cannot overflow or underflow.
    let denom = dot_f64(a, a).sqrt() * dot_f64(b, b).sqrt();
    if denom == 0.0 {
        return Ok(0.0);
    }
    Ok((dot_f64(a, b) / denom) as f32)
}

fn dot_f64(a: &Array1<f32>, b: &Array1<f32>) -> f64 {
    a.iter().zip(b.iter()).map(|(&x, &y)| x as f64 * y as f64).sum()
}

/// Score every candidate against the query, in candidate order.
pub fn score_all(query: &Array1<f32>, candidates: &[Array1<f32>]) -> Result<Vec<f32>> {
    candidates
        .iter()
        .map(|candidate| cosine_similarity(query, candidate))
        .collect()
}

/// Index and score of the candidate most similar to `query`.
///
/// The lowest index wins ties. A NaN score never beats a real one.
pub fn best_match(query: &Array1<f32>, candidates: &[Array1<f32>]) -> Result<Match> {
    if candidates.is_empty() {
        return Err(Error::EmptyCandidateSet);
    }

    let scores = score_all(query, candidates)?;
    let mut best = Match {
        index: 0,
        score: scores[0],
    };
    for (index, &score) in scores.iter().enumerate().skip(1) {
        if score > best.score || (best.score.is_nan() && !score.is_nan()) {
            best = Match { index, score };
        }
    }
    Ok(best)
}
