//! Semantic search route.

use std::sync::Arc;

use apexsearch_core::Error;
use apexsearch_rank::SearchHit;
use axum::extract::{Query, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/search", post(search))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    query: Option<String>,
}

/// POST /search?query=<text> — best corpus match for the query.
async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchHit>, ApiError> {
    let query = match params.query {
        Some(q) if !q.trim().is_empty() => q,
        _ => {
            return Err(Error::InvalidInput("query parameter is required".into()).into());
        }
    };

    // Embedding is CPU-bound; keep it off the async workers.
    let hit = tokio::task::spawn_blocking(move || state.search(&query))
        .await
        .map_err(|e| Error::Internal(format!("Search task failed: {}", e)))??;

    Ok(Json(hit))
}
