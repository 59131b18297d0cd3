//! Health and readiness routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_status))
        .route("/ready", get(get_ready))
}

/// GET / — service status.
async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "apexsearch running",
        "model": state.embedder.model_name(),
        "dimension": state.embedder.dimension(),
        "corpus_size": state.index.len(),
    }))
}

/// GET /ready — readiness. The router only exists once the corpus index is built.
async fn get_ready(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "ready": true,
        "corpus_size": state.index.len(),
    }))
}
