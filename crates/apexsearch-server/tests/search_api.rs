//! HTTP API tests — drive the router directly with `oneshot`, using a
//! deterministic keyword embedder in place of the ONNX model.

use std::sync::Arc;

use apexsearch_core::{Error, Result, SearchConfig};
use apexsearch_infer::{EmbedderBackend, Embedding};
use apexsearch_server::{build_router, initialize, startup};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use ndarray::Array1;
use tower::util::ServiceExt;

const KEYWORDS: [&str; 5] = ["apex", "api", "vector", "cat", "sleep"];

/// One dimension per keyword; 1.0 when the text mentions it.
struct KeywordEmbedder;

impl EmbedderBackend for KeywordEmbedder {
    fn embed(&self, text: &str) -> Result<Embedding> {
        let lower = text.to_lowercase();
        Ok(Array1::from_iter(
            KEYWORDS
                .iter()
                .map(|k| if lower.contains(k) { 1.0 } else { 0.0 }),
        ))
    }

    fn dimension(&self) -> usize {
        KEYWORDS.len()
    }

    fn model_name(&self) -> &str {
        "keyword-test"
    }
}

fn test_config(corpus: &[&str]) -> SearchConfig {
    let mut config = SearchConfig::from_lookup(|_| None).unwrap();
    config.corpus = corpus.iter().map(|s| s.to_string()).collect();
    config
}

async fn test_router(corpus: &[&str]) -> axum::Router {
    let state = initialize(test_config(corpus), Arc::new(KeywordEmbedder))
        .await
        .unwrap();
    build_router(state)
}

async fn send(router: axum::Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

const CORPUS: [&str; 4] = [
    "Oracle APEX is a low-code development platform.",
    "FastAPI is a modern Python web framework.",
    "Vector databases store embeddings for similarity search.",
    "Cats like to sleep during the day.",
];

#[tokio::test]
async fn test_root_status() {
    let (status, body) = send(test_router(&CORPUS).await, "GET", "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "apexsearch running");
    assert_eq!(body["corpus_size"], 4);
    assert_eq!(body["dimension"], 5);
    assert_eq!(body["model"], "keyword-test");
}

#[tokio::test]
async fn test_ready() {
    let (status, body) = send(test_router(&CORPUS).await, "GET", "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
}

#[tokio::test]
async fn test_search_returns_best_match() {
    let (status, body) = send(
        test_router(&CORPUS).await,
        "POST",
        "/search?query=where%20do%20cats%20sleep",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "where do cats sleep");
    assert_eq!(body["best_match"], CORPUS[3]);
    assert_eq!(body["index"], 3);
    let score = body["score"].as_f64().unwrap();
    assert!((score - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_search_unmatched_query_prefers_first_entry() {
    // A keyword-free query embeds to all zeros, scoring 0.0 against everything.
    let (status, body) = send(test_router(&CORPUS).await, "POST", "/search?query=hello").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["index"], 0);
    assert_eq!(body["score"].as_f64().unwrap(), 0.0);
}

#[tokio::test]
async fn test_search_missing_query() {
    let (status, body) = send(test_router(&CORPUS).await, "POST", "/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("query"));
}

#[tokio::test]
async fn test_search_blank_query() {
    let (status, _) = send(test_router(&CORPUS).await, "POST", "/search?query=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_empty_corpus() {
    let (status, body) = send(test_router(&[]).await, "POST", "/search?query=cats").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("No results"));
}

#[tokio::test]
async fn test_search_requires_post() {
    let router = test_router(&CORPUS).await;
    let request = Request::builder()
        .method("GET")
        .uri("/search?query=cats")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

/// A failed `startup` yields no `AppState`, so the router is never built and
/// the listener never binds: the service is never ready.
#[tokio::test]
async fn test_startup_fails_without_model() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&CORPUS);
    config.model.dir = dir.path().to_path_buf();

    match startup(config).await {
        Err(Error::ModelLoad(_)) => {}
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("startup must fail without model files"),
    }
}

/// Runs against the real all-MiniLM-L6-v2 export. Point `APEXSEARCH_MODEL_DIR`
/// at a directory with `model.onnx` and `tokenizer.json`, and `ORT_DYLIB_PATH`
/// at libonnxruntime.
#[tokio::test]
#[ignore = "requires all-MiniLM-L6-v2 ONNX model files"]
async fn test_end_to_end_with_model() {
    let config = SearchConfig::from_env().unwrap();
    let state = startup(config).await.unwrap();
    assert_eq!(state.embedder.dimension(), 384);

    let single = state.embedder.embed("hello world").unwrap();
    assert_eq!(single.len(), 384);
    let batch = state.embedder.embed_batch(&["a", "b", "c"]).unwrap();
    assert_eq!(batch.len(), 3);
    assert!(batch.iter().all(|e| e.len() == 384));

    let query = "Which platform is used for building APIs?";
    let query_embedding = state.embedder.embed(query).unwrap();
    let scores = apexsearch_rank::score_all(&query_embedding, state.index.embeddings()).unwrap();

    let router = build_router(state);
    let (status, body) = send(
        router,
        "POST",
        "/search?query=Which%20platform%20is%20used%20for%20building%20APIs%3F",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["best_match"], CORPUS[1]);
    assert_eq!(body["index"], 1);
    assert!(scores[1] > scores[3]);
}
