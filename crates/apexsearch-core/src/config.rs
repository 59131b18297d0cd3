//! Configuration: listen address, model location, and the search corpus.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Corpus searched when no corpus file is configured.
pub const DEFAULT_CORPUS: [&str; 4] = [
    "Oracle APEX is a low-code development platform.",
    "FastAPI is a modern Python web framework.",
    "Vector databases store embeddings for similarity search.",
    "Cats like to sleep during the day.",
];

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MODEL_NAME: &str = "all-MiniLM-L6-v2";
const DEFAULT_INTRA_THREADS: usize = 2;

/// Where the embedding model lives and how to run it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name reported by the service (e.g., `all-MiniLM-L6-v2`).
    pub name: String,
    /// Directory holding `model.onnx` and `tokenizer.json`.
    pub dir: PathBuf,
    /// ONNX Runtime intra-op thread count.
    pub intra_threads: usize,
}

impl ModelConfig {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            name: DEFAULT_MODEL_NAME.to_string(),
            dir: dir.as_ref().to_path_buf(),
            intra_threads: DEFAULT_INTRA_THREADS,
        }
    }
}

/// Top-level apexsearch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// HTTP bind host.
    pub host: String,
    /// HTTP server port.
    pub port: u16,
    /// Embedding model settings.
    pub model: ModelConfig,
    /// Ordered corpus; results are reported by index into this list.
    pub corpus: Vec<String>,
}

impl SearchConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;

        let dir = lookup("APEXSEARCH_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("models").join(DEFAULT_MODEL_NAME));
        let model = ModelConfig {
            name: lookup("APEXSEARCH_MODEL_NAME")
                .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
            dir,
            intra_threads: parse_or(&lookup, "APEXSEARCH_INTRA_THREADS", DEFAULT_INTRA_THREADS)?,
        };

        let corpus = match lookup("APEXSEARCH_CORPUS_FILE") {
            Some(path) => load_corpus(Path::new(&path))?,
            None => default_corpus(),
        };

        Ok(Self {
            host,
            port,
            model,
            corpus,
        })
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The built-in corpus as owned strings.
pub fn default_corpus() -> Vec<String> {
    DEFAULT_CORPUS.iter().map(|s| s.to_string()).collect()
}

/// Load a corpus from a JSON file containing an array of strings.
pub fn load_corpus(path: &Path) -> Result<Vec<String>> {
    let data = std::fs::read_to_string(path)?;
    let corpus: Vec<String> = serde_json::from_str(&data)?;
    tracing::info!("Loaded {} corpus entries from {}", corpus.len(), path.display());
    Ok(corpus)
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} has an invalid value: {:?}", key, raw))),
        None => Ok(default),
    }
}
