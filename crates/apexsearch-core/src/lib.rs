//! apexsearch Core — error taxonomy and configuration shared by every crate.

pub mod config;
pub mod error;

pub use config::{default_corpus, load_corpus, ModelConfig, SearchConfig, DEFAULT_CORPUS};
pub use error::{Error, Result};
