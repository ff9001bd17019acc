use std::path::PathBuf;

use thiserror::Error;

/// Errors from the I/O edges of the crate. Parsing itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid transcript: {0}")]
    Transcript(#[source] serde_json::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
