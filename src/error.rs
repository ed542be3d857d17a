// Error types for the commit view.
// Covers report retrieval, record parsing, registry lookups, and configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Report record not found: {0}")]
    NotFound(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown repository: {0}")]
    UnknownRepo(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ViewError>;
