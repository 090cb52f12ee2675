//! Error types for the BEL enrichment library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for enrichment operations.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Graph cache could not be encoded or decoded.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The statement retrieval service failed.
    #[error("Retrieval error: {0}")]
    Http(String),

    /// Empty file or no data to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A curation sheet lacks a column the template requires.
    #[error("'{path}' is missing the \"{column}\" column")]
    MissingColumn { path: PathBuf, column: String },

    /// A curated row has neither a citation reference nor a PMID.
    #[error("Missing citation reference on line {line}")]
    MissingReference { line: usize },

    /// Unknown edge type filter name.
    #[error("Not a valid edge type filter: {0}")]
    InvalidEdgeTypeFilter(String),
}

impl EnrichmentError {
    /// Wrap an IO error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EnrichmentError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for enrichment operations.
pub type Result<T> = std::result::Result<T, EnrichmentError>;
