//! Error types for loading content.

use std::path::PathBuf;

use thiserror::Error;

use crate::event::EventRef;

/// Result type for content operations.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors that can occur while loading a content document.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The content file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not match the schema.
    #[error("malformed content document: {0}")]
    Json(#[from] serde_json::Error),

    /// A weighted alternative carries a negative or non-finite weight.
    #[error("invalid weight {weight} for choice \"{key}\" in {event}")]
    InvalidWeight {
        /// Event holding the outcome.
        event: EventRef,
        /// Choice key of the outcome.
        key: String,
        /// The rejected weight.
        weight: f64,
    },
}
