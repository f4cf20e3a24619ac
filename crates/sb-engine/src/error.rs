//! Error types for the session engine.

use sb_content::EventRef;
use thiserror::Error;

use crate::state::Stage;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while driving a session.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested branch is not declared, has no fixed events, or no
    /// content is loaded. The session is terminated.
    #[error("{apology} (branch \"{key}\")")]
    UnknownBranch {
        /// The start key that was requested.
        key: String,
        /// Player-facing apology text.
        apology: String,
    },

    /// The choice key is not declared by the current event.
    #[error("invalid choice \"{key}\" for {event}")]
    InvalidChoice {
        /// The rejected key.
        key: String,
        /// The event awaiting an answer.
        event: EventRef,
    },

    /// Content is malformed in a way that only shows up during play.
    #[error("invalid content: {0}")]
    InvalidContent(String),

    /// The operation is not accepted in the current stage.
    #[error("cannot {operation} while {stage}")]
    InvalidState {
        /// Stage the session was in.
        stage: Stage,
        /// The rejected operation.
        operation: &'static str,
    },

    /// The progress store failed to load or save.
    #[error("progress store: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}
