//! Content model for Schoolbell: branches, events, outcomes, and the random pool.
//!
//! A content document is authored as JSON and loaded once into an immutable
//! [`ContentStore`]. Outcome shapes are decided at load time, so the engine
//! never has to inspect raw JSON while a session is running.

/// Branch identifiers and per-branch fixed event sequences.
pub mod branch;
mod document;
/// Error types for loading content.
pub mod error;
/// Events and their choices.
pub mod event;
/// Outcome specifications attached to choices.
pub mod outcome;
/// The loaded, read-only content store.
pub mod store;
/// Content validation for authoring tools.
pub mod validate;

/// Re-export branch types.
pub use branch::{Branch, BranchId, FixedOrder};
/// Re-export error types.
pub use error::{ContentError, ContentResult};
/// Re-export event and choice types.
pub use event::{Choice, Event, EventRef};
/// Re-export outcome types.
pub use outcome::{Alternative, OutcomeSpec};
/// Re-export the content store.
pub use store::ContentStore;
/// Re-export validation issues.
pub use validate::ContentIssue;
