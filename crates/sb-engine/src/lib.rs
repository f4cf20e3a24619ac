//! Session engine for Schoolbell.
//!
//! Drives a player through a branch's fixed events and then through the
//! shared random pool, resolving weighted outcomes and keeping score and
//! achievements. Content is read from an immutable
//! [`sb_content::ContentStore`]; all mutable progress lives in the
//! [`SessionEngine`] instance that owns it.

pub mod config;
pub mod error;
pub mod ledger;
pub mod outcome;
pub mod pool;
pub mod progress;
pub mod random;
pub mod session;
pub mod state;
pub mod transition;

/// Re-export configuration types.
pub use config::{EngineConfig, Messages};
/// Re-export error types.
pub use error::{EngineError, EngineResult};
/// Re-export ledger types.
pub use ledger::{Grant, Ledger};
/// Re-export the outcome resolver.
pub use outcome::{Resolution, resolve};
/// Re-export random-pool tracking.
pub use pool::RandomPool;
/// Re-export progress and persistence types.
pub use progress::{MemoryStore, Progress, ProgressStore, SavedProgress};
/// Re-export randomness sources.
pub use random::{RandomSource, ScriptedRandom};
/// Re-export the session engine.
pub use session::SessionEngine;
/// Re-export session state types.
pub use state::{PlaythroughId, SessionState, Stage};
/// Re-export transition results.
pub use transition::TransitionResult;
