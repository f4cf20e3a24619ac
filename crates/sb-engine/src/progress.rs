//! Progress reporting and the persistence seam.
//!
//! The engine never touches storage itself. Callers move cumulative history
//! in and out through [`SavedProgress`] and a [`ProgressStore`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

/// Score and achievements as seen by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Score of the current session.
    pub score: u32,
    /// Best session score across sessions.
    pub best_score: u32,
    /// Achievements granted this session.
    pub session_achievements: Vec<String>,
    /// Every achievement ever granted.
    pub achievements: Vec<String>,
}

/// Cumulative history as persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProgress {
    /// Every achievement ever granted, in first-grant order.
    #[serde(default)]
    pub achievements: Vec<String>,
    /// Best session score.
    #[serde(default)]
    pub best_score: u32,
    /// Number of playthroughs started.
    #[serde(default)]
    pub playthroughs: u32,
    /// When the record was produced.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Somewhere cumulative progress can be kept.
pub trait ProgressStore {
    /// Load the saved record, or an empty one if nothing was saved.
    fn load(&self) -> EngineResult<SavedProgress>;

    /// Replace the saved record.
    fn save(&mut self, progress: &SavedProgress) -> EngineResult<()>;

    /// Delete the saved record.
    fn clear(&mut self) -> EngineResult<()>;
}

/// A [`ProgressStore`] that lives in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Option<SavedProgress>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether anything has been saved.
    pub fn is_empty(&self) -> bool {
        self.saved.is_none()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> EngineResult<SavedProgress> {
        Ok(self.saved.clone().unwrap_or_default())
    }

    fn save(&mut self, progress: &SavedProgress) -> EngineResult<()> {
        self.saved = Some(progress.clone());
        Ok(())
    }

    fn clear(&mut self) -> EngineResult<()> {
        self.saved = None;
        Ok(())
    }
}
