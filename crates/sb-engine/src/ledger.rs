//! Achievement and score bookkeeping.

use serde::{Deserialize, Serialize};

/// An achievement triggered by a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// Achievement identifier.
    pub id: String,
    /// Whether the id was absent from the cumulative set before this grant.
    pub first_time: bool,
}

/// Score and achievements for the current session plus cumulative history.
///
/// Session data is cleared by [`Ledger::reset`]. Cumulative data survives
/// resets and is only wiped by [`Ledger::clear_cumulative`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    score: u32,
    best_score: u32,
    playthroughs: u32,
    session: Vec<String>,
    cumulative: Vec<String>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Score of the current session.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Highest session score seen since the last cumulative clear.
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Number of playthroughs started since the last cumulative clear.
    pub fn playthroughs(&self) -> u32 {
        self.playthroughs
    }

    /// Achievements granted this session, in grant order.
    pub fn session_achievements(&self) -> &[String] {
        &self.session
    }

    /// Every achievement ever granted, in first-grant order.
    pub fn cumulative_achievements(&self) -> &[String] {
        &self.cumulative
    }

    /// Whether the achievement is in the cumulative set.
    pub fn has(&self, id: &str) -> bool {
        self.cumulative.iter().any(|a| a == id)
    }

    /// Grant an achievement. Idempotent for both sets; the returned
    /// [`Grant`] is reported either way.
    pub fn grant(&mut self, id: &str) -> Grant {
        if !self.session.iter().any(|a| a == id) {
            self.session.push(id.to_string());
        }
        let first_time = !self.has(id);
        if first_time {
            self.cumulative.push(id.to_string());
        }
        Grant {
            id: id.to_string(),
            first_time,
        }
    }

    /// Add exactly one point to the session score.
    pub fn increment_score(&mut self) -> u32 {
        self.score += 1;
        self.best_score = self.best_score.max(self.score);
        self.score
    }

    /// Count a new playthrough.
    pub fn begin_playthrough(&mut self) {
        self.playthroughs += 1;
    }

    /// Clear session score and achievements. Cumulative history is kept.
    pub fn reset(&mut self) {
        self.score = 0;
        self.session.clear();
    }

    /// Wipe cumulative achievements, best score and playthrough count.
    pub fn clear_cumulative(&mut self) {
        self.cumulative.clear();
        self.best_score = 0;
        self.playthroughs = 0;
    }

    /// Merge previously persisted history into the cumulative data.
    pub fn restore<I>(&mut self, achievements: I, best_score: u32, playthroughs: u32)
    where
        I: IntoIterator<Item = String>,
    {
        for id in achievements {
            if !self.has(&id) {
                self.cumulative.push(id);
            }
        }
        self.best_score = self.best_score.max(best_score);
        self.playthroughs = self.playthroughs.max(playthroughs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_is_idempotent() {
        let mut l = Ledger::new();
        let first = l.grant("Early Bird");
        let second = l.grant("Early Bird");
        assert!(first.first_time);
        assert!(!second.first_time);
        assert_eq!(second.id, "Early Bird");
        assert_eq!(l.session_achievements(), &["Early Bird".to_string()]);
        assert_eq!(l.cumulative_achievements(), &["Early Bird".to_string()]);
    }

    #[test]
    fn grants_keep_insertion_order() {
        let mut l = Ledger::new();
        l.grant("b");
        l.grant("a");
        l.grant("b");
        assert_eq!(l.session_achievements(), &["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn reset_keeps_cumulative() {
        let mut l = Ledger::new();
        l.grant("Nerd");
        l.increment_score();
        l.increment_score();
        l.reset();
        assert_eq!(l.score(), 0);
        assert!(l.session_achievements().is_empty());
        assert!(l.has("Nerd"));
        assert_eq!(l.best_score(), 2);
    }

    #[test]
    fn regrant_after_reset_is_not_first_time() {
        let mut l = Ledger::new();
        l.grant("Nerd");
        l.reset();
        let g = l.grant("Nerd");
        assert!(!g.first_time);
        assert_eq!(l.session_achievements(), &["Nerd".to_string()]);
        assert_eq!(l.cumulative_achievements().len(), 1);
    }

    #[test]
    fn clear_cumulative_is_separate() {
        let mut l = Ledger::new();
        l.begin_playthrough();
        l.grant("Nerd");
        l.increment_score();
        l.clear_cumulative();
        assert!(!l.has("Nerd"));
        assert_eq!(l.best_score(), 0);
        assert_eq!(l.playthroughs(), 0);
        assert_eq!(l.score(), 1);
        assert_eq!(l.session_achievements(), &["Nerd".to_string()]);
    }

    #[test]
    fn best_score_tracks_maximum() {
        let mut l = Ledger::new();
        for _ in 0..3 {
            l.increment_score();
        }
        l.reset();
        l.increment_score();
        assert_eq!(l.score(), 1);
        assert_eq!(l.best_score(), 3);
    }

    #[test]
    fn restore_merges_without_duplicates() {
        let mut l = Ledger::new();
        l.grant("a");
        l.restore(vec!["a".to_string(), "b".to_string()], 5, 2);
        assert_eq!(
            l.cumulative_achievements(),
            &["a".to_string(), "b".to_string()]
        );
        assert_eq!(l.best_score(), 5);
        assert_eq!(l.playthroughs(), 2);
        assert_eq!(l.session_achievements(), &["a".to_string()]);
    }
}
