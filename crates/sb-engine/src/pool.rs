//! Random-pool exhaustion tracking.

use std::collections::BTreeSet;

use crate::random::RandomSource;

/// Which random-pool events a session has drawn and answered.
///
/// A drawn index becomes *pending* and is only marked consumed once the
/// player has answered it, so an unanswered draw can be replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RandomPool {
    size: usize,
    consumed: BTreeSet<usize>,
    pending: Option<usize>,
}

impl RandomPool {
    /// Track a pool of `size` events.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            consumed: BTreeSet::new(),
            pending: None,
        }
    }

    /// Number of events in the pool.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Index awaiting the player's answer.
    pub fn pending(&self) -> Option<usize> {
        self.pending
    }

    /// Indices answered this session.
    pub fn consumed(&self) -> &BTreeSet<usize> {
        &self.consumed
    }

    /// Indices not yet consumed, ascending.
    pub fn remaining(&self) -> Vec<usize> {
        (0..self.size)
            .filter(|i| !self.consumed.contains(i))
            .collect()
    }

    /// Whether every event has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.consumed.len() >= self.size
    }

    /// Draw an unconsumed index uniformly and make it pending.
    ///
    /// Returns `None` and clears the pending slot when the pool is exhausted.
    pub fn draw<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        let remaining = self.remaining();
        if remaining.is_empty() {
            self.pending = None;
            return None;
        }
        let index = remaining[rng.index(remaining.len())];
        self.pending = Some(index);
        Some(index)
    }

    /// Mark the pending index as consumed and clear it.
    pub fn consume_pending(&mut self) -> Option<usize> {
        let index = self.pending.take()?;
        self.consumed.insert(index);
        Some(index)
    }

    /// Drop the pending index without consuming it.
    pub fn clear_pending(&mut self) {
        self.pending = None;
    }
}
