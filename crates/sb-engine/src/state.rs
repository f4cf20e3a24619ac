//! Session state and stages.

use std::fmt;

use sb_content::BranchId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pool::RandomPool;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// No branch chosen yet.
    #[default]
    AwaitingStart,
    /// Walking the branch's fixed events.
    Fixed,
    /// Drawing events from the shared random pool.
    Random,
    /// The session has ended. Only `start` is accepted.
    Terminated,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AwaitingStart => "awaiting start",
            Self::Fixed => "in the fixed phase",
            Self::Random => "in the random phase",
            Self::Terminated => "terminated",
        })
    }
}

/// Identifier minted for each started playthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaythroughId(Uuid);

impl PlaythroughId {
    /// Mint a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PlaythroughId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlaythroughId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full = self.0.simple().to_string();
        f.write_str(&full[..8])
    }
}

/// Mutable position of one player in the content.
///
/// `fixed_order` is the permutation of the branch's fixed events fixed at
/// start (the identity for ordered branches). `fixed_cursor` indexes it and
/// never exceeds its length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) playthrough: Option<PlaythroughId>,
    pub(crate) branch: Option<BranchId>,
    pub(crate) stage: Stage,
    pub(crate) fixed_order: Vec<usize>,
    pub(crate) fixed_cursor: usize,
    pub(crate) pool: RandomPool,
}

impl SessionState {
    /// A session waiting for its first `start`.
    pub fn awaiting() -> Self {
        Self {
            playthrough: None,
            branch: None,
            stage: Stage::AwaitingStart,
            fixed_order: Vec::new(),
            fixed_cursor: 0,
            pool: RandomPool::default(),
        }
    }

    /// A fresh terminated session with no branch.
    pub(crate) fn terminated() -> Self {
        Self {
            stage: Stage::Terminated,
            ..Self::awaiting()
        }
    }

    /// A fresh session on `branch`, positioned before its first fixed event.
    pub(crate) fn for_branch(
        branch: BranchId,
        fixed_order: Vec<usize>,
        pool_size: usize,
    ) -> Self {
        Self {
            playthrough: Some(PlaythroughId::new()),
            branch: Some(branch),
            stage: Stage::Fixed,
            fixed_order,
            fixed_cursor: 0,
            pool: RandomPool::new(pool_size),
        }
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The chosen branch.
    pub fn branch(&self) -> Option<BranchId> {
        self.branch
    }

    /// Id of the running playthrough.
    pub fn playthrough(&self) -> Option<PlaythroughId> {
        self.playthrough
    }

    /// Number of fixed events answered so far.
    pub fn fixed_cursor(&self) -> usize {
        self.fixed_cursor
    }

    /// Length of the branch's fixed sequence.
    pub fn fixed_len(&self) -> usize {
        self.fixed_order.len()
    }

    /// Order in which the branch's fixed events are visited.
    pub fn fixed_order(&self) -> &[usize] {
        &self.fixed_order
    }

    /// Branch index of the fixed event at the cursor.
    pub(crate) fn current_fixed(&self) -> Option<usize> {
        self.fixed_order.get(self.fixed_cursor).copied()
    }

    /// Random-pool indices answered this session.
    pub fn consumed_random_indices(&self) -> Vec<usize> {
        self.pool.consumed().iter().copied().collect()
    }

    /// Random-pool index awaiting an answer.
    pub fn pending_random_index(&self) -> Option<usize> {
        self.pool.pending()
    }

    /// Whether the session has ended.
    pub fn is_terminated(&self) -> bool {
        self.stage == Stage::Terminated
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::awaiting()
    }
}
