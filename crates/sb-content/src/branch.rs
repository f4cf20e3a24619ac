use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Prefix of the fixed-event group keys in a content document.
pub const GROUP_PREFIX: &str = "group_";

/// 1-based identifier of a branch, matching its position in the start options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BranchId(u32);

impl BranchId {
    /// Create a branch id. Returns `None` for 0, since branch ids are 1-based.
    pub fn new(number: u32) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    /// Parse a start-option key such as `"2"`.
    pub fn parse(key: &str) -> Option<Self> {
        key.trim().parse::<u32>().ok().and_then(Self::new)
    }

    /// Parse a fixed-event group key such as `"group_2"`.
    pub fn from_group_key(key: &str) -> Option<Self> {
        key.strip_prefix(GROUP_PREFIX).and_then(Self::parse)
    }

    /// The 1-based branch number.
    pub fn number(self) -> u32 {
        self.0
    }

    /// Zero-based position in the start options.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// The group key this branch's fixed events are stored under.
    pub fn group_key(self) -> String {
        format!("{GROUP_PREFIX}{}", self.0)
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a branch's fixed events are traversed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedOrder {
    /// Strict index order.
    #[default]
    Ordered,
    /// Uniformly at random without replacement, fixed once per playthrough.
    Shuffled,
}

impl fmt::Display for FixedOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordered => write!(f, "ordered"),
            Self::Shuffled => write!(f, "shuffled"),
        }
    }
}

/// A start option together with its fixed event sequence.
#[derive(Debug, Clone)]
pub struct Branch {
    /// Branch identifier.
    pub id: BranchId,
    /// Start-option label shown to the player.
    pub label: String,
    /// Fixed events, possibly empty if the document has no matching group.
    pub events: Vec<Event>,
    /// Traversal policy for `events`.
    pub order: FixedOrder,
}

impl Branch {
    /// Number of fixed events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the branch has no fixed events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Fixed event at a sequence position.
    pub fn event(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_start_key() {
        assert_eq!(BranchId::parse("3").map(BranchId::number), Some(3));
        assert_eq!(BranchId::parse(" 1 ").map(BranchId::number), Some(1));
        assert!(BranchId::parse("0").is_none());
        assert!(BranchId::parse("-1").is_none());
        assert!(BranchId::parse("one").is_none());
    }

    #[test]
    fn group_key_round_trip() {
        let id = BranchId::new(2).unwrap();
        assert_eq!(id.group_key(), "group_2");
        assert_eq!(BranchId::from_group_key("group_2"), Some(id));
        assert!(BranchId::from_group_key("group_x").is_none());
        assert!(BranchId::from_group_key("2").is_none());
    }

    #[test]
    fn index_is_zero_based() {
        assert_eq!(BranchId::new(1).unwrap().index(), 0);
        assert_eq!(BranchId::new(4).unwrap().index(), 3);
    }

    #[test]
    fn fixed_order_deserializes_snake_case() {
        let order: FixedOrder = serde_json::from_str("\"shuffled\"").unwrap();
        assert_eq!(order, FixedOrder::Shuffled);
        assert_eq!(FixedOrder::default(), FixedOrder::Ordered);
    }
}
