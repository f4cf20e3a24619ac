use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::branch::BranchId;
use crate::outcome::OutcomeSpec;

/// A selectable option of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Token the player sends to pick this option, e.g. `"1"`.
    pub key: String,
    /// Text shown for the option.
    pub label: String,
}

/// A content node: a prompt, its choices, and what each choice leads to.
#[derive(Debug, Clone, Default)]
pub struct Event {
    /// Situation text.
    pub prompt: String,
    /// Contributor names, shown after the prompt.
    pub attribution: Vec<String>,
    /// Choices in presentation order.
    pub choices: Vec<Choice>,
    /// Outcome per choice key.
    pub outcomes: BTreeMap<String, OutcomeSpec>,
    /// Achievement granted per choice key.
    pub achievement_grants: BTreeMap<String, String>,
    /// Choice keys that end the session whatever the outcome says.
    pub forced_terminal_choices: BTreeSet<String>,
}

impl Event {
    /// Look up a declared choice.
    pub fn choice(&self, key: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.key == key)
    }

    /// Whether `key` is one of the declared choices.
    pub fn has_choice(&self, key: &str) -> bool {
        self.choice(key).is_some()
    }

    /// The outcome mapped to a choice key.
    pub fn outcome(&self, key: &str) -> Option<&OutcomeSpec> {
        self.outcomes.get(key)
    }

    /// The achievement granted by a choice key, if any.
    pub fn achievement_for(&self, key: &str) -> Option<&str> {
        self.achievement_grants.get(key).map(String::as_str)
    }

    /// Whether the choice always ends the session.
    pub fn forces_terminal(&self, key: &str) -> bool {
        self.forced_terminal_choices.contains(key)
    }

    /// The prompt with its contributor credit appended.
    pub fn display_prompt(&self) -> String {
        if self.attribution.is_empty() {
            self.prompt.clone()
        } else {
            format!(
                "{} (contributors: {})",
                self.prompt,
                self.attribution.join(", ")
            )
        }
    }
}

/// Where an event lives in the content document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventRef {
    /// A fixed event of a branch.
    Fixed {
        /// Owning branch.
        branch: BranchId,
        /// Position in the branch's fixed sequence.
        index: usize,
    },
    /// An event of the shared random pool.
    Random {
        /// Position in the pool.
        index: usize,
    },
}

impl fmt::Display for EventRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed { branch, index } => write!(f, "{}[{index}]", branch.group_key()),
            Self::Random { index } => write!(f, "random_events[{index}]"),
        }
    }
}

/// Order choice keys naturally: numeric keys by value first, then the rest lexically.
pub fn compare_choice_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
