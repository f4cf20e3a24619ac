use std::fmt;

use crate::branch::BranchId;
use crate::event::{Event, EventRef};
use crate::outcome::OutcomeSpec;
use crate::store::ContentStore;

/// A problem found in loaded content.
///
/// Issues never stop a load. They describe content that will fail, or behave
/// surprisingly, once a session reaches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIssue {
    /// The document declares no start options.
    NoStartOptions,
    /// A start option has no fixed events.
    EmptyBranch {
        /// The branch.
        branch: BranchId,
        /// Its start-option label.
        label: String,
    },
    /// A fixed-event group matches no start option.
    OrphanGroup {
        /// The group key.
        group: String,
    },
    /// A `fixed_order` entry matches no start option.
    UnusedOrderPolicy {
        /// The group key.
        group: String,
    },
    /// An event offers no choices, so a player reaching it is stuck.
    NoChoices {
        /// The event.
        event: EventRef,
    },
    /// A declared choice has no outcome.
    MissingOutcome {
        /// The event.
        event: EventRef,
        /// The choice key.
        key: String,
    },
    /// An outcome is mapped to a key that is not a declared choice.
    UndeclaredOutcome {
        /// The event.
        event: EventRef,
        /// The choice key.
        key: String,
    },
    /// A weighted outcome has no alternatives.
    EmptyWeightedList {
        /// The event.
        event: EventRef,
        /// The choice key.
        key: String,
    },
    /// A weighted outcome's weights add up to zero.
    ZeroTotalWeight {
        /// The event.
        event: EventRef,
        /// The choice key.
        key: String,
    },
    /// An achievement is granted by a key that is not a declared choice.
    UndeclaredAchievementChoice {
        /// The event.
        event: EventRef,
        /// The choice key.
        key: String,
    },
    /// A forced terminal key is not a declared choice.
    UndeclaredTerminalChoice {
        /// The event.
        event: EventRef,
        /// The choice key.
        key: String,
    },
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoStartOptions => write!(f, "no start options declared"),
            Self::EmptyBranch { branch, label } => {
                write!(f, "start option {branch} (\"{label}\") has no fixed events")
            }
            Self::OrphanGroup { group } => write!(f, "{group} matches no start option"),
            Self::UnusedOrderPolicy { group } => {
                write!(f, "fixed_order entry {group} matches no start option")
            }
            Self::NoChoices { event } => write!(f, "{event}: no choices declared"),
            Self::MissingOutcome { event, key } => {
                write!(f, "{event}: choice \"{key}\" has no result")
            }
            Self::UndeclaredOutcome { event, key } => {
                write!(f, "{event}: result for undeclared choice \"{key}\"")
            }
            Self::EmptyWeightedList { event, key } => {
                write!(f, "{event}: choice \"{key}\" has an empty result list")
            }
            Self::ZeroTotalWeight { event, key } => {
                write!(f, "{event}: choice \"{key}\" has a total weight of zero")
            }
            Self::UndeclaredAchievementChoice { event, key } => {
                write!(f, "{event}: achievement for undeclared choice \"{key}\"")
            }
            Self::UndeclaredTerminalChoice { event, key } => {
                write!(f, "{event}: end_game_choices lists undeclared choice \"{key}\"")
            }
        }
    }
}

impl ContentStore {
    /// Check the whole store and list every issue found.
    pub fn validate(&self) -> Vec<ContentIssue> {
        let mut issues = Vec::new();

        if self.branches().is_empty() {
            issues.push(ContentIssue::NoStartOptions);
        }

        for branch in self.branches() {
            if branch.is_empty() {
                issues.push(ContentIssue::EmptyBranch {
                    branch: branch.id,
                    label: branch.label.clone(),
                });
            }
            for (index, event) in branch.events.iter().enumerate() {
                check_event(
                    EventRef::Fixed {
                        branch: branch.id,
                        index,
                    },
                    event,
                    &mut issues,
                );
            }
        }

        for group in self.orphan_groups() {
            issues.push(ContentIssue::OrphanGroup {
                group: group.clone(),
            });
        }
        for group in self.unused_order_keys() {
            issues.push(ContentIssue::UnusedOrderPolicy {
                group: group.clone(),
            });
        }

        for (index, event) in self.random_pool().iter().enumerate() {
            check_event(EventRef::Random { index }, event, &mut issues);
        }

        for issue in &issues {
            log::warn!("content issue: {issue}");
        }
        issues
    }
}

fn check_event(at: EventRef, event: &Event, issues: &mut Vec<ContentIssue>) {
    if event.choices.is_empty() {
        issues.push(ContentIssue::NoChoices { event: at });
    }

    for choice in &event.choices {
        match event.outcome(&choice.key) {
            None => issues.push(ContentIssue::MissingOutcome {
                event: at,
                key: choice.key.clone(),
            }),
            Some(OutcomeSpec::Weighted(alternatives)) if alternatives.is_empty() => {
                issues.push(ContentIssue::EmptyWeightedList {
                    event: at,
                    key: choice.key.clone(),
                });
            }
            Some(spec)
                if matches!(spec, OutcomeSpec::Weighted(_)) && spec.total_weight() <= 0.0 =>
            {
                issues.push(ContentIssue::ZeroTotalWeight {
                    event: at,
                    key: choice.key.clone(),
                });
            }
            Some(_) => {}
        }
    }

    for key in event.outcomes.keys() {
        if !event.has_choice(key) {
            issues.push(ContentIssue::UndeclaredOutcome {
                event: at,
                key: key.clone(),
            });
        }
    }
    for key in event.achievement_grants.keys() {
        if !event.has_choice(key) {
            issues.push(ContentIssue::UndeclaredAchievementChoice {
                event: at,
                key: key.clone(),
            });
        }
    }
    for key in &event.forced_terminal_choices {
        if !event.has_choice(key) {
            issues.push(ContentIssue::UndeclaredTerminalChoice {
                event: at,
                key: key.clone(),
            });
        }
    }
}
