//! What each engine call returns to the presentation layer.

use sb_content::Choice;
use serde::Serialize;

use crate::ledger::Grant;

/// Result of `start` or `advance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionResult {
    /// Text to show: the prior outcome (if any) followed by the next prompt
    /// or the terminal suffix, separated by a newline.
    pub message: String,
    /// Choices of the next prompt. `None` when the result is terminal.
    pub choices: Option<Vec<Choice>>,
    /// Whether the session ended with this step.
    pub terminal: bool,
    /// Achievements triggered by this step, reported even if already held.
    pub newly_granted: Vec<String>,
    /// The subset of `newly_granted` never held before.
    pub first_unlocks: Vec<String>,
}

impl TransitionResult {
    /// A result that asks the player for another choice.
    pub(crate) fn prompt(
        prefix: &str,
        prompt: &str,
        choices: Vec<Choice>,
        grants: Vec<Grant>,
    ) -> Self {
        Self::build(join(prefix, prompt), Some(choices), false, grants)
    }

    /// A result that ends the session.
    pub(crate) fn terminal(prefix: &str, suffix: &str, grants: Vec<Grant>) -> Self {
        Self::build(join(prefix, suffix), None, true, grants)
    }

    fn build(
        message: String,
        choices: Option<Vec<Choice>>,
        terminal: bool,
        grants: Vec<Grant>,
    ) -> Self {
        let first_unlocks = grants
            .iter()
            .filter(|g| g.first_time)
            .map(|g| g.id.clone())
            .collect();
        Self {
            message,
            choices,
            terminal,
            newly_granted: grants.into_iter().map(|g| g.id).collect(),
            first_unlocks,
        }
    }

    /// Choice keys offered by this result.
    pub fn choice_keys(&self) -> Vec<&str> {
        self.choices
            .iter()
            .flatten()
            .map(|c| c.key.as_str())
            .collect()
    }
}

fn join(prefix: &str, text: &str) -> String {
    if prefix.is_empty() {
        text.to_string()
    } else {
        format!("{prefix}\n{text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(key: &str) -> Choice {
        Choice {
            key: key.to_string(),
            label: format!("option {key}"),
        }
    }

    #[test]
    fn empty_prefix_is_skipped() {
        let r = TransitionResult::prompt("", "Next?", vec![choice("1")], Vec::new());
        assert_eq!(r.message, "Next?");
        assert_eq!(r.choice_keys(), vec!["1"]);
        assert!(!r.terminal);
    }

    #[test]
    fn terminal_joins_suffix() {
        let grants = vec![
            Grant {
                id: "Old".to_string(),
                first_time: false,
            },
            Grant {
                id: "New".to_string(),
                first_time: true,
            },
        ];
        let r =
            TransitionResult::terminal("You fell asleep.", "You failed. Game over!", grants);
        insta::assert_snapshot!(r.message, @r"
        You fell asleep.
        You failed. Game over!
        ");
        assert!(r.terminal);
        assert_eq!(r.choices, None);
        assert_eq!(r.newly_granted, vec!["Old".to_string(), "New".to_string()]);
        assert_eq!(r.first_unlocks, vec!["New".to_string()]);
    }
}
