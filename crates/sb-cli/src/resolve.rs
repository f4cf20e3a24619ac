//! Matching player input against offered choices.

use sb_content::Choice;
use strsim::jaro_winkler;

/// Minimum similarity score for fuzzy label matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// Resolve typed input to a choice key.
///
/// Accepts the key itself, the exact label (case-insensitive), or a label
/// close enough by Jaro-Winkler similarity.
pub fn resolve_choice(input: &str, choices: &[Choice]) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(choice) = choices.iter().find(|c| c.key == input) {
        return Some(choice.key.clone());
    }

    let input_lower = input.to_lowercase();
    if let Some(choice) = choices.iter().find(|c| c.label.to_lowercase() == input_lower) {
        return Some(choice.key.clone());
    }

    choices
        .iter()
        .map(|c| (c, jaro_winkler(&input_lower, &c.label.to_lowercase())))
        .filter(|(_, score)| *score >= FUZZY_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(c, _)| c.key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices() -> Vec<Choice> {
        vec![
            Choice {
                key: "1".to_string(),
                label: "Get up".to_string(),
            },
            Choice {
                key: "2".to_string(),
                label: "Sleep in".to_string(),
            },
        ]
    }

    #[test]
    fn key_match() {
        assert_eq!(resolve_choice(" 2 ", &choices()), Some("2".to_string()));
    }

    #[test]
    fn exact_label_case_insensitive() {
        assert_eq!(resolve_choice("SLEEP IN", &choices()), Some("2".to_string()));
    }

    #[test]
    fn fuzzy_label() {
        assert_eq!(resolve_choice("get upp", &choices()), Some("1".to_string()));
    }

    #[test]
    fn no_match() {
        assert_eq!(resolve_choice("dance", &choices()), None);
        assert_eq!(resolve_choice("", &choices()), None);
        assert_eq!(resolve_choice("3", &choices()), None);
    }
}
