use serde::{Deserialize, Serialize};

/// One weighted possibility of a probabilistic outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    /// Result text shown when this alternative is picked.
    pub text: String,
    /// Explicit relative weight. `None` falls back to `1/N`.
    pub weight: Option<f64>,
    /// Whether picking this alternative ends the session.
    pub terminal: bool,
}

/// What happens after a choice is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutcomeSpec {
    /// A fixed, non-terminal result text.
    Literal(String),
    /// Exactly one alternative is sampled by relative weight.
    Weighted(Vec<Alternative>),
}

impl OutcomeSpec {
    /// Effective weight of every alternative, in order.
    ///
    /// Alternatives without an explicit weight get `1/N`, where `N` is the
    /// number of alternatives. A literal has no alternatives and yields an
    /// empty list.
    pub fn effective_weights(&self) -> Vec<f64> {
        match self {
            Self::Literal(_) => Vec::new(),
            Self::Weighted(alternatives) => {
                let fallback = 1.0 / alternatives.len() as f64;
                alternatives
                    .iter()
                    .map(|a| a.weight.unwrap_or(fallback))
                    .collect()
            }
        }
    }

    /// Sum of the effective weights.
    pub fn total_weight(&self) -> f64 {
        self.effective_weights().iter().sum()
    }

    /// Whether any alternative can end the session.
    pub fn can_terminate(&self) -> bool {
        match self {
            Self::Literal(_) => false,
            Self::Weighted(alternatives) => alternatives.iter().any(|a| a.terminal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alt(text: &str, weight: Option<f64>, terminal: bool) -> Alternative {
        Alternative {
            text: text.to_string(),
            weight,
            terminal,
        }
    }

    #[test]
    fn missing_weights_fall_back_to_uniform() {
        let spec = OutcomeSpec::Weighted(vec![
            alt("a", None, false),
            alt("b", Some(0.5), false),
            alt("c", None, true),
            alt("d", None, false),
        ]);
        assert_eq!(spec.effective_weights(), vec![0.25, 0.5, 0.25, 0.25]);
        assert!((spec.total_weight() - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn literal_has_no_weights() {
        let spec = OutcomeSpec::Literal("fine".to_string());
        assert!(spec.effective_weights().is_empty());
        assert_eq!(spec.total_weight(), 0.0);
        assert!(!spec.can_terminate());
    }

    #[test]
    fn empty_list_has_zero_total() {
        let spec = OutcomeSpec::Weighted(Vec::new());
        assert_eq!(spec.total_weight(), 0.0);
    }

    #[test]
    fn terminal_alternative_detected() {
        let spec = OutcomeSpec::Weighted(vec![alt("a", None, false), alt("b", None, true)]);
        assert!(spec.can_terminate());
    }
}
