//! Outcome resolution.
//!
//! Turns an [`OutcomeSpec`] into result text and a terminal flag. Weighted
//! outcomes are sampled by drawing `u * total` and scanning alternatives in
//! order with an ascending running sum; the first alternative whose
//! cumulative weight exceeds the draw wins.

use sb_content::OutcomeSpec;

use crate::error::{EngineError, EngineResult};
use crate::random::RandomSource;

/// The resolved result of a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Result text to show the player.
    pub text: String,
    /// Whether the outcome ends the session.
    pub terminal: bool,
}

/// Resolve an outcome spec, consuming one unit draw for weighted specs.
pub fn resolve<R: RandomSource + ?Sized>(
    spec: &OutcomeSpec,
    rng: &mut R,
) -> EngineResult<Resolution> {
    let alternatives = match spec {
        OutcomeSpec::Literal(text) => {
            return Ok(Resolution {
                text: text.clone(),
                terminal: false,
            });
        }
        OutcomeSpec::Weighted(alternatives) => alternatives,
    };

    if alternatives.is_empty() {
        return Err(EngineError::InvalidContent(
            "weighted outcome has no alternatives".to_string(),
        ));
    }

    let weights = spec.effective_weights();
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(EngineError::InvalidContent(format!(
            "weighted outcome has total weight {total}"
        )));
    }

    let draw = rng.unit() * total;
    let chosen = &alternatives[pick_weighted(&weights, draw)];
    Ok(Resolution {
        text: chosen.text.clone(),
        terminal: chosen.terminal,
    })
}

/// Index of the first weight whose cumulative sum exceeds `draw`.
///
/// Falls back to the last index when rounding leaves the draw uncovered.
fn pick_weighted(weights: &[f64], draw: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if draw < cumulative {
            return i;
        }
    }
    weights.len().saturating_sub(1)
}
