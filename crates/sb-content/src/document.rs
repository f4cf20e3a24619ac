//! Serde mirror of the authored JSON document.
//!
//! These types follow the file layout exactly and are converted into the
//! typed model by [`crate::store::ContentStore`].

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::branch::FixedOrder;
use crate::error::{ContentError, ContentResult};
use crate::event::{Choice, Event, EventRef, compare_choice_keys};
use crate::outcome::{Alternative, OutcomeSpec};

#[derive(Debug, Deserialize)]
pub(crate) struct Document {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub events: Events,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Metadata {
    #[serde(default)]
    pub start_options: Vec<String>,
    pub title: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub fixed_order: BTreeMap<String, FixedOrder>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Events {
    #[serde(default)]
    pub fixed_events: BTreeMap<String, Vec<RawEvent>>,
    #[serde(default)]
    pub random_events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawEvent {
    question: String,
    #[serde(default)]
    choices: BTreeMap<String, String>,
    #[serde(default)]
    results: BTreeMap<String, RawOutcome>,
    #[serde(default)]
    achievements: BTreeMap<String, String>,
    #[serde(default)]
    end_game_choices: Vec<String>,
    #[serde(default)]
    contributors: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawOutcome {
    Literal(String),
    Weighted(Vec<RawAlternative>),
}

#[derive(Debug, Deserialize)]
struct RawAlternative {
    rd_result: Option<String>,
    text: Option<String>,
    prob: Option<f64>,
    #[serde(default)]
    end_game: bool,
}

impl RawEvent {
    pub fn into_event(self, at: EventRef) -> ContentResult<Event> {
        let mut choices: Vec<Choice> = self
            .choices
            .into_iter()
            .map(|(key, label)| Choice { key, label })
            .collect();
        choices.sort_by(|a, b| compare_choice_keys(&a.key, &b.key));

        let outcomes = self
            .results
            .into_iter()
            .map(|(key, raw)| {
                let spec = raw.into_spec(at, &key)?;
                Ok((key, spec))
            })
            .collect::<ContentResult<_>>()?;

        Ok(Event {
            prompt: self.question,
            attribution: self.contributors,
            choices,
            outcomes,
            achievement_grants: self.achievements,
            forced_terminal_choices: self.end_game_choices.into_iter().collect(),
        })
    }
}

impl RawOutcome {
    fn into_spec(self, at: EventRef, key: &str) -> ContentResult<OutcomeSpec> {
        match self {
            Self::Literal(text) => Ok(OutcomeSpec::Literal(text)),
            Self::Weighted(items) => items
                .into_iter()
                .map(|item| {
                    match item.prob {
                        Some(weight) if !weight.is_finite() || weight < 0.0 => {
                            return Err(ContentError::InvalidWeight {
                                event: at,
                                key: key.to_string(),
                                weight,
                            });
                        }
                        _ => {}
                    }
                    Ok(Alternative {
                        text: item.rd_result.or(item.text).unwrap_or_default(),
                        weight: item.prob,
                        terminal: item.end_game,
                    })
                })
                .collect::<ContentResult<Vec<_>>>()
                .map(OutcomeSpec::Weighted),
        }
    }
}
