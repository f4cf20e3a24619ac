//! Integration tests (properties).
use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use sb_content::ContentStore;
use sb_engine::{EngineConfig, Ledger, SessionEngine, Stage};
use serde_json::{Value, json};

fn risky_event(question: &str) -> Value {
    json!({
        "question": question,
        "choices": { "1": "Play safe", "2": "Gamble" },
        "results": {
            "1": "Fine.",
            "2": [
                { "text": "Lucky.", "prob": 3 },
                { "text": "Busted.", "prob": 1, "end_game": true }
            ]
        },
        "achievements": { "2": "Gambler" }
    })
}

fn content(pool: usize) -> Arc<ContentStore> {
    let random: Vec<Value> = (0..pool).map(|i| risky_event(&format!("random {i}"))).collect();
    let store = ContentStore::from_value(json!({
        "metadata": { "start_options": ["Only"] },
        "events": {
            "fixed_events": { "group_1": [risky_event("fixed 0"), risky_event("fixed 1")] },
            "random_events": random
        }
    }))
    .unwrap();
    Arc::new(store)
}

proptest! {
    #[test]
    fn score_rises_by_one_per_non_terminal_advance(
        seed in 0_u64..5_000,
        pool in 0_usize..6,
        picks in prop::collection::vec(prop::bool::ANY, 0..16),
    ) {
        let mut e = SessionEngine::new(content(pool), EngineConfig::default().with_seed(seed));
        e.start("1").unwrap();
        let mut previous = e.progress().score;

        for gamble in picks {
            if e.state().stage() == Stage::Terminated {
                break;
            }
            let r = e.advance(Some(if gamble { "2" } else { "1" })).unwrap();
            let score = e.progress().score;
            prop_assert!(score >= previous);
            let resolved_terminal =
                r.terminal && !r.message.ends_with("All events completed. Game over!");
            if resolved_terminal {
                prop_assert_eq!(score, previous);
            } else {
                prop_assert_eq!(score, previous + 1);
            }
            previous = score;
        }
    }

    #[test]
    fn random_pool_never_repeats(seed in 0_u64..5_000, pool in 1_usize..12) {
        let mut e = SessionEngine::new(content(pool), EngineConfig::default().with_seed(seed));
        e.start("1").unwrap();
        e.advance(Some("1")).unwrap();
        e.advance(Some("1")).unwrap();

        let mut drawn = Vec::new();
        while e.state().stage() == Stage::Random {
            let pending = e.state().pending_random_index();
            prop_assert!(pending.is_some());
            let index = pending.unwrap_or_default();
            prop_assert!(!drawn.contains(&index));
            drawn.push(index);
            e.advance(Some("1")).unwrap();
        }

        prop_assert_eq!(drawn.len(), pool);
        let consumed: BTreeSet<usize> = e.state().consumed_random_indices().into_iter().collect();
        prop_assert_eq!(consumed, (0..pool).collect::<BTreeSet<_>>());
    }

    #[test]
    fn grants_never_duplicate(ids in prop::collection::vec("[a-d]", 0..32), resets in 0_usize..4) {
        let mut ledger = Ledger::new();
        for (i, id) in ids.iter().enumerate() {
            if resets > 0 && i % (resets + 1) == 0 {
                ledger.reset();
            }
            let grant = ledger.grant(id);
            prop_assert_eq!(&grant.id, id);
        }
        let cumulative = ledger.cumulative_achievements();
        let unique: BTreeSet<&String> = cumulative.iter().collect();
        prop_assert_eq!(unique.len(), cumulative.len());
        let expected: BTreeSet<&String> = ids.iter().collect();
        prop_assert_eq!(unique, expected);
    }
}
