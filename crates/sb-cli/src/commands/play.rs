//! Interactive play loop.

use std::collections::BTreeSet;
use std::io::{self, BufRead};
use std::path::Path;
use std::sync::Arc;

use colored::Colorize;

use sb_content::{Choice, ContentStore};
use sb_engine::{EngineConfig, ProgressStore, SessionEngine, TransitionResult};

use super::Input;
use crate::resolve::resolve_choice;
use crate::store::JsonFileStore;

/// What to do after a playthrough.
enum Flow {
    Menu,
    Exit,
}

pub fn run(content_path: &Path, seed: Option<u64>, progress_path: &Path) -> Result<(), String> {
    let content = super::load_content(content_path)?;
    let seed = seed.unwrap_or_else(rand::random);
    let mut store = JsonFileStore::new(progress_path);
    let stdin = io::stdin();
    run_with(
        content,
        EngineConfig::default().with_seed(seed),
        &mut store,
        stdin.lock(),
    )
}

fn run_with<S, R>(
    content: ContentStore,
    config: EngineConfig,
    store: &mut S,
    reader: R,
) -> Result<(), String>
where
    S: ProgressStore,
    R: BufRead,
{
    let content = Arc::new(content);
    let mut engine = SessionEngine::new(Arc::clone(&content), config);
    engine
        .load_progress(&*store)
        .map_err(|e| format!("failed to load progress: {e}"))?;
    let mut input = Input::new(reader);

    print_welcome(&content);

    loop {
        print_menu();
        let Some(line) = input.next("> ")? else {
            break;
        };

        match line.as_str() {
            "" => continue,
            "1" => match play_once(&mut engine, store, &mut input)? {
                Flow::Menu => {}
                Flow::Exit => break,
            },
            "2" => print_achievements(&engine),
            "3" => {
                let Some(answer) = input.next("  Clear all achievements and scores? [y/N] ")?
                else {
                    break;
                };
                if !matches!(answer.to_lowercase().as_str(), "y" | "yes") {
                    println!("  Nothing cleared.\n");
                    continue;
                }
                engine.clear_persisted_data();
                store
                    .clear()
                    .map_err(|e| format!("failed to clear progress: {e}"))?;
                println!("  {}\n", "All saved achievements cleared.".yellow());
            }
            "4" => print_about(&content),
            "5" | "q" => {
                println!("  {}", engine.config().messages.farewell);
                break;
            }
            other => println!("  {}\n", format!("Unknown option '{other}'.").yellow()),
        }
    }

    Ok(())
}

fn play_once<S, R>(
    engine: &mut SessionEngine,
    store: &mut S,
    input: &mut Input<R>,
) -> Result<Flow, String>
where
    S: ProgressStore,
    R: BufRead,
{
    let Some(content) = engine.content() else {
        return Err("no content loaded".into());
    };
    let families: Vec<Choice> = content
        .branches()
        .iter()
        .map(|b| Choice {
            key: b.id.to_string(),
            label: b.label.clone(),
        })
        .collect();
    let quit_key = engine.config().quit_key.clone();

    println!("\n  {}", "Choose your family:".bold());
    print_choices(&families);
    println!("  {quit_key}. Back\n");

    let Some(line) = input.next("> ")? else {
        return Ok(Flow::Exit);
    };
    let key = if line == quit_key {
        line
    } else {
        resolve_choice(&line, &families).unwrap_or(line)
    };

    let mut result = match engine.start(&key) {
        Ok(result) => result,
        Err(e) => {
            println!("  {}\n", e.to_string().yellow());
            return Ok(Flow::Menu);
        }
    };

    loop {
        print_result(&result);
        if result.terminal {
            finish(engine, store)?;
            return Ok(Flow::Menu);
        }

        let choices = result.choices.clone().unwrap_or_default();
        if choices.is_empty() {
            println!("  {}\n", "This event offers no choices.".red());
            finish(engine, store)?;
            return Ok(Flow::Menu);
        }
        let Some(line) = input.next("> ")? else {
            finish(engine, store)?;
            return Ok(Flow::Exit);
        };
        let Some(key) = resolve_choice(&line, &choices) else {
            let keys: Vec<&str> = choices.iter().map(|c| c.key.as_str()).collect();
            println!("  {}\n", format!("Pick one of: {}", keys.join(", ")).yellow());
            continue;
        };

        result = match engine.advance(Some(&key)) {
            Ok(next) => next,
            Err(e) => {
                println!("  {}\n", e.to_string().red());
                finish(engine, store)?;
                return Ok(Flow::Menu);
            }
        };
    }
}

fn finish<S: ProgressStore>(engine: &SessionEngine, store: &mut S) -> Result<(), String> {
    let progress = engine.progress();
    if engine.state().branch().is_some() {
        println!(
            "  Score: {} (best {})\n",
            progress.score.to_string().bold(),
            progress.best_score
        );
    }
    engine
        .save_progress(store)
        .map_err(|e| format!("failed to save progress: {e}"))
}

fn print_welcome(content: &ContentStore) {
    let title = content.title().unwrap_or("Schoolbell");
    match content.version() {
        Some(version) => println!("\n  {} {}", title.bold(), version.dimmed()),
        None => println!("\n  {}", title.bold()),
    }
    println!("  Make it through the school day, one choice at a time.");
}

fn print_menu() {
    println!();
    println!("  1. Start game");
    println!("  2. View achievements");
    println!("  3. Clear data");
    println!("  4. About");
    println!("  5. Quit\n");
}

fn print_choices(choices: &[Choice]) {
    for choice in choices {
        println!("  {}. {}", choice.key.bold(), choice.label);
    }
}

fn print_result(result: &TransitionResult) {
    println!();
    for line in result.message.lines() {
        println!("  {line}");
    }
    for id in &result.newly_granted {
        if result.first_unlocks.contains(id) {
            println!("  {} {}", "Achievement unlocked:".green().bold(), id.green());
        } else {
            println!("  {}", format!("Achievement: {id}").dimmed());
        }
    }
    if let Some(choices) = &result.choices {
        println!();
        print_choices(choices);
    }
    println!();
}

fn print_achievements(engine: &SessionEngine) {
    let progress = engine.progress();
    println!("\n  {}", "Achievements".bold());
    if progress.achievements.is_empty() {
        println!("  None yet.");
    }
    for id in &progress.achievements {
        println!("  - {id}");
    }
    println!("  Best score: {}", progress.best_score);
}

fn print_about(content: &ContentStore) {
    let contributors: BTreeSet<&str> = content
        .branches()
        .iter()
        .flat_map(|b| b.events.iter())
        .chain(content.random_pool())
        .flat_map(|e| e.attribution.iter().map(String::as_str))
        .collect();

    println!("\n  {}", content.title().unwrap_or("Schoolbell").bold());
    if let Some(version) = content.version() {
        println!("  Content version {version}");
    }
    println!(
        "  {} families, {} fixed events, {} random events",
        content.branches().len(),
        content.fixed_event_count(),
        content.random_pool().len()
    );
    if !contributors.is_empty() {
        let names: Vec<&str> = contributors.into_iter().collect();
        println!("  Written by {}", names.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_engine::MemoryStore;
    use serde_json::json;

    fn content() -> ContentStore {
        ContentStore::from_value(json!({
            "metadata": { "start_options": ["Ordinary family"] },
            "events": {
                "fixed_events": { "group_1": [
                    { "question": "Alarm.", "choices": { "1": "Get up" },
                      "results": { "1": "Up." }, "achievements": { "1": "Early Bird" } }
                ] },
                "random_events": [
                    { "question": "Quiz.", "choices": { "1": "Answer" },
                      "results": { "1": "Right." } }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn full_playthrough_saves_progress() {
        let mut store = MemoryStore::new();
        let input = "1\nordinary family\nget up\n1\n5\n".as_bytes();
        run_with(content(), EngineConfig::default(), &mut store, input).unwrap();
        let saved = store.load().unwrap();
        assert_eq!(saved.achievements, vec!["Early Bird".to_string()]);
        assert_eq!(saved.best_score, 2);
        assert_eq!(saved.playthroughs, 1);
    }

    #[test]
    fn eof_mid_game_still_saves() {
        let mut store = MemoryStore::new();
        let input = "1\n1\n1\n".as_bytes();
        run_with(content(), EngineConfig::default(), &mut store, input).unwrap();
        let saved = store.load().unwrap();
        assert_eq!(saved.achievements, vec!["Early Bird".to_string()]);
        assert_eq!(saved.best_score, 1);
    }

    #[test]
    fn clear_from_menu_wipes_store() {
        let mut store = MemoryStore::new();
        let input = "1\n1\n1\n1\n3\ny\n".as_bytes();
        run_with(content(), EngineConfig::default(), &mut store, input).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn clear_needs_confirmation() {
        let mut store = MemoryStore::new();
        let input = "1\n1\n1\n1\n3\nn\n3\n\n".as_bytes();
        run_with(content(), EngineConfig::default(), &mut store, input).unwrap();
        assert_eq!(
            store.load().unwrap().achievements,
            vec!["Early Bird".to_string()]
        );
    }

    #[test]
    fn event_without_choices_returns_to_menu() {
        let dead_end = ContentStore::from_value(json!({
            "metadata": { "start_options": ["A"] },
            "events": { "fixed_events": { "group_1": [
                { "question": "Dead end", "results": {} }
            ] } }
        }))
        .unwrap();
        let mut store = MemoryStore::new();
        let input = "1\n1\n1\n1\n5\n".as_bytes();
        run_with(dead_end, EngineConfig::default(), &mut store, input).unwrap();
        assert_eq!(store.load().unwrap().playthroughs, 2);
    }

    #[test]
    fn unknown_family_returns_to_menu() {
        let mut store = MemoryStore::new();
        let input = "1\n7\n5\n".as_bytes();
        run_with(content(), EngineConfig::default(), &mut store, input).unwrap();
        assert!(store.is_empty());
    }
}
