use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use sb_engine::ProgressStore;

use crate::store::JsonFileStore;

pub fn run(progress_path: &Path) -> Result<(), String> {
    let saved = JsonFileStore::new(progress_path)
        .load()
        .map_err(|e| format!("failed to load progress: {e}"))?;

    if saved.achievements.is_empty() {
        println!("  No achievements yet.");
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["#", "Achievement"]);
        for (i, id) in saved.achievements.iter().enumerate() {
            table.add_row(vec![(i + 1).to_string(), id.clone()]);
        }
        println!("{table}");
    }

    println!();
    println!("  Best score: {}", saved.best_score.to_string().bold());
    println!("  Playthroughs: {}", saved.playthroughs);
    if let Some(at) = saved.updated_at {
        println!("  Last saved: {}", at.format("%Y-%m-%d %H:%M UTC"));
    }

    Ok(())
}
