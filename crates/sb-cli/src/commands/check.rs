use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(content_path: &Path) -> Result<(), String> {
    let content = super::load_content(content_path)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Family", "Fixed events", "Order"]);
    for branch in content.branches() {
        table.add_row(vec![
            branch.id.to_string(),
            branch.label.clone(),
            branch.len().to_string(),
            branch.order.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} families, {} fixed events, {} random events",
        content.branches().len(),
        content.fixed_event_count(),
        content.random_pool().len()
    );

    let issues = content.validate();
    if issues.is_empty() {
        println!("  All checks passed for '{}'.", content_path.display());
        return Ok(());
    }

    for issue in &issues {
        eprintln!("  {} {issue}", "warning:".yellow().bold());
    }
    Err(format!(
        "{} content issue{} found",
        issues.len(),
        if issues.len() == 1 { "" } else { "s" }
    ))
}
