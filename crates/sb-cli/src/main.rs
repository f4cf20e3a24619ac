//! Terminal frontend for Schoolbell, a choice-driven school-day story game.

mod commands;
mod resolve;
mod store;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "schoolbell",
    about = "Schoolbell: make it through the school day one choice at a time",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively
    Play {
        /// Content file to play
        #[arg(short, long, default_value = "data/events.json")]
        content: PathBuf,

        /// RNG seed for reproducible runs (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// File holding saved achievements
        #[arg(long, default_value = ".schoolbell/progress.json")]
        progress: PathBuf,
    },

    /// Load and validate a content file
    Check {
        /// Content file to check
        #[arg(short, long, default_value = "data/events.json")]
        content: PathBuf,
    },

    /// Show saved achievements and best score
    Achievements {
        /// File holding saved achievements
        #[arg(long, default_value = ".schoolbell/progress.json")]
        progress: PathBuf,
    },

    /// Delete saved achievements and best score
    Clear {
        /// File holding saved achievements
        #[arg(long, default_value = ".schoolbell/progress.json")]
        progress: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            content,
            seed,
            progress,
        } => commands::play::run(&content, seed, &progress),
        Commands::Check { content } => commands::check::run(&content),
        Commands::Achievements { progress } => commands::achievements::run(&progress),
        Commands::Clear { progress } => commands::clear::run(&progress),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
