use std::path::Path;

use sb_engine::ProgressStore;

use crate::store::JsonFileStore;

pub fn run(progress_path: &Path) -> Result<(), String> {
    let mut store = JsonFileStore::new(progress_path);
    store
        .clear()
        .map_err(|e| format!("failed to clear progress: {e}"))?;
    println!("  Cleared saved progress in {}.", progress_path.display());
    Ok(())
}
