//! JSON file persistence for cumulative progress.

use std::fs;
use std::path::{Path, PathBuf};

use sb_engine::{EngineError, EngineResult, ProgressStore, SavedProgress};

/// Keeps [`SavedProgress`] in a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn store_error(e: impl std::error::Error + Send + Sync + 'static) -> EngineError {
    EngineError::Store(Box::new(e))
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> EngineResult<SavedProgress> {
        if !self.path.exists() {
            return Ok(SavedProgress::default());
        }
        let json = fs::read_to_string(&self.path).map_err(store_error)?;
        let saved = serde_json::from_str(&json).map_err(store_error)?;
        log::debug!("loaded progress from {}", self.path.display());
        Ok(saved)
    }

    fn save(&mut self, progress: &SavedProgress) -> EngineResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(store_error)?;
        }
        let json = serde_json::to_string_pretty(progress).map_err(store_error)?;
        fs::write(&self.path, json).map_err(store_error)?;
        log::debug!("saved progress to {}", self.path.display());
        Ok(())
    }

    fn clear(&mut self) -> EngineResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(store_error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(&dir.path().join("progress.json"));
        assert_eq!(store.load().unwrap(), SavedProgress::default());
    }

    #[test]
    fn save_creates_parent_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(&dir.path().join("nested/progress.json"));
        let saved = SavedProgress {
            achievements: vec!["Early Bird".to_string()],
            best_score: 3,
            playthroughs: 1,
            updated_at: None,
        };
        store.save(&saved).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), saved);

        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "not json").unwrap();
        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, EngineError::Store(_)));
    }
}
