//! Integration tests (sample_content).
use std::path::PathBuf;

use sb_content::{BranchId, ContentStore, FixedOrder};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/events.json")
}

#[test]
fn shipped_content_is_clean() {
    let store = ContentStore::from_path(&sample_path()).unwrap();
    assert_eq!(store.validate(), Vec::new());
}

#[test]
fn shipped_content_shape() {
    let store = ContentStore::from_path(&sample_path()).unwrap();
    assert_eq!(store.title(), Some("Schoolbell"));
    assert_eq!(store.branches().len(), 3);
    assert_eq!(store.random_pool().len(), 5);
    for branch in store.branches() {
        assert!((2..=3).contains(&branch.len()), "{} has {}", branch.label, branch.len());
    }
    let scholar = store.branch(BranchId::new(3).unwrap()).unwrap();
    assert_eq!(scholar.order, FixedOrder::Shuffled);
}
