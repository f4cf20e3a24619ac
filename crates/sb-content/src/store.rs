use std::path::Path;

use crate::branch::{Branch, BranchId};
use crate::document::Document;
use crate::error::{ContentError, ContentResult};
use crate::event::{Event, EventRef};

/// Immutable, fully typed game content.
///
/// Holds one [`Branch`] per start option (in start-option order) and the
/// shared random event pool. Group keys are resolved to [`BranchId`]s here,
/// once, so lookups during play never build key strings.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    title: Option<String>,
    version: Option<String>,
    branches: Vec<Branch>,
    random_pool: Vec<Event>,
    orphan_groups: Vec<String>,
    unused_order_keys: Vec<String>,
}

impl ContentStore {
    /// Parse a content document from a JSON string.
    pub fn from_json(json: &str) -> ContentResult<Self> {
        let document: Document = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Build the store from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> ContentResult<Self> {
        let document: Document = serde_json::from_value(value)?;
        Self::from_document(document)
    }

    /// Read and parse a content file.
    pub fn from_path(path: &Path) -> ContentResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json(&json)?;
        log::debug!("loaded content from {}", path.display());
        Ok(store)
    }

    fn from_document(document: Document) -> ContentResult<Self> {
        let Document { metadata, events } = document;
        let mut groups = events.fixed_events;
        let mut orders = metadata.fixed_order;

        let mut branches = Vec::with_capacity(metadata.start_options.len());
        for (position, label) in metadata.start_options.into_iter().enumerate() {
            let Some(id) = u32::try_from(position + 1).ok().and_then(BranchId::new) else {
                break;
            };
            let key = id.group_key();
            let events = groups
                .remove(&key)
                .unwrap_or_default()
                .into_iter()
                .enumerate()
                .map(|(index, raw)| raw.into_event(EventRef::Fixed { branch: id, index }))
                .collect::<ContentResult<Vec<_>>>()?;
            branches.push(Branch {
                id,
                label,
                events,
                order: orders.remove(&key).unwrap_or_default(),
            });
        }

        let random_pool = events
            .random_events
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.into_event(EventRef::Random { index }))
            .collect::<ContentResult<Vec<_>>>()?;

        let store = Self {
            title: metadata.title,
            version: metadata.version,
            branches,
            random_pool,
            orphan_groups: groups.into_keys().collect(),
            unused_order_keys: orders.into_keys().collect(),
        };
        log::debug!(
            "content has {} branches, {} fixed events, {} random events",
            store.branches.len(),
            store.fixed_event_count(),
            store.random_pool.len()
        );
        Ok(store)
    }

    /// Game title from the metadata.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Content version from the metadata.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// All branches in start-option order.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Look up a branch by id.
    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        self.branches.get(id.index())
    }

    /// Start-option labels in order.
    pub fn start_options(&self) -> impl Iterator<Item = &str> {
        self.branches.iter().map(|b| b.label.as_str())
    }

    /// The shared random event pool.
    pub fn random_pool(&self) -> &[Event] {
        &self.random_pool
    }

    /// A random-pool event by index.
    pub fn random_event(&self, index: usize) -> Option<&Event> {
        self.random_pool.get(index)
    }

    /// Total number of fixed events across all branches.
    pub fn fixed_event_count(&self) -> usize {
        self.branches.iter().map(Branch::len).sum()
    }

    /// Fixed-event group keys that match no start option.
    pub fn orphan_groups(&self) -> &[String] {
        &self.orphan_groups
    }

    /// `fixed_order` keys that match no start option.
    pub fn unused_order_keys(&self) -> &[String] {
        &self.unused_order_keys
    }

    /// Whether the store holds no playable branch at all.
    pub fn is_empty(&self) -> bool {
        self.branches.iter().all(Branch::is_empty)
    }
}
