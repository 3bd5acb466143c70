//! Record stores - the authoritative ordered collection behind the grid.
//!
//! A store owns the records, hands out clones only, and publishes a
//! [`StoreEvent`] after every successful mutation so a projection layer can
//! re-derive the view without any implicit reactivity.
//!
//! ## Example
//!
//! ```ignore
//! use grid_edit::{InMemoryRecordStore, Product, RecordStore, StaticSource};
//!
//! let store = InMemoryRecordStore::<Product>::new();
//! store.on_change(|payload| println!("changed: {}", payload))?;
//! store.load(&StaticSource::new(vec![Product::new("Chai", 18.0, 39)]))?;
//! let chai = store.insert(Product::new("Chang", 19.0, 17))?;
//! ```

mod in_memory;
mod store;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordId};

/// Error type for record store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The data source failed or produced an unusable dataset.
    Load(String),
    /// A mutation was requested before any dataset loaded successfully.
    NotLoaded,
    /// No record with this identity.
    NotFound { id: RecordId },
    /// Internal lock poisoned.
    LockPoisoned(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Load(msg) => write!(f, "load failed: {}", msg),
            StoreError::NotLoaded => write!(f, "store has no loaded dataset"),
            StoreError::NotFound { id } => write!(f, "record not found: {}", id),
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Change notification published after a successful mutation.
///
/// Serialized as JSON and emitted under the event's own topic (see
/// [`StoreEvent::topic`]) as well as the catch-all `"changed"` topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreEvent {
    Loaded { count: usize },
    Inserted { id: RecordId },
    Updated { id: RecordId },
    Removed { id: RecordId },
    Restored { id: RecordId },
}

impl StoreEvent {
    /// Topic the event is emitted under.
    pub fn topic(&self) -> &'static str {
        match self {
            StoreEvent::Loaded { .. } => "loaded",
            StoreEvent::Inserted { .. } => "inserted",
            StoreEvent::Updated { .. } => "updated",
            StoreEvent::Removed { .. } => "removed",
            StoreEvent::Restored { .. } => "restored",
        }
    }

    /// Catch-all topic every event is also emitted under.
    pub const CHANGED: &'static str = "changed";
}

/// The external collaborator `load` pulls a complete dataset from.
pub trait RecordSource<R: Record> {
    fn fetch(&self) -> Result<Vec<R>, StoreError>;
}

/// A source backed by an owned dataset. Never fails.
pub struct StaticSource<R> {
    records: Vec<R>,
}

impl<R: Record> StaticSource<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }
}

impl<R: Record> RecordSource<R> for StaticSource<R> {
    fn fetch(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.records.clone())
    }
}

/// A source that parses a JSON array, e.g. a service response body.
pub struct JsonSource {
    raw: String,
}

impl JsonSource {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

impl<R: Record + DeserializeOwned> RecordSource<R> for JsonSource {
    fn fetch(&self) -> Result<Vec<R>, StoreError> {
        serde_json::from_str(&self.raw).map_err(|e| StoreError::Load(e.to_string()))
    }
}

pub use in_memory::InMemoryRecordStore;
pub use store::RecordStore;
