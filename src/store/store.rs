//! The store trait the edit coordinator programs against.

use crate::record::{Record, RecordId};

use super::{RecordSource, StoreError};

/// Ordered record collection with identity-keyed mutation.
///
/// Reads return clones; the collection is mutated only through these
/// operations, which is what makes the coordinator's cancel/revert
/// guarantee hold.
pub trait RecordStore<R: Record> {
    /// Replace the collection with a freshly fetched dataset.
    ///
    /// The swap happens only after a successful fetch, so a failing source
    /// leaves no partial state visible. Marks the store loaded and returns
    /// the number of records. Repeated loads are last-writer-wins.
    fn load(&self, source: &dyn RecordSource<R>) -> Result<usize, StoreError>;

    /// Assign a fresh identity to `draft`, append it to the tail, and
    /// return the stored copy.
    fn insert(&self, draft: R) -> Result<R, StoreError>;

    /// Overwrite the record's mutable fields from `patch`, preserving
    /// identity.
    fn update(&self, id: RecordId, patch: &R) -> Result<(), StoreError>;

    /// Delete the record.
    fn remove(&self, id: RecordId) -> Result<(), StoreError>;

    /// Overwrite the live record's mutable fields from a previously taken
    /// snapshot. Same shape as `update`; named apart because callers revert
    /// with it rather than commit.
    fn restore_fields(&self, id: RecordId, snapshot: &R) -> Result<(), StoreError>;

    /// Clone of the record, if present.
    fn get(&self, id: RecordId) -> Result<Option<R>, StoreError>;

    /// Clone of the whole collection, in display order.
    fn all(&self) -> Result<Vec<R>, StoreError>;

    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Whether a dataset has loaded successfully. Editing stays disabled
    /// until this is true.
    fn is_loaded(&self) -> bool;
}
