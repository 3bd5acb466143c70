//! The domain-record seam the store and coordinator are parameterized over.

use std::cmp::Ordering;
use std::fmt;

/// Identity assigned by the store on insert. Monotonic, never reused.
pub type RecordId = u64;

/// A domain record with a stable identity and mutable attributes.
///
/// `Default` supplies the placeholder draft an Add request inserts before
/// the user has typed anything.
pub trait Record: Clone + Default + Send + Sync + 'static {
    /// The record's identity.
    fn id(&self) -> RecordId;

    /// Assign the identity. Called by the store on insert; callers outside
    /// the store have no reason to touch it.
    fn set_id(&mut self, id: RecordId);

    /// Overwrite every mutable field from `other`, preserving identity.
    ///
    /// Backs both `update` (apply edited values) and `restore_fields`
    /// (revert to a snapshot).
    fn assign_from(&mut self, other: &Self);

    /// Check required/range constraints, reporting the first failure.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Compare against `other` by a named field, for sorted projections.
    /// Returns `None` for fields this record type does not know.
    fn compare_field(&self, other: &Self, field: &str) -> Option<Ordering>;
}

/// A required/range constraint failure, carrying which field failed so the
/// view can point at the offending editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
