//! The row-edit lifecycle coordinator.
//!
//! Sits between a [`RecordStore`] and a [`GridView`], tracks the single
//! row currently in edit mode, and mediates the five lifecycle requests.
//! Starting a new edit or add while one is in flight force-closes the
//! previous session before the new row opens, so two rows are never in
//! edit mode at once.

use std::fmt;

use tracing::debug;

use crate::grid::{GridEvent, GridView};
use crate::record::{Record, ValidationError};
use crate::store::{RecordStore, StoreError};

/// The single in-flight edit. `snapshot` holds the record's pre-edit field
/// values so cancel can revert live-bound changes.
#[derive(Debug, Clone)]
pub struct EditSession<R> {
    pub row_index: usize,
    pub snapshot: R,
    pub is_new: bool,
}

/// Error type for coordinator operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Save rejected; the row stays open for correction.
    Validation(ValidationError),
    /// Store-level failure.
    Store(StoreError),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::Validation(e) => write!(f, "save rejected: {}", e),
            EditError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl std::error::Error for EditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EditError::Validation(e) => Some(e),
            EditError::Store(e) => Some(e),
        }
    }
}

impl From<ValidationError> for EditError {
    fn from(err: ValidationError) -> Self {
        EditError::Validation(err)
    }
}

impl From<StoreError> for EditError {
    fn from(err: StoreError) -> Self {
        EditError::Store(err)
    }
}

/// The edit-lifecycle state machine: `Idle` when `session` is `None`,
/// `Editing` otherwise.
pub struct EditCoordinator<R, S, G> {
    store: S,
    grid: G,
    session: Option<EditSession<R>>,
}

impl<R, S, G> EditCoordinator<R, S, G>
where
    R: Record,
    S: RecordStore<R>,
    G: GridView<R>,
{
    pub fn new(store: S, grid: G) -> Self {
        Self {
            store,
            grid,
            session: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    /// The tracked session, if a row is in edit mode.
    pub fn session(&self) -> Option<&EditSession<R>> {
        self.session.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Dispatch a single grid event. Events arrive one at a time; the
    /// single-session rule is enforced by this sequencing alone.
    pub fn handle(&mut self, event: GridEvent<R>) -> Result<(), EditError> {
        match event {
            GridEvent::AddRequested => self.add_requested(),
            GridEvent::EditRequested { row_index, record } => {
                self.edit_requested(row_index, record)
            }
            GridEvent::CancelRequested { row_index } => self.cancel_requested(row_index),
            GridEvent::SaveRequested { record, is_new } => self.save_requested(record, is_new),
            GridEvent::RemoveRequested { record } => self.remove_requested(&record),
        }
    }

    /// Insert a placeholder draft and open it at the top of the view.
    fn add_requested(&mut self) -> Result<(), EditError> {
        if !self.store.is_loaded() {
            return Err(StoreError::NotLoaded.into());
        }
        self.cancel_current(None)?;

        let stored = self.store.insert(R::default())?;
        debug!(id = stored.id(), "opening draft row");
        self.grid.add_draft_row(&stored);
        // New rows surface at the top of the unpaged, unsorted view.
        self.session = Some(EditSession {
            row_index: 0,
            snapshot: stored,
            is_new: true,
        });
        Ok(())
    }

    /// Snapshot the record and switch its row into edit mode.
    fn edit_requested(&mut self, row_index: usize, record: R) -> Result<(), EditError> {
        if !self.store.is_loaded() {
            return Err(StoreError::NotLoaded.into());
        }
        self.cancel_current(None)?;

        debug!(row = row_index, id = record.id(), "opening row for edit");
        self.grid.open_row_for_edit(row_index);
        self.session = Some(EditSession {
            row_index,
            snapshot: record,
            is_new: false,
        });
        Ok(())
    }

    fn cancel_requested(&mut self, row_index: Option<usize>) -> Result<(), EditError> {
        self.cancel_current(row_index)
    }

    /// Commit the edited field values and close the row.
    ///
    /// For new rows the store already holds the draft from insert, so the
    /// commit is the same update-by-identity as for existing rows.
    fn save_requested(&mut self, record: R, is_new: bool) -> Result<(), EditError> {
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        let row_index = session.row_index;

        record.validate().map_err(EditError::Validation)?;

        match self.store.update(record.id(), &record) {
            // NotFound means the record was removed out from under the
            // edit; the row is gone from the projection, so just resolve.
            Ok(()) | Err(StoreError::NotFound { .. }) => {}
            Err(e) => return Err(e.into()),
        }

        debug!(id = record.id(), is_new, "saved row");
        self.grid.close_row(row_index);
        self.session = None;
        Ok(())
    }

    /// Delete the record. The row disappears from the projection, so no
    /// grid row-close is issued; if the deleted record was the one being
    /// edited, the session is dropped without restore.
    fn remove_requested(&mut self, record: &R) -> Result<(), EditError> {
        let id = record.id();
        match self.store.remove(id) {
            Ok(()) | Err(StoreError::NotFound { .. }) => {}
            Err(e) => return Err(e.into()),
        }

        let editing_removed = self
            .session
            .as_ref()
            .map_or(false, |s| s.snapshot.id() == id);
        if editing_removed {
            debug!(id, "edited row removed, dropping session");
            self.session = None;
        }
        Ok(())
    }

    /// Close the tracked row and revert its data, then clear the session.
    /// No-op when `Idle`.
    fn cancel_current(&mut self, row_index: Option<usize>) -> Result<(), EditError> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        let row = row_index.unwrap_or(session.row_index);
        self.grid.close_row(row);

        let id = session.snapshot.id();
        let result = if session.is_new {
            // Discarding an add deletes the draft rather than leaving a
            // blank row behind.
            debug!(id, "discarding draft row");
            self.store.remove(id)
        } else {
            debug!(id, row, "reverting cancelled edit");
            self.store.restore_fields(id, &session.snapshot)
        };
        match result {
            // NotFound: the record was removed meanwhile, nothing to revert.
            Ok(()) | Err(StoreError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
