//! The grid widget seam.
//!
//! The coordinator never talks to a concrete widget library; it instructs a
//! [`GridView`] and consumes [`GridEvent`]s the surrounding application has
//! translated from whatever payloads its widget raises.

use crate::record::Record;

/// Calls the coordinator makes into the rendering grid.
pub trait GridView<R: Record> {
    /// Switch an existing row into edit mode.
    fn open_row_for_edit(&mut self, row_index: usize);

    /// Revert a row back into view mode.
    fn close_row(&mut self, row_index: usize);

    /// Surface a new draft row at the top of the view, in edit mode.
    fn add_draft_row(&mut self, record: &R);
}

/// Row-lifecycle events raised by the grid, one variant per request.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent<R> {
    /// The user asked for a new row.
    AddRequested,
    /// The user asked to edit an existing row.
    EditRequested { row_index: usize, record: R },
    /// The user abandoned the in-flight edit. `row_index` defaults to the
    /// tracked session's row when the widget does not supply one.
    CancelRequested { row_index: Option<usize> },
    /// The user submitted the edited values.
    SaveRequested { record: R, is_new: bool },
    /// The user asked to delete a row.
    RemoveRequested { record: R },
}
