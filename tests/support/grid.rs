use grid_edit::{GridView, Product};

/// What the coordinator asked the grid to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCall {
    Open(usize),
    Close(usize),
    AddDraft(u64),
}

/// Grid double that records every instruction it receives.
#[derive(Default)]
pub struct RecordingGrid {
    pub calls: Vec<GridCall>,
}

impl GridView<Product> for RecordingGrid {
    fn open_row_for_edit(&mut self, row_index: usize) {
        self.calls.push(GridCall::Open(row_index));
    }

    fn close_row(&mut self, row_index: usize) {
        self.calls.push(GridCall::Close(row_index));
    }

    fn add_draft_row(&mut self, record: &Product) {
        self.calls.push(GridCall::AddDraft(record.id));
    }
}
