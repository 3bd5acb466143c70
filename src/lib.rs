mod coordinator;
mod grid;
mod product;
mod projection;
mod record;
mod store;

pub use coordinator::{EditCoordinator, EditError, EditSession};
pub use grid::{GridEvent, GridView};
pub use product::{Product, UNITS_IN_STOCK_MAX};
pub use projection::{project, DataResult, GridState, SortDir, SortSpec};
pub use record::{Record, RecordId, ValidationError};
pub use store::{
    InMemoryRecordStore, JsonSource, RecordSource, RecordStore, StaticSource, StoreError,
    StoreEvent,
};

// Re-export the EventEmitter from the event_emitter_rs crate
pub use event_emitter_rs::EventEmitter;
