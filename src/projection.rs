//! Sorted, paged projection of a store snapshot.
//!
//! The grid renders whatever projection it is given; this module derives
//! one from a snapshot of the store. Re-run it from a `"changed"` listener
//! to keep the view current.

use serde::{Deserialize, Serialize};

use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

/// One sort key: a field name the record type understands, plus direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub dir: SortDir,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            dir: SortDir::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            dir: SortDir::Desc,
        }
    }
}

/// The view state the grid reports back on every user interaction:
/// sort descriptors plus a skip/take page window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridState {
    pub sort: Vec<SortSpec>,
    pub skip: usize,
    pub take: usize,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            sort: Vec::new(),
            skip: 0,
            take: 5,
        }
    }
}

/// A paged projection: the window's records plus the pre-paging total the
/// pager needs.
#[derive(Debug, Clone, PartialEq)]
pub struct DataResult<R> {
    pub items: Vec<R>,
    pub total_count: usize,
}

/// Sort and page a snapshot. The sort is stable, applied key by key
/// (earlier specs win); fields the record does not know are ignored.
pub fn project<R: Record>(records: &[R], state: &GridState) -> DataResult<R> {
    let mut sorted: Vec<R> = records.to_vec();

    for spec in state.sort.iter().rev() {
        sorted.sort_by(|a, b| {
            let ordering = a
                .compare_field(b, &spec.field)
                .unwrap_or(std::cmp::Ordering::Equal);
            match spec.dir {
                SortDir::Asc => ordering,
                SortDir::Desc => ordering.reverse(),
            }
        });
    }

    let total_count = sorted.len();
    let items = sorted
        .into_iter()
        .skip(state.skip)
        .take(state.take)
        .collect();

    DataResult { items, total_count }
}
