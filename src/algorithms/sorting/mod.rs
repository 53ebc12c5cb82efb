//! Comparison sorts over `i64` arrays.

mod heapsort;
mod quicksort;

pub use heapsort::heapsort;
pub use quicksort::quicksort;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Array state shared by the sorting cores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSnapshot {
    /// Full array.
    pub array: Vec<i64>,
    /// Active half-open range `[lo, hi)`.
    pub range: Option<(usize, usize)>,
    /// Pivot index (quicksort).
    pub pivot: Option<usize>,
    /// Lomuto boundary `i`: everything left of it is below the pivot.
    pub boundary: Option<usize>,
    /// Index being scanned or sifted.
    pub cursor: Option<usize>,
    /// Pair just compared.
    pub compared: Option<(usize, usize)>,
    /// Pair just exchanged.
    pub swapped: Option<(usize, usize)>,
    /// Indices holding their final value.
    pub sorted: BTreeSet<usize>,
    /// Current heap size (heapsort).
    pub heap_size: Option<usize>,
}

impl SortSnapshot {
    fn new(values: &[i64]) -> Self {
        Self {
            array: values.to_vec(),
            range: None,
            pivot: None,
            boundary: None,
            cursor: None,
            compared: None,
            swapped: None,
            sorted: BTreeSet::new(),
            heap_size: None,
        }
    }

    fn clear_marks(&mut self) {
        self.range = None;
        self.pivot = None;
        self.boundary = None;
        self.cursor = None;
        self.compared = None;
        self.swapped = None;
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.array.swap(a, b);
        self.compared = None;
        self.swapped = Some((a, b));
    }

    fn mark_all_sorted(&mut self) {
        self.sorted = (0..self.array.len()).collect();
    }
}
