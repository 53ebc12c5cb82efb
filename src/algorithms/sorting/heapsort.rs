//! In-place heapsort.
//!
//! Build phase sifts down from `n/2 - 1` to `0`; the extract phase moves the
//! root into the sorted tail and re-heapifies the shrinking prefix.

use super::SortSnapshot;
use crate::trace::{Algorithm, StepKind, Trace, TraceRecorder};

/// Sort `values` ascending via a max-heap.
///
/// Emits one `heapify` step per sift-down invocation, a `compare` step per
/// parent/child comparison, a `swap` per exchange inside a sift-down, and an
/// `extract` per root-to-tail move.
#[must_use]
pub fn heapsort(values: &[i64]) -> Trace<SortSnapshot> {
    let n = values.len();
    let mut state = SortSnapshot::new(values);
    state.heap_size = Some(n);
    let mut rec = TraceRecorder::new(
        Algorithm::Heapsort,
        format!("Heapsort over {n} elements"),
        &state,
    );

    for root in (0..n / 2).rev() {
        sift_down(&mut state, &mut rec, root, n);
    }

    for end in (1..n).rev() {
        state.clear_marks();
        state.swap(0, end);
        state.sorted.insert(end);
        state.heap_size = Some(end);
        rec.emit(
            StepKind::Extract,
            format!(
                "Move max {} to index {end}; heap shrinks to {end}",
                state.array[end]
            ),
            &state,
        );
        sift_down(&mut state, &mut rec, 0, end);
    }

    state.clear_marks();
    state.heap_size = Some(0);
    state.mark_all_sorted();
    rec.finish(StepKind::Complete, "Array sorted", &state)
}

/// Restore the max-heap property below `root` within `array[..size]`.
fn sift_down(
    state: &mut SortSnapshot,
    rec: &mut TraceRecorder<SortSnapshot>,
    root: usize,
    size: usize,
) {
    state.clear_marks();
    state.range = Some((0, size));
    state.cursor = Some(root);
    rec.emit(
        StepKind::Heapify,
        format!("Heapify at index {root} (heap size {size})"),
        state,
    );

    let mut node = root;
    loop {
        let mut largest = node;
        for child in [2 * node + 1, 2 * node + 2] {
            if child >= size {
                continue;
            }
            state.swapped = None;
            state.compared = Some((largest, child));
            let bigger = state.array[child] > state.array[largest];
            rec.emit(
                StepKind::Compare,
                format!(
                    "Compare {} (index {child}) with {} (index {largest})",
                    state.array[child], state.array[largest]
                ),
                state,
            );
            if bigger {
                largest = child;
            }
        }

        if largest == node {
            break;
        }

        state.swap(node, largest);
        state.cursor = Some(largest);
        rec.emit(
            StepKind::Swap,
            format!(
                "Swap {} down to index {largest}",
                state.array[largest]
            ),
            state,
        );
        node = largest;
    }
}
