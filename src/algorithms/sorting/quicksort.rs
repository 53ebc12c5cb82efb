//! Quicksort with Lomuto partitioning.
//!
//! Pivot is the last element of the active range. Elements strictly less
//! than the pivot move left; equal elements stay right of the boundary.
//! Not stable.

use super::SortSnapshot;
use crate::trace::{Algorithm, StepKind, Trace, TraceRecorder};

/// Sort `values` ascending, recording every pivot choice, comparison and
/// exchange.
///
/// Swap steps are only emitted for real exchanges (`i != j`).
///
/// # Example
///
/// ```rust
/// use algotrace::algorithms::sorting::quicksort;
///
/// let trace = quicksort(&[64, 34, 25, 12, 22, 11, 90]);
/// let last = trace.final_snapshot().unwrap();
/// assert_eq!(last.array, vec![11, 12, 22, 25, 34, 64, 90]);
/// ```
#[must_use]
pub fn quicksort(values: &[i64]) -> Trace<SortSnapshot> {
    let mut state = SortSnapshot::new(values);
    let mut rec = TraceRecorder::new(
        Algorithm::Quicksort,
        format!("Quicksort over {} elements", values.len()),
        &state,
    );

    sort_range(&mut state, &mut rec, 0, values.len());

    state.clear_marks();
    state.mark_all_sorted();
    rec.finish(StepKind::Complete, "Array sorted", &state)
}

fn sort_range(
    state: &mut SortSnapshot,
    rec: &mut TraceRecorder<SortSnapshot>,
    lo: usize,
    hi: usize,
) {
    if hi <= lo {
        return;
    }
    if hi - lo == 1 {
        state.sorted.insert(lo);
        return;
    }

    let p = partition(state, rec, lo, hi);
    sort_range(state, rec, lo, p);
    sort_range(state, rec, p + 1, hi);
}

/// Partition `[lo, hi)` around `array[hi - 1]`; returns the pivot's final index.
fn partition(
    state: &mut SortSnapshot,
    rec: &mut TraceRecorder<SortSnapshot>,
    lo: usize,
    hi: usize,
) -> usize {
    let pivot_index = hi - 1;
    let pivot = state.array[pivot_index];

    state.clear_marks();
    state.range = Some((lo, hi));
    state.pivot = Some(pivot_index);
    state.boundary = Some(lo);
    rec.emit(
        StepKind::SelectPivot,
        format!("Pivot {pivot} at index {pivot_index} for range [{lo}, {hi})"),
        state,
    );

    let mut i = lo;
    for j in lo..pivot_index {
        state.cursor = Some(j);
        state.swapped = None;
        state.compared = Some((j, pivot_index));
        let value = state.array[j];
        let less = value < pivot;
        rec.emit(
            StepKind::Compare,
            if less {
                format!("{value} < {pivot}: belongs left of the boundary")
            } else {
                format!("{value} >= {pivot}: stays right")
            },
            state,
        );

        if less {
            if i != j {
                state.swap(i, j);
                rec.emit(
                    StepKind::Swap,
                    format!(
                        "Swap {} (index {i}) with {} (index {j})",
                        state.array[j], state.array[i]
                    ),
                    state,
                );
            }
            i += 1;
            state.boundary = Some(i);
        }
    }

    state.cursor = None;
    state.compared = None;
    state.swapped = None;
    if i != pivot_index {
        state.swap(i, pivot_index);
    }
    state.pivot = Some(i);
    state.sorted.insert(i);
    rec.emit(
        StepKind::PivotPlaced,
        format!("Pivot {pivot} placed at final index {i}"),
        state,
    );

    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quicksort_scenario() {
        let trace = quicksort(&[64, 34, 25, 12, 22, 11, 90]);
        let last = trace.final_snapshot().expect("terminal");
        assert_eq!(last.array, vec![11, 12, 22, 25, 34, 64, 90]);
        assert_eq!(trace.steps()[0].kind(), StepKind::Initialize);
        assert_eq!(trace.steps()[0].snapshot().array, vec![64, 34, 25, 12, 22, 11, 90]);
    }

    #[test]
    fn test_quicksort_empty_and_single() {
        let empty = quicksort(&[]);
        assert_eq!(empty.kinds(), vec![StepKind::Initialize, StepKind::Complete]);

        let single = quicksort(&[5]);
        assert_eq!(single.len(), 2);
        assert_eq!(single.final_snapshot().expect("terminal").array, vec![5]);
    }

    #[test]
    fn test_select_pivot_precedes_compares() {
        let trace = quicksort(&[3, 1, 2]);
        let kinds = trace.kinds();
        assert_eq!(kinds[1], StepKind::SelectPivot);
        assert_eq!(kinds[2], StepKind::Compare);
    }

    #[test]
    fn test_no_swap_step_for_self_exchange() {
        // Already sorted: every element is < pivot at i == j, so no swaps at all.
        assert_eq!(quicksort(&[1, 2, 3, 4]).count(StepKind::Swap), 0);

        // Pivot 3: 1 stays put (i == j), 2 exchanges with 5. Later ranges
        // only hold self-exchanges.
        let trace = quicksort(&[1, 5, 2, 4, 3]);
        assert_eq!(trace.count(StepKind::Swap), 1);
        for step in trace.iter().filter(|s| s.kind() == StepKind::Swap) {
            let (a, b) = step.snapshot().swapped.expect("swap pair");
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_compare_count_matches_lomuto() {
        // [3, 1, 2]: pivot 2 scans 2 elements; left [1] and right [3] are singletons.
        let trace = quicksort(&[3, 1, 2]);
        assert_eq!(trace.count(StepKind::Compare), 2);
        assert_eq!(trace.count(StepKind::PivotPlaced), 1);
        assert_eq!(trace.count(StepKind::Swap), 1);
    }

    #[test]
    fn test_equal_elements_stay_right() {
        let trace = quicksort(&[2, 2, 2]);
        // Nothing is strictly less than the pivot, so the pivot lands at index 0.
        let placed = trace
            .iter()
            .find(|s| s.kind() == StepKind::PivotPlaced)
            .expect("pivot placed");
        assert_eq!(placed.snapshot().pivot, Some(0));
        assert_eq!(trace.count(StepKind::Swap), 0);
    }

    #[test]
    fn test_pivot_placed_marks_sorted() {
        let trace = quicksort(&[5, 4, 3, 2, 1]);
        for step in trace.iter().filter(|s| s.kind() == StepKind::PivotPlaced) {
            let snap = step.snapshot();
            let p = snap.pivot.expect("pivot index");
            assert!(snap.sorted.contains(&p));
        }
    }
}
