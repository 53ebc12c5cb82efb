//! Fixed-size combinations in index order.

use super::BacktrackSnapshot;
use crate::trace::{Algorithm, StepKind, Trace, TraceRecorder};

/// Combinations of size `ceil(n / 2)`.
#[must_use]
pub fn combinations(items: &[i64]) -> Trace<BacktrackSnapshot> {
    combinations_of_size(items, items.len().div_ceil(2))
}

/// Enumerate all `C(n, k)` combinations.
///
/// A start index keeps chosen elements in input order. Branches that cannot
/// reach `k` elements are never entered. `k > n` yields no solutions.
#[must_use]
pub fn combinations_of_size(items: &[i64], k: usize) -> Trace<BacktrackSnapshot> {
    let mut state = BacktrackSnapshot::new(items);
    let mut rec = TraceRecorder::new(
        Algorithm::Combinations,
        format!("Choose {k} of {items:?}"),
        &state,
    );

    choose(&mut state, &mut rec, 0, k);

    state.index = None;
    state.depth = 0;
    let message = format!("{} combinations of size {k}", state.solution_count);
    rec.finish(StepKind::Complete, message, &state)
}

fn choose(
    state: &mut BacktrackSnapshot,
    rec: &mut TraceRecorder<BacktrackSnapshot>,
    start: usize,
    k: usize,
) {
    let depth = state.current.len();
    state.depth = depth;
    if depth == k {
        state.index = None;
        state.record_solution(rec);
        return;
    }

    let n = state.items.len();
    let needed = k - depth;
    for i in start..n {
        if n - i < needed {
            break;
        }
        let item = state.items[i];
        state.current.push(item);
        state.depth = depth;
        state.index = Some(i);
        rec.emit(StepKind::TryChoice, format!("Choose {item}"), state);

        choose(state, rec, i + 1, k);

        state.current.pop();
        state.depth = depth;
        state.index = Some(i);
        rec.emit(StepKind::Backtrack, format!("Drop {item}"), state);
    }
}
