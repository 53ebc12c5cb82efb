//! Permutations over a shrinking pool of remaining elements.

use super::BacktrackSnapshot;
use crate::trace::{Algorithm, StepKind, Trace, TraceRecorder};

/// Enumerate all `n!` orderings (duplicates in the input give duplicate
/// permutations).
///
/// Every branch is a `try_choice` / `backtrack` pair around the recursive call.
#[must_use]
pub fn permutations(items: &[i64]) -> Trace<BacktrackSnapshot> {
    let mut state = BacktrackSnapshot::new(items);
    state.remaining = items.to_vec();
    let mut rec = TraceRecorder::new(
        Algorithm::Permutations,
        format!("Permutations of {items:?}"),
        &state,
    );

    permute(&mut state, &mut rec);

    state.index = None;
    let message = format!("{} permutations", state.solution_count);
    rec.finish(StepKind::Complete, message, &state)
}

fn permute(state: &mut BacktrackSnapshot, rec: &mut TraceRecorder<BacktrackSnapshot>) {
    let depth = state.current.len();
    state.depth = depth;
    if state.remaining.is_empty() {
        state.index = None;
        state.record_solution(rec);
        return;
    }

    for i in 0..state.remaining.len() {
        let choice = state.remaining.remove(i);
        state.current.push(choice);
        state.depth = depth;
        state.index = Some(i);
        rec.emit(
            StepKind::TryChoice,
            format!("Place {choice} at position {depth}"),
            state,
        );

        permute(state, rec);

        state.current.pop();
        state.remaining.insert(i, choice);
        state.depth = depth;
        state.index = Some(i);
        rec.emit(
            StepKind::Backtrack,
            format!("Take {choice} back from position {depth}"),
            state,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::backtracking::solutions;

    #[test]
    fn test_permutations_lexicographic_for_sorted_input() {
        let trace = permutations(&[1, 2, 3]);
        assert_eq!(
            solutions(&trace),
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1]
            ]
        );
    }

    #[test]
    fn test_try_and_backtrack_paired() {
        let trace = permutations(&[1, 2, 3]);
        assert_eq!(
            trace.count(StepKind::TryChoice),
            trace.count(StepKind::Backtrack)
        );
        // 3 + 3*2 + 3*2*1 branches.
        assert_eq!(trace.count(StepKind::TryChoice), 15);
    }

    #[test]
    fn test_pool_restored() {
        let trace = permutations(&[4, 5]);
        let last = trace.final_snapshot().expect("terminal");
        assert_eq!(last.remaining, vec![4, 5]);
        assert!(last.current.is_empty());
    }
}
