//! Power set by include/exclude recursion.

use super::BacktrackSnapshot;
use crate::trace::{Algorithm, StepKind, Trace, TraceRecorder};

/// Enumerate all `2^n` subsets.
///
/// At each index the element is included first, the branch explored, the
/// inclusion undone (`backtrack`), and then the exclusion branch explored.
#[must_use]
pub fn subsets(items: &[i64]) -> Trace<BacktrackSnapshot> {
    let mut state = BacktrackSnapshot::new(items);
    let mut rec = TraceRecorder::new(
        Algorithm::Subsets,
        format!("Subsets of {items:?}"),
        &state,
    );

    explore(&mut state, &mut rec, 0);

    state.current.clear();
    state.depth = 0;
    state.index = None;
    let message = format!("{} subsets", state.solution_count);
    rec.finish(StepKind::Complete, message, &state)
}

fn explore(state: &mut BacktrackSnapshot, rec: &mut TraceRecorder<BacktrackSnapshot>, index: usize) {
    state.depth = index;
    if index == state.items.len() {
        state.index = None;
        state.record_solution(rec);
        return;
    }

    let item = state.items[index];
    state.index = Some(index);
    state.current.push(item);
    rec.emit(StepKind::Include, format!("Include {item}"), state);
    explore(state, rec, index + 1);

    state.depth = index;
    state.index = Some(index);
    state.current.pop();
    rec.emit(StepKind::Backtrack, format!("Remove {item}"), state);

    rec.emit(StepKind::Exclude, format!("Exclude {item}"), state);
    explore(state, rec, index + 1);
    state.depth = index;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::backtracking::solutions;

    #[test]
    fn test_subsets_order() {
        let trace = subsets(&[1, 2]);
        assert_eq!(
            solutions(&trace),
            vec![vec![1, 2], vec![1], vec![2], vec![]]
        );
    }

    #[test]
    fn test_step_shape() {
        let trace = subsets(&[7]);
        assert_eq!(
            trace.kinds(),
            vec![
                StepKind::Initialize,
                StepKind::Include,
                StepKind::SolutionFound,
                StepKind::Backtrack,
                StepKind::Exclude,
                StepKind::SolutionFound,
                StepKind::Complete
            ]
        );
    }

    #[test]
    fn test_empty_input_has_one_subset() {
        let trace = subsets(&[]);
        assert_eq!(solutions(&trace), vec![Vec::<i64>::new()]);
    }
}
