//! Backtracking enumeration cores.
//!
//! Each core threads one [`TraceRecorder`] and one mutable
//! [`BacktrackSnapshot`] down its recursion. Snapshots keep a running
//! solution count and the latest solution rather than the full list, so a
//! step stays small; [`solutions`] recovers the list from the trace.

mod combinations;
mod permutations;
mod subsets;

pub use combinations::{combinations, combinations_of_size};
pub use permutations::permutations;
pub use subsets::subsets;

use serde::{Deserialize, Serialize};

use crate::trace::{StepKind, Trace, TraceRecorder};

/// Search state at one node of the recursion tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktrackSnapshot {
    /// Input elements.
    pub items: Vec<i64>,
    /// Partial solution.
    pub current: Vec<i64>,
    /// Elements still available (permutations only).
    pub remaining: Vec<i64>,
    /// Recursion depth.
    pub depth: usize,
    /// Index being decided, if any.
    pub index: Option<usize>,
    /// Solutions found so far.
    pub solution_count: usize,
    /// Most recent solution.
    pub last_solution: Option<Vec<i64>>,
}

impl BacktrackSnapshot {
    fn new(items: &[i64]) -> Self {
        Self {
            items: items.to_vec(),
            current: Vec::new(),
            remaining: Vec::new(),
            depth: 0,
            index: None,
            solution_count: 0,
            last_solution: None,
        }
    }

    fn record_solution(&mut self, rec: &mut TraceRecorder<Self>) {
        self.solution_count += 1;
        self.last_solution = Some(self.current.clone());
        rec.emit(
            StepKind::SolutionFound,
            format!("Solution #{}: {:?}", self.solution_count, self.current),
            self,
        );
    }
}

/// Every solution in discovery order, read from the `solution_found` steps.
#[must_use]
pub fn solutions(trace: &Trace<BacktrackSnapshot>) -> Vec<Vec<i64>> {
    trace
        .iter()
        .filter(|step| step.kind() == StepKind::SolutionFound)
        .filter_map(|step| step.snapshot().last_solution.clone())
        .collect()
}
