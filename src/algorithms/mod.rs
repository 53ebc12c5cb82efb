//! Algorithm cores.
//!
//! Every core is a pure function from an instance to a [`crate::trace::Trace`]
//! of its own snapshot type. Cores never log, never touch global state and
//! produce identical traces for identical input.

pub mod backtracking;
pub mod dp;
pub mod graph;
pub mod greedy;
pub mod sorting;
