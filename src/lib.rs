//! # algotrace
//!
//! Step-by-step execution traces of classic algorithms, with a playback
//! controller for animating them.
//!
//! Every algorithm runs once, synchronously, and records a complete
//! [`trace::Trace`]: an ordered list of decisions, each carrying a deep
//! snapshot of the state a renderer needs. Playback then walks that trace
//! without re-running anything.
//!
//! Covered algorithms:
//! - Sorting: quicksort, heapsort
//! - Graphs: Kruskal, Bellman-Ford, Floyd-Warshall, DFS
//! - Dynamic programming: 0/1 knapsack, coin change, LCS, Fibonacci
//! - Greedy: coin change, activity selection, fractional knapsack
//! - Backtracking: subsets, permutations, combinations
//!
//! ## Example
//!
//! ```rust
//! use algotrace::prelude::*;
//!
//! let instance = Instance::Quicksort { array: vec![64, 34, 25, 12, 22, 11, 90] };
//! let trace = run(&instance).unwrap();
//!
//! let mut player = PlaybackController::new(VirtualScheduler::new());
//! player.load(trace);
//! player.play();
//! player.run_until_idle();
//! assert_eq!(player.state(), PlaybackState::Finished);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Index loops mirror the DP recurrences
)]

pub mod algorithms;
pub mod cli;
pub mod config;
pub mod error;
pub mod playback;
pub mod runner;
pub mod structures;
pub mod trace;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{LimitsConfig, PlaybackConfig, VisualizerConfig};
    pub use crate::error::{TraceError, TraceResult};
    pub use crate::playback::{
        PlaybackController, PlaybackState, PlaybackView, Scheduler, TimerHandle, VirtualScheduler,
    };
    pub use crate::runner::{run, run_with_limits, GraphSpec, Instance, Snapshot};
    pub use crate::structures::{Distance, Edge, UnionFind, WeightedGraph};
    pub use crate::trace::{Algorithm, Step, StepKind, Trace, TraceRecorder};
}

/// Re-export for public API
pub use error::{TraceError, TraceResult};
