//! Snapshot and trace model.
//!
//! A [`Trace`] is the complete, ordered record of every decision one core made
//! on one instance. Each [`Step`] owns a deep copy of the state the renderer
//! needs, so the view at step *i* never depends on anything but that step.
//!
//! Traces are built through a [`TraceRecorder`], which enforces the shape:
//!
//! ```text
//! initialize → (decision)* → complete | not_found | negative_cycle
//! ```
//!
//! # Example
//!
//! ```rust
//! use algotrace::trace::{Algorithm, StepKind, TraceRecorder};
//!
//! let mut working = vec![3, 1, 2];
//! let mut recorder = TraceRecorder::new(Algorithm::Quicksort, "start", &working);
//! working.swap(0, 1);
//! recorder.emit(StepKind::Swap, "swap 3 and 1", &working);
//! working[0] = 99; // later mutation does not reach the emitted step
//! let trace = recorder.finish(StepKind::Complete, "done", &working);
//!
//! assert_eq!(trace.len(), 3);
//! assert_eq!(trace.steps()[1].snapshot(), &vec![1, 3, 2]);
//! ```

mod kind;

pub use kind::{Algorithm, StepKind};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{TraceError, TraceResult};

/// One immutable entry in a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step<S> {
    kind: StepKind,
    message: String,
    snapshot: S,
}

impl<S> Step<S> {
    /// Decision type.
    #[must_use]
    pub const fn kind(&self) -> StepKind {
        self.kind
    }

    /// Human-readable description (render only).
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// State at this instant.
    #[must_use]
    pub const fn snapshot(&self) -> &S {
        &self.snapshot
    }
}

/// Ordered, immutable sequence of steps from one run of one core.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace<S> {
    algorithm: Algorithm,
    steps: Vec<Step<S>>,
}

/// Wire form used when reading a trace back; validated before use.
#[derive(Deserialize)]
struct TraceDocument<S> {
    algorithm: Algorithm,
    steps: Vec<Step<S>>,
}

impl<S> Trace<S> {
    /// Algorithm that produced this trace.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// All steps in order.
    #[must_use]
    pub fn steps(&self) -> &[Step<S>] {
        &self.steps
    }

    /// Step at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step<S>> {
        self.steps.get(index)
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the trace has no steps.
    ///
    /// Traces built by a recorder always hold at least two steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate over steps.
    pub fn iter(&self) -> std::slice::Iter<'_, Step<S>> {
        self.steps.iter()
    }

    /// Terminal step.
    #[must_use]
    pub fn last(&self) -> Option<&Step<S>> {
        self.steps.last()
    }

    /// Snapshot of the terminal step.
    #[must_use]
    pub fn final_snapshot(&self) -> Option<&S> {
        self.last().map(Step::snapshot)
    }

    /// Kind of the terminal step.
    #[must_use]
    pub fn outcome(&self) -> Option<StepKind> {
        self.last().map(Step::kind)
    }

    /// Number of steps with the given kind.
    #[must_use]
    pub fn count(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|s| s.kind == kind).count()
    }

    /// Sequence of step kinds.
    #[must_use]
    pub fn kinds(&self) -> Vec<StepKind> {
        self.steps.iter().map(|s| s.kind).collect()
    }

    /// Convert every snapshot, keeping kinds and messages.
    #[must_use]
    pub fn map_snapshots<T>(self, mut f: impl FnMut(S) -> T) -> Trace<T> {
        Trace {
            algorithm: self.algorithm,
            steps: self
                .steps
                .into_iter()
                .map(|step| Step {
                    kind: step.kind,
                    message: step.message,
                    snapshot: f(step.snapshot),
                })
                .collect(),
        }
    }

    /// Check the shape invariants: first step `initialize`, last step terminal,
    /// no terminal or `initialize` step in between.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::MalformedTrace`] describing the first violation.
    pub fn validate(&self) -> TraceResult<()> {
        let (Some(first), Some(last)) = (self.steps.first(), self.steps.last()) else {
            return Err(TraceError::malformed("trace has no steps"));
        };
        if first.kind != StepKind::Initialize {
            return Err(TraceError::malformed(format!(
                "first step is {}, expected initialize",
                first.kind
            )));
        }
        if self.steps.len() < 2 || !last.kind.is_terminal() {
            return Err(TraceError::malformed(format!(
                "last step is {}, expected a terminal kind",
                last.kind
            )));
        }
        let inner = &self.steps[1..self.steps.len() - 1];
        if let Some((offset, step)) = inner
            .iter()
            .enumerate()
            .find(|(_, s)| s.kind == StepKind::Initialize || s.kind.is_terminal())
        {
            return Err(TraceError::malformed(format!(
                "step {} has kind {} in the middle of the trace",
                offset + 1,
                step.kind
            )));
        }
        Ok(())
    }
}

impl<S: Serialize> Trace<S> {
    /// Export as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns error if a snapshot fails to serialize.
    pub fn to_json(&self) -> TraceResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TraceError::serialization(format!("Trace JSON export: {e}")))
    }

    /// Blake3 fingerprint of the bincode encoding.
    ///
    /// Two runs of the same core on the same instance yield the same checksum.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn checksum(&self) -> TraceResult<[u8; 32]> {
        let bytes = bincode::serialize(self)
            .map_err(|e| TraceError::serialization(format!("Trace checksum: {e}")))?;
        Ok(*blake3::hash(&bytes).as_bytes())
    }
}

impl<S: DeserializeOwned> Trace<S> {
    /// Read a trace from JSON, rejecting documents that break the invariants.
    ///
    /// # Errors
    ///
    /// Returns error if parsing fails or the trace is malformed.
    pub fn from_json(json: &str) -> TraceResult<Self> {
        let doc: TraceDocument<S> = serde_json::from_str(json)?;
        let trace = Self {
            algorithm: doc.algorithm,
            steps: doc.steps,
        };
        trace.validate()?;
        Ok(trace)
    }
}

impl<'a, S> IntoIterator for &'a Trace<S> {
    type Item = &'a Step<S>;
    type IntoIter = std::slice::Iter<'a, Step<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Builder that accumulates steps for one run of one core.
///
/// The recorder is passed explicitly through recursive cores; it never
/// logs and holds no global state.
#[derive(Debug)]
pub struct TraceRecorder<S> {
    algorithm: Algorithm,
    steps: Vec<Step<S>>,
}

impl<S: Clone> TraceRecorder<S> {
    /// Start a trace with its `initialize` step.
    #[must_use]
    pub fn new(algorithm: Algorithm, message: impl Into<String>, initial: &S) -> Self {
        Self {
            algorithm,
            steps: vec![Step {
                kind: StepKind::Initialize,
                message: message.into(),
                snapshot: initial.clone(),
            }],
        }
    }

    /// Append a decision step holding a copy of `snapshot`.
    pub fn emit(&mut self, kind: StepKind, message: impl Into<String>, snapshot: &S) -> &Step<S> {
        debug_assert!(
            kind != StepKind::Initialize && !kind.is_terminal(),
            "lifecycle kind {kind} emitted mid-trace"
        );
        let index = self.steps.len();
        self.steps.push(Step {
            kind,
            message: message.into(),
            snapshot: snapshot.clone(),
        });
        &self.steps[index]
    }

    /// Number of steps recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false: the initialize step is recorded on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append the terminal step and seal the trace.
    #[must_use]
    pub fn finish(mut self, kind: StepKind, message: impl Into<String>, snapshot: &S) -> Trace<S> {
        debug_assert!(kind.is_terminal(), "{kind} cannot end a trace");
        self.steps.push(Step {
            kind,
            message: message.into(),
            snapshot: snapshot.clone(),
        });
        Trace {
            algorithm: self.algorithm,
            steps: self.steps,
        }
    }
}
