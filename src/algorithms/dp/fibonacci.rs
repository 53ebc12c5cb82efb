//! Tabulated Fibonacci.

use serde::{Deserialize, Serialize};

use crate::error::{TraceError, TraceResult};
use crate::trace::{Algorithm, StepKind, Trace, TraceRecorder};

/// Largest `n` whose Fibonacci number fits in a `u64`.
pub const MAX_FIBONACCI_N: usize = 93;

/// Table state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FibonacciSnapshot {
    /// `dp[i] = fib(i)`; entries past `filled` are 0 placeholders.
    pub dp: Vec<u64>,
    /// Number of filled entries.
    pub filled: usize,
    /// Index just computed.
    pub cell: Option<usize>,
}

/// `fib(n)` bottom up: `dp[0] = 0`, `dp[1] = 1`, then one `compute` step per
/// index from 2 to `n`.
///
/// # Errors
///
/// Returns [`TraceError::InvalidInstance`] if `n > 93`.
pub fn fibonacci(n: usize) -> TraceResult<Trace<FibonacciSnapshot>> {
    if n > MAX_FIBONACCI_N {
        return Err(TraceError::invalid(
            Algorithm::Fibonacci,
            format!("n = {n} overflows u64 (max {MAX_FIBONACCI_N})"),
        ));
    }

    let mut dp = vec![0u64; n + 1];
    let mut filled = 1;
    if n >= 1 {
        dp[1] = 1;
        filled = 2;
    }
    let mut state = FibonacciSnapshot {
        dp,
        filled,
        cell: None,
    };
    let mut rec = TraceRecorder::new(
        Algorithm::Fibonacci,
        if n == 0 {
            "dp[0] = 0".to_string()
        } else {
            "dp[0] = 0, dp[1] = 1".to_string()
        },
        &state,
    );

    for i in 2..=n {
        let value = state.dp[i - 1].saturating_add(state.dp[i - 2]);
        state.dp[i] = value;
        state.filled = i + 1;
        state.cell = Some(i);
        rec.emit(
            StepKind::Compute,
            format!(
                "dp[{i}] = dp[{}] + dp[{}] = {} + {} = {value}",
                i - 1,
                i - 2,
                state.dp[i - 1],
                state.dp[i - 2]
            ),
            &state,
        );
    }

    state.cell = None;
    let message = format!("fib({n}) = {}", state.dp[n]);
    Ok(rec.finish(StepKind::Complete, message, &state))
}
