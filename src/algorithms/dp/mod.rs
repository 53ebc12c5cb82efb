//! Dynamic programming cores.

mod coin_change;
mod fibonacci;
mod knapsack;
mod lcs;

pub use coin_change::{coin_change_dp, CoinChangeInstance, CoinChangeSnapshot};
pub use fibonacci::{fibonacci, FibonacciSnapshot, MAX_FIBONACCI_N};
pub use knapsack::{knapsack, KnapsackInstance, KnapsackItem, KnapsackSnapshot};
pub use lcs::{lcs, LcsSnapshot};

use crate::error::{TraceError, TraceResult};
use crate::trace::Algorithm;

/// Allocate one table row of `len` cells, reporting an impossible size as
/// an invalid instance instead of aborting.
///
/// Only sizes the allocator refuses outright are caught. Large but
/// addressable tables still allocate, so callers outside
/// [`crate::runner::run_with_limits`] should bound sizes themselves.
fn table_row<T: Clone>(algorithm: Algorithm, len: usize, fill: T) -> TraceResult<Vec<T>> {
    let mut row = Vec::new();
    row.try_reserve_exact(len).map_err(|_| {
        TraceError::invalid(algorithm, format!("table of {len} cells cannot be allocated"))
    })?;
    row.resize(len, fill);
    Ok(row)
}
