//! Largest-first greedy coin change.
//!
//! Optimal only for canonical coin systems such as `{1, 5, 10, 25}`. With
//! `{1, 3, 4}` and amount 6 it takes `4 + 1 + 1` where `3 + 3` is better;
//! [`crate::algorithms::dp::coin_change_dp`] handles the general case.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::algorithms::dp::CoinChangeInstance;
use crate::error::TraceResult;
use crate::trace::{Algorithm, StepKind, Trace, TraceRecorder};

/// Greedy change state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreedyCoinSnapshot {
    /// Denominations, largest first after the `sort` step.
    pub coins: Vec<i64>,
    /// Index into `coins` under consideration.
    pub current: Option<usize>,
    /// Amount still to pay.
    pub remaining: i64,
    /// Coins taken per denomination, in the order taken.
    pub taken: IndexMap<i64, u64>,
    /// Total coins taken.
    pub coin_count: u64,
}

/// Pay `amount` taking as many of each denomination as fit, largest first.
///
/// Stops as soon as nothing remains; ends with `not_found` if a remainder
/// is left after the smallest coin.
///
/// # Errors
///
/// Returns [`crate::TraceError::InvalidInstance`] for non-positive coins or
/// a negative amount.
pub fn coin_change_greedy(
    instance: &CoinChangeInstance,
) -> TraceResult<Trace<GreedyCoinSnapshot>> {
    instance.validate(Algorithm::CoinChangeGreedy)?;

    let mut state = GreedyCoinSnapshot {
        coins: instance.coins.clone(),
        current: None,
        remaining: instance.amount,
        taken: IndexMap::new(),
        coin_count: 0,
    };
    let mut rec = TraceRecorder::new(
        Algorithm::CoinChangeGreedy,
        format!("Make {} from coins {:?}", instance.amount, instance.coins),
        &state,
    );

    state.coins.sort_unstable_by(|a, b| b.cmp(a));
    rec.emit(
        StepKind::Sort,
        format!("Denominations largest first: {:?}", state.coins),
        &state,
    );

    for index in 0..state.coins.len() {
        if state.remaining == 0 {
            break;
        }
        let coin = state.coins[index];
        state.current = Some(index);
        if coin > state.remaining {
            rec.emit(
                StepKind::SkipCoin,
                format!("{coin} > remaining {}", state.remaining),
                &state,
            );
            continue;
        }

        let count = state.remaining / coin;
        state.remaining -= count * coin;
        let count = count.unsigned_abs();
        *state.taken.entry(coin).or_insert(0) += count;
        state.coin_count += count;
        rec.emit(
            StepKind::TakeCoin,
            format!("Take {count}x{coin}, remaining {}", state.remaining),
            &state,
        );
    }

    state.current = None;
    if state.remaining > 0 {
        let message = format!(
            "Greedy leaves {} unpaid after {} coins",
            state.remaining, state.coin_count
        );
        return Ok(rec.finish(StepKind::NotFound, message, &state));
    }
    let message = format!("Paid {} with {} coins", instance.amount, state.coin_count);
    Ok(rec.finish(StepKind::Complete, message, &state))
}
