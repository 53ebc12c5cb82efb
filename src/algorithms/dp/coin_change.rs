//! Minimum-coin change by tabulation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{TraceError, TraceResult};
use crate::structures::Distance;
use crate::trace::{Algorithm, StepKind, Trace, TraceRecorder};

/// Denominations and a target amount. Shared by the DP and greedy cores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinChangeInstance {
    /// Coin denominations, each strictly positive.
    pub coins: Vec<i64>,
    /// Amount to make.
    pub amount: i64,
}

impl CoinChangeInstance {
    /// Create a new instance.
    #[must_use]
    pub fn new(coins: &[i64], amount: i64) -> Self {
        Self {
            coins: coins.to_vec(),
            amount,
        }
    }

    /// Reject non-positive coins and a negative amount.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InvalidInstance`] naming the first bad value.
    pub fn validate(&self, algorithm: Algorithm) -> TraceResult<()> {
        if self.amount < 0 {
            return Err(TraceError::invalid(
                algorithm,
                format!("amount {} is negative", self.amount),
            ));
        }
        if let Some(coin) = self.coins.iter().find(|&&c| c <= 0) {
            return Err(TraceError::invalid(
                algorithm,
                format!("coin {coin} is not positive"),
            ));
        }
        Ok(())
    }
}

/// Table state for minimum-coin change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinChangeSnapshot {
    /// `dp[x]`: fewest coins summing to `x`, ∞ if unreachable.
    pub dp: Vec<Distance>,
    /// Coin that last improved `dp[x]`.
    pub last_coin: Vec<Option<i64>>,
    /// Amount being filled or reconstructed.
    pub cell: Option<usize>,
    /// Coin under consideration.
    pub coin: Option<i64>,
    /// Reconstructed coin multiset, in order of first use.
    pub used: IndexMap<i64, u64>,
}

/// Fewest coins summing to `amount`.
///
/// For each amount `x` and each coin `c <= x` (in input order), a `try_coin`
/// step evaluates `dp[x - c] + 1`; an `improve` step follows when it beats
/// `dp[x]`. Afterwards one optimal multiset is recovered by following the
/// last improving coin down from `amount`. An unreachable amount ends with
/// `not_found`.
///
/// The table has `amount + 1` cells and is cloned into every step. Amounts
/// are bounded by [`crate::config::LimitsConfig`] only when run through
/// [`crate::runner::run_with_limits`].
///
/// # Errors
///
/// Returns [`TraceError::InvalidInstance`] if the instance fails
/// [`CoinChangeInstance::validate`] or the table cannot be allocated.
pub fn coin_change_dp(instance: &CoinChangeInstance) -> TraceResult<Trace<CoinChangeSnapshot>> {
    instance.validate(Algorithm::CoinChangeDp)?;
    let amount = usize::try_from(instance.amount).map_err(|_| {
        TraceError::invalid(Algorithm::CoinChangeDp, "amount does not fit in memory")
    })?;
    let cells = amount.saturating_add(1);

    let mut dp = super::table_row(Algorithm::CoinChangeDp, cells, Distance::Infinite)?;
    dp[0] = Distance::ZERO;
    let mut state = CoinChangeSnapshot {
        dp,
        last_coin: super::table_row(Algorithm::CoinChangeDp, cells, None)?,
        cell: None,
        coin: None,
        used: IndexMap::new(),
    };
    let mut rec = TraceRecorder::new(
        Algorithm::CoinChangeDp,
        format!(
            "dp[0] = 0, dp[1..={amount}] = ∞ with coins {:?}",
            instance.coins
        ),
        &state,
    );

    for x in 1..=amount {
        state.cell = Some(x);
        for &coin in &instance.coins {
            let Some(c) = usize::try_from(coin).ok().filter(|&c| c <= x) else {
                continue;
            };
            state.coin = Some(coin);
            let candidate = state.dp[x - c].add_weight(1);
            rec.emit(
                StepKind::TryCoin,
                format!(
                    "dp[{x}] vs dp[{}] + 1 = {candidate} using coin {coin}",
                    x - c
                ),
                &state,
            );
            if candidate.is_finite() && candidate < state.dp[x] {
                let previous = state.dp[x];
                state.dp[x] = candidate;
                state.last_coin[x] = Some(coin);
                rec.emit(
                    StepKind::Improve,
                    format!("dp[{x}] improves {previous} -> {candidate}"),
                    &state,
                );
            }
        }
    }

    state.coin = None;
    let Some(total) = state.dp[amount].finite() else {
        state.cell = None;
        let message = format!(
            "Amount {amount} cannot be made from coins {:?}",
            instance.coins
        );
        return Ok(rec.finish(StepKind::NotFound, message, &state));
    };

    let mut x = amount;
    while x > 0 {
        let Some(coin) = state.last_coin[x] else {
            break;
        };
        let Ok(c) = usize::try_from(coin) else {
            break;
        };
        *state.used.entry(coin).or_insert(0) += 1;
        state.cell = Some(x);
        state.coin = Some(coin);
        rec.emit(
            StepKind::TraceBack,
            format!("Use coin {coin}: {x} -> {}", x - c),
            &state,
        );
        x -= c;
    }

    state.cell = None;
    state.coin = None;
    let breakdown: Vec<String> = state
        .used
        .iter()
        .map(|(coin, count)| format!("{count}x{coin}"))
        .collect();
    let message = format!(
        "Minimum coins for {amount}: {total} ({})",
        breakdown.join(" + ")
    );
    Ok(rec.finish(StepKind::Complete, message, &state))
}
