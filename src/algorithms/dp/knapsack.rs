//! 0/1 knapsack by tabulation, with optimal-set reconstruction.

use serde::{Deserialize, Serialize};

use crate::error::{TraceError, TraceResult};
use crate::trace::{Algorithm, StepKind, Trace, TraceRecorder};

/// Item with integer weight and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackItem {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Weight, strictly positive.
    pub weight: i64,
    /// Value, non-negative.
    pub value: i64,
}

impl KnapsackItem {
    /// Unnamed item.
    #[must_use]
    pub const fn new(weight: i64, value: i64) -> Self {
        Self {
            name: None,
            weight,
            value,
        }
    }

    /// Name if given, else `#index`.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("#{}", index + 1))
    }
}

/// Items plus a capacity. Shared by the 0/1 and fractional knapsack cores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackInstance {
    /// Candidate items.
    pub items: Vec<KnapsackItem>,
    /// Weight limit.
    pub capacity: i64,
}

impl KnapsackInstance {
    /// Create an instance from `(weight, value)` pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(i64, i64)], capacity: i64) -> Self {
        Self {
            items: pairs
                .iter()
                .map(|&(weight, value)| KnapsackItem::new(weight, value))
                .collect(),
            capacity,
        }
    }

    /// Reject negative capacity, non-positive weights and negative values.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InvalidInstance`] naming the first bad field.
    pub fn validate(&self, algorithm: Algorithm) -> TraceResult<()> {
        if self.capacity < 0 {
            return Err(TraceError::invalid(
                algorithm,
                format!("capacity {} is negative", self.capacity),
            ));
        }
        for (index, item) in self.items.iter().enumerate() {
            if item.weight <= 0 {
                return Err(TraceError::invalid(
                    algorithm,
                    format!(
                        "item {} has weight {}, must be positive",
                        item.label(index),
                        item.weight
                    ),
                ));
            }
            if item.value < 0 {
                return Err(TraceError::invalid(
                    algorithm,
                    format!("item {} has negative value {}", item.label(index), item.value),
                ));
            }
        }
        Ok(())
    }
}

/// Table and reconstruction state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackSnapshot {
    /// Items in input order.
    pub items: Vec<KnapsackItem>,
    /// `table[i][j]`: best value from the first `i` items within capacity `j`.
    pub table: Vec<Vec<i64>>,
    /// Cell just filled or visited during reconstruction.
    pub cell: Option<(usize, usize)>,
    /// Indices of chosen items (ascending once reconstruction ends).
    pub selected: Vec<usize>,
    /// Weight of the chosen items.
    pub selected_weight: i64,
    /// Value of the chosen items.
    pub selected_value: i64,
}

/// Solve 0/1 knapsack, one step per table cell, then walk back from
/// `(n, W)` to recover the chosen items.
///
/// Ties between including and excluding an item resolve to exclude.
///
/// The table holds `(n + 1) x (capacity + 1)` cells and every step clones
/// it, so capacity is bounded by [`crate::config::LimitsConfig`] when run
/// through [`crate::runner::run_with_limits`]. Direct callers own that bound.
///
/// # Errors
///
/// Returns [`TraceError::InvalidInstance`] if the instance fails
/// [`KnapsackInstance::validate`], if the item values sum past `i64::MAX`,
/// or if the table cannot be allocated.
pub fn knapsack(instance: &KnapsackInstance) -> TraceResult<Trace<KnapsackSnapshot>> {
    instance.validate(Algorithm::Knapsack)?;

    let items = &instance.items;
    // Every cell is bounded by the sum of all values, so the adds below cannot overflow.
    items
        .iter()
        .try_fold(0i64, |sum, item| sum.checked_add(item.value))
        .ok_or_else(|| TraceError::invalid(Algorithm::Knapsack, "value sum overflows i64"))?;

    let n = items.len();
    let cap = usize::try_from(instance.capacity).map_err(|_| {
        TraceError::invalid(Algorithm::Knapsack, "capacity does not fit in memory")
    })?;
    let row = super::table_row(Algorithm::Knapsack, cap.saturating_add(1), 0)?;

    let mut state = KnapsackSnapshot {
        items: items.clone(),
        table: vec![row; n + 1],
        cell: None,
        selected: Vec::new(),
        selected_weight: 0,
        selected_value: 0,
    };
    let mut rec = TraceRecorder::new(
        Algorithm::Knapsack,
        format!("{} items, capacity {cap}: table of {}x{}", n, n + 1, cap + 1),
        &state,
    );

    for i in 1..=n {
        let item = &items[i - 1];
        let name = item.label(i - 1);
        for j in 0..=cap {
            let exclude = state.table[i - 1][j];
            state.cell = Some((i, j));

            let fits = usize::try_from(item.weight).ok().filter(|&w| w <= j);
            let Some(w) = fits else {
                state.table[i][j] = exclude;
                rec.emit(
                    StepKind::ItemTooHeavy,
                    format!(
                        "dp[{i}][{j}]: {name} (w={}) exceeds {j}, keep {exclude}",
                        item.weight
                    ),
                    &state,
                );
                continue;
            };

            let include = state.table[i - 1][j - w] + item.value;
            if include > exclude {
                state.table[i][j] = include;
                rec.emit(
                    StepKind::IncludeItem,
                    format!("dp[{i}][{j}]: include {name} gives {include} > {exclude}"),
                    &state,
                );
            } else {
                state.table[i][j] = exclude;
                rec.emit(
                    StepKind::ExcludeItem,
                    format!("dp[{i}][{j}]: exclude {name}, {exclude} >= {include}"),
                    &state,
                );
            }
        }
    }

    let (mut i, mut j) = (n, cap);
    while i > 0 && j > 0 {
        state.cell = Some((i, j));
        let item = &items[i - 1];
        if state.table[i][j] == state.table[i - 1][j] {
            rec.emit(
                StepKind::TraceBack,
                format!(
                    "dp[{i}][{j}] == dp[{}][{j}]: {} not taken",
                    i - 1,
                    item.label(i - 1)
                ),
                &state,
            );
        } else {
            state.selected.push(i - 1);
            state.selected_weight += item.weight;
            state.selected_value += item.value;
            // Validated positive and <= j on the include path.
            j -= usize::try_from(item.weight).unwrap_or(j);
            rec.emit(
                StepKind::SelectItem,
                format!(
                    "dp[{i}][..] differs from row {}: take {} (w={}, v={})",
                    i - 1,
                    item.label(i - 1),
                    item.weight,
                    item.value
                ),
                &state,
            );
        }
        i -= 1;
    }

    state.cell = None;
    state.selected.sort_unstable();
    let message = format!(
        "Best value {} using weight {} of {cap}",
        state.table[n][cap], state.selected_weight
    );
    Ok(rec.finish(StepKind::Complete, message, &state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scenario() -> KnapsackInstance {
        KnapsackInstance::from_pairs(&[(2, 3), (3, 4), (4, 5), (5, 6)], 8)
    }

    #[test]
    fn test_knapsack_scenario() {
        let trace = knapsack(&scenario()).expect("valid instance");
        let last = trace.final_snapshot().expect("terminal");
        assert_eq!(last.table[4][8], 10);
        assert_eq!(last.selected, vec![1, 3]);
        assert_eq!(last.selected_weight, 8);
        assert_eq!(last.selected_value, 10);
    }

    #[test]
    fn test_one_step_per_cell() {
        let trace = knapsack(&scenario()).expect("valid instance");
        let cells = trace.count(StepKind::IncludeItem)
            + trace.count(StepKind::ExcludeItem)
            + trace.count(StepKind::ItemTooHeavy);
        assert_eq!(cells, 4 * 9);
    }

    #[test]
    fn test_tie_prefers_exclude() {
        // Both items are worth the same; the second never strictly improves.
        let instance = KnapsackInstance::from_pairs(&[(1, 5), (1, 5)], 1);
        let trace = knapsack(&instance).expect("valid instance");
        let last = trace.final_snapshot().expect("terminal");
        assert_eq!(last.selected, vec![0]);
        assert_eq!(trace.count(StepKind::IncludeItem), 1);
    }

    #[test]
    fn test_zero_capacity() {
        let instance = KnapsackInstance::from_pairs(&[(1, 1)], 0);
        let trace = knapsack(&instance).expect("valid instance");
        let last = trace.final_snapshot().expect("terminal");
        assert!(last.selected.is_empty());
        assert_eq!(trace.count(StepKind::ItemTooHeavy), 1);
    }

    #[test]
    fn test_no_items() {
        let trace = knapsack(&KnapsackInstance::from_pairs(&[], 5)).expect("valid instance");
        assert_eq!(trace.kinds(), vec![StepKind::Initialize, StepKind::Complete]);
    }

    #[test]
    fn test_value_sum_overflow_is_invalid() {
        let instance = KnapsackInstance::from_pairs(&[(1, i64::MAX), (1, 1)], 2);
        let err = knapsack(&instance).unwrap_err();
        assert!(err.is_instance_error());
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_single_max_value_item() {
        let instance = KnapsackInstance::from_pairs(&[(1, i64::MAX), (1, 0)], 2);
        let trace = knapsack(&instance).expect("sum fits");
        let last = trace.final_snapshot().expect("terminal");
        assert_eq!(last.selected_value, i64::MAX);
        assert_eq!(last.selected, vec![0]);
    }

    #[test]
    fn test_huge_weight_is_too_heavy() {
        let instance = KnapsackInstance::from_pairs(&[(i64::MAX, 7), (2, 3)], 4);
        let trace = knapsack(&instance).expect("valid instance");
        let last = trace.final_snapshot().expect("terminal");
        assert_eq!(last.selected, vec![1]);
        assert_eq!(trace.count(StepKind::ItemTooHeavy), 5 + 2);
    }

    #[test]
    fn test_unallocatable_capacity_is_invalid() {
        let instance = KnapsackInstance::from_pairs(&[(1, 1)], i64::MAX);
        let err = knapsack(&instance).unwrap_err();
        assert!(err.is_instance_error());
    }

    #[test]
    fn test_invalid_instances() {
        assert!(knapsack(&KnapsackInstance::from_pairs(&[(1, 1)], -1)).is_err());
        assert!(knapsack(&KnapsackInstance::from_pairs(&[(0, 1)], 3)).is_err());
        assert!(knapsack(&KnapsackInstance::from_pairs(&[(1, -1)], 3)).is_err());
    }

    fn brute_force(instance: &KnapsackInstance) -> i64 {
        let n = instance.items.len();
        (0u32..(1 << n))
            .filter_map(|mask| {
                let chosen = instance
                    .items
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0);
                let (w, v) = chosen.fold((0, 0), |(w, v), (_, it)| (w + it.weight, v + it.value));
                (w <= instance.capacity).then_some(v)
            })
            .max()
            .unwrap_or(0)
    }

    proptest! {
        #[test]
        fn prop_selection_is_feasible_and_optimal(
            pairs in proptest::collection::vec((1i64..8, 0i64..10), 0..7),
            capacity in 0i64..20,
        ) {
            let instance = KnapsackInstance::from_pairs(&pairs, capacity);
            let trace = knapsack(&instance).expect("valid instance");
            let last = trace.final_snapshot().expect("terminal");
            let best = last.table[pairs.len()][usize::try_from(capacity).expect("non-negative")];

            prop_assert!(last.selected_weight <= capacity);
            prop_assert_eq!(last.selected_value, best);
            prop_assert_eq!(best, brute_force(&instance));
        }
    }
}
