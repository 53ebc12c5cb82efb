//! Fractional knapsack by value density.

use serde::{Deserialize, Serialize};

use crate::algorithms::dp::KnapsackInstance;
use crate::error::TraceResult;
use crate::trace::{Algorithm, StepKind, Trace, TraceRecorder};

/// Greedy fill state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionalSnapshot {
    /// Item indices ordered by value/weight, densest first.
    pub order: Vec<usize>,
    /// Position in `order` under consideration.
    pub current: Option<usize>,
    /// Fraction of each item taken, by item index, in `[0, 1]`.
    pub taken: Vec<f64>,
    /// Capacity left.
    pub remaining: f64,
    /// Value collected.
    pub total_value: f64,
}

/// Take whole items in density order while they fit, then a fraction of the
/// first one that does not, then stop.
///
/// Densities are compared exactly (`v_a * w_b` against `v_b * w_a`); equal
/// densities keep input order.
///
/// # Errors
///
/// Returns [`crate::TraceError::InvalidInstance`] for negative capacity,
/// non-positive weights or negative values.
#[allow(clippy::cast_precision_loss)]
pub fn fractional_knapsack(
    instance: &KnapsackInstance,
) -> TraceResult<Trace<FractionalSnapshot>> {
    instance.validate(Algorithm::FractionalKnapsack)?;
    let items = &instance.items;

    let mut state = FractionalSnapshot {
        order: (0..items.len()).collect(),
        current: None,
        taken: vec![0.0; items.len()],
        remaining: instance.capacity as f64,
        total_value: 0.0,
    };
    let mut rec = TraceRecorder::new(
        Algorithm::FractionalKnapsack,
        format!(
            "{} items, capacity {}",
            items.len(),
            instance.capacity
        ),
        &state,
    );

    state.order.sort_by(|&a, &b| {
        let lhs = i128::from(items[b].value) * i128::from(items[a].weight);
        let rhs = i128::from(items[a].value) * i128::from(items[b].weight);
        lhs.cmp(&rhs)
    });
    rec.emit(StepKind::Sort, "Items ordered by value/weight, densest first", &state);

    for position in 0..state.order.len() {
        if state.remaining <= 0.0 {
            break;
        }
        let index = state.order[position];
        let item = &items[index];
        let weight = item.weight as f64;
        let value = item.value as f64;
        state.current = Some(position);

        if weight <= state.remaining {
            state.taken[index] = 1.0;
            state.remaining -= weight;
            state.total_value += value;
            rec.emit(
                StepKind::TakeWhole,
                format!(
                    "Take all of {} (w={}, v={}), {} capacity left",
                    item.label(index),
                    item.weight,
                    item.value,
                    state.remaining
                ),
                &state,
            );
        } else {
            let fraction = state.remaining / weight;
            state.taken[index] = fraction;
            state.total_value += value * fraction;
            state.remaining = 0.0;
            rec.emit(
                StepKind::TakeFraction,
                format!(
                    "Take {:.3} of {} for value {:.3}",
                    fraction,
                    item.label(index),
                    value * fraction
                ),
                &state,
            );
            break;
        }
    }

    state.current = None;
    let message = format!("Total value {:.3}", state.total_value);
    Ok(rec.finish(StepKind::Complete, message, &state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_instance() {
        let instance = KnapsackInstance::from_pairs(&[(10, 60), (20, 100), (30, 120)], 50);
        let trace = fractional_knapsack(&instance).expect("valid");
        let last = trace.final_snapshot().expect("terminal");
        assert!((last.total_value - 240.0).abs() < 1e-9);
        assert_eq!(last.order, vec![0, 1, 2]);
        assert!((last.taken[2] - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(trace.count(StepKind::TakeWhole), 2);
        assert_eq!(trace.count(StepKind::TakeFraction), 1);
    }

    #[test]
    fn test_density_order() {
        let instance = KnapsackInstance::from_pairs(&[(4, 4), (1, 3), (2, 2)], 10);
        let trace = fractional_knapsack(&instance).expect("valid");
        let last = trace.final_snapshot().expect("terminal");
        // Densities 1, 3, 1: the tie keeps input order.
        assert_eq!(last.order, vec![1, 0, 2]);
        assert!((last.total_value - 9.0).abs() < 1e-9);
        assert_eq!(trace.count(StepKind::TakeFraction), 0);
    }

    #[test]
    fn test_stops_after_fraction() {
        let instance = KnapsackInstance::from_pairs(&[(5, 10), (5, 5), (1, 1)], 3);
        let trace = fractional_knapsack(&instance).expect("valid");
        let kinds = trace.kinds();
        assert_eq!(
            kinds,
            vec![
                StepKind::Initialize,
                StepKind::Sort,
                StepKind::TakeFraction,
                StepKind::Complete
            ]
        );
    }

    #[test]
    fn test_zero_capacity() {
        let instance = KnapsackInstance::from_pairs(&[(1, 1)], 0);
        let trace = fractional_knapsack(&instance).expect("valid");
        assert!(trace.final_snapshot().expect("terminal").total_value.abs() < 1e-9);
    }
}
