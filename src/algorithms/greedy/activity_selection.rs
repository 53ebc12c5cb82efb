//! Earliest-finish activity selection.

use serde::{Deserialize, Serialize};

use crate::error::{TraceError, TraceResult};
use crate::trace::{Algorithm, StepKind, Trace, TraceRecorder};

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Start time.
    pub start: i64,
    /// End time, not before `start`.
    pub end: i64,
}

impl Activity {
    /// Unnamed activity.
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        Self {
            name: None,
            start,
            end,
        }
    }

    fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("[{}, {})", self.start, self.end))
    }
}

/// Selection state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    /// Activities, ordered by end time after the `sort` step.
    pub activities: Vec<Activity>,
    /// Index under consideration.
    pub current: Option<usize>,
    /// Indices of accepted activities.
    pub selected: Vec<usize>,
    /// End of the last accepted activity.
    pub last_end: Option<i64>,
}

/// Maximum set of non-overlapping activities.
///
/// Stable sort by end time, then accept an activity iff it starts no earlier
/// than the last accepted one ends.
///
/// # Errors
///
/// Returns [`TraceError::InvalidInstance`] if an activity ends before it
/// starts.
pub fn activity_selection(activities: &[Activity]) -> TraceResult<Trace<ActivitySnapshot>> {
    if let Some(bad) = activities.iter().find(|a| a.start > a.end) {
        return Err(TraceError::invalid(
            Algorithm::ActivitySelection,
            format!(
                "activity {} ends at {} before it starts at {}",
                bad.label(),
                bad.end,
                bad.start
            ),
        ));
    }

    let mut state = ActivitySnapshot {
        activities: activities.to_vec(),
        current: None,
        selected: Vec::new(),
        last_end: None,
    };
    let mut rec = TraceRecorder::new(
        Algorithm::ActivitySelection,
        format!("{} candidate activities", activities.len()),
        &state,
    );

    state.activities.sort_by_key(|a| a.end);
    rec.emit(StepKind::Sort, "Activities ordered by end time", &state);

    for index in 0..state.activities.len() {
        state.current = Some(index);
        let activity = &state.activities[index];
        let label = activity.label();
        let (start, end) = (activity.start, activity.end);
        match state.last_end {
            Some(last) if start < last => {
                rec.emit(
                    StepKind::SkipActivity,
                    format!("Skip {label}: starts at {start} before {last}"),
                    &state,
                );
            }
            _ => {
                state.selected.push(index);
                state.last_end = Some(end);
                rec.emit(
                    StepKind::SelectActivity,
                    format!("Select {label}: free until {end}"),
                    &state,
                );
            }
        }
    }

    state.current = None;
    let message = format!("Selected {} activities", state.selected.len());
    Ok(rec.finish(StepKind::Complete, message, &state))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> Vec<Activity> {
        [(1, 4), (3, 5), (0, 6), (5, 7), (3, 9), (5, 9), (6, 10), (8, 11), (8, 12), (2, 14), (12, 16)]
            .iter()
            .map(|&(s, e)| Activity::new(s, e))
            .collect()
    }

    #[test]
    fn test_classic_selection() {
        let trace = activity_selection(&classic()).expect("valid");
        let last = trace.final_snapshot().expect("terminal");
        let chosen: Vec<(i64, i64)> = last
            .selected
            .iter()
            .map(|&i| (last.activities[i].start, last.activities[i].end))
            .collect();
        assert_eq!(chosen, vec![(1, 4), (5, 7), (8, 11), (12, 16)]);
    }

    #[test]
    fn test_one_decision_per_activity() {
        let trace = activity_selection(&classic()).expect("valid");
        assert_eq!(
            trace.count(StepKind::SelectActivity) + trace.count(StepKind::SkipActivity),
            11
        );
    }

    #[test]
    fn test_touching_intervals_compatible() {
        let trace =
            activity_selection(&[Activity::new(0, 2), Activity::new(2, 4)]).expect("valid");
        assert_eq!(trace.final_snapshot().expect("terminal").selected.len(), 2);
    }

    #[test]
    fn test_equal_ends_keep_input_order() {
        let mut first = Activity::new(1, 3);
        first.name = Some("first".into());
        let mut second = Activity::new(0, 3);
        second.name = Some("second".into());
        let trace = activity_selection(&[first, second]).expect("valid");
        let last = trace.final_snapshot().expect("terminal");
        assert_eq!(last.activities[last.selected[0]].name.as_deref(), Some("first"));
    }

    #[test]
    fn test_empty_and_invalid() {
        let trace = activity_selection(&[]).expect("valid");
        assert_eq!(
            trace.kinds(),
            vec![StepKind::Initialize, StepKind::Sort, StepKind::Complete]
        );
        assert!(activity_selection(&[Activity::new(5, 1)]).is_err());
    }
}
