//! Longest common subsequence of two strings.

use serde::{Deserialize, Serialize};

use crate::trace::{Algorithm, StepKind, Trace, TraceRecorder};

/// Table and trace-back state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcsSnapshot {
    /// First string, one entry per character.
    pub a: Vec<char>,
    /// Second string, one entry per character.
    pub b: Vec<char>,
    /// `table[i][j]`: LCS length of `a[..i]` and `b[..j]`.
    pub table: Vec<Vec<usize>>,
    /// Cell just filled or visited.
    pub cell: Option<(usize, usize)>,
    /// Cells visited during trace-back.
    pub path: Vec<(usize, usize)>,
    /// Subsequence recovered so far.
    pub subsequence: String,
}

/// Fill the LCS table (`match` or `mismatch` per cell), then trace back one
/// longest subsequence.
///
/// On a mismatch during trace-back the walk moves up when
/// `table[i-1][j] >= table[i][j-1]`, otherwise left.
#[must_use]
pub fn lcs(a: &str, b: &str) -> Trace<LcsSnapshot> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut state = LcsSnapshot {
        a,
        b,
        table: vec![vec![0; n + 1]; m + 1],
        cell: None,
        path: Vec::new(),
        subsequence: String::new(),
    };
    let mut rec = TraceRecorder::new(
        Algorithm::Lcs,
        format!("Table of {}x{}", m + 1, n + 1),
        &state,
    );

    for i in 1..=m {
        for j in 1..=n {
            state.cell = Some((i, j));
            let (x, y) = (state.a[i - 1], state.b[j - 1]);
            if x == y {
                let value = state.table[i - 1][j - 1] + 1;
                state.table[i][j] = value;
                rec.emit(
                    StepKind::Match,
                    format!("'{x}' == '{y}': dp[{i}][{j}] = dp[{}][{}] + 1 = {value}", i - 1, j - 1),
                    &state,
                );
            } else {
                let value = state.table[i - 1][j].max(state.table[i][j - 1]);
                state.table[i][j] = value;
                rec.emit(
                    StepKind::Mismatch,
                    format!("'{x}' != '{y}': dp[{i}][{j}] = max(top, left) = {value}"),
                    &state,
                );
            }
        }
    }

    let (mut i, mut j) = (m, n);
    let mut reversed = Vec::new();
    while i > 0 && j > 0 {
        state.cell = Some((i, j));
        state.path.push((i, j));
        let x = state.a[i - 1];
        if x == state.b[j - 1] {
            reversed.push(x);
            state.subsequence = reversed.iter().rev().collect();
            rec.emit(
                StepKind::SelectItem,
                format!("'{x}' is part of the subsequence"),
                &state,
            );
            i -= 1;
            j -= 1;
        } else if state.table[i - 1][j] >= state.table[i][j - 1] {
            rec.emit(StepKind::TraceBack, format!("Move up from ({i}, {j})"), &state);
            i -= 1;
        } else {
            rec.emit(StepKind::TraceBack, format!("Move left from ({i}, {j})"), &state);
            j -= 1;
        }
    }

    state.cell = None;
    let message = format!(
        "LCS length {}: \"{}\"",
        state.table[m][n], state.subsequence
    );
    rec.finish(StepKind::Complete, message, &state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_subsequence(needle: &str, hay: &str) -> bool {
        let mut it = hay.chars();
        needle.chars().all(|c| it.any(|h| h == c))
    }

    #[test]
    fn test_lcs_classic() {
        let trace = lcs("ABCBDAB", "BDCABA");
        let last = trace.final_snapshot().expect("terminal");
        assert_eq!(last.table[7][6], 4);
        assert_eq!(last.subsequence, "BCBA");
        assert!(is_subsequence(&last.subsequence, "ABCBDAB"));
        assert!(is_subsequence(&last.subsequence, "BDCABA"));
    }

    #[test]
    fn test_one_step_per_cell() {
        let trace = lcs("AGGTAB", "GXTXAYB");
        assert_eq!(
            trace.count(StepKind::Match) + trace.count(StepKind::Mismatch),
            6 * 7
        );
        assert_eq!(trace.final_snapshot().expect("terminal").subsequence, "GTAB");
    }

    #[test]
    fn test_select_count_equals_length() {
        let trace = lcs("XMJYAUZ", "MZJAWXU");
        let last = trace.final_snapshot().expect("terminal");
        assert_eq!(trace.count(StepKind::SelectItem), last.table[7][7]);
        assert_eq!(last.subsequence, "MJAU");
    }

    #[test]
    fn test_empty_strings() {
        let trace = lcs("", "ABC");
        assert_eq!(trace.kinds(), vec![StepKind::Initialize, StepKind::Complete]);
        assert_eq!(trace.final_snapshot().expect("terminal").subsequence, "");
    }

    #[test]
    fn test_no_common_characters() {
        let trace = lcs("AB", "CD");
        assert_eq!(trace.count(StepKind::Match), 0);
        assert_eq!(trace.count(StepKind::SelectItem), 0);
    }
}
