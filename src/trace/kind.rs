//! Closed tags for algorithms and the decisions they record.

use serde::{Deserialize, Serialize};

/// Algorithm that produced a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Lomuto-partition quicksort.
    Quicksort,
    /// In-place heapsort over a max-heap.
    Heapsort,
    /// Kruskal's minimum spanning tree.
    Kruskal,
    /// Bellman-Ford single-source shortest paths.
    BellmanFord,
    /// Floyd-Warshall all-pairs shortest paths.
    FloydWarshall,
    /// Iterative depth-first search with edge classification.
    Dfs,
    /// 0/1 knapsack by tabulation.
    Knapsack,
    /// Minimum-coin change by tabulation.
    CoinChangeDp,
    /// Longest common subsequence.
    Lcs,
    /// Tabulated Fibonacci.
    Fibonacci,
    /// Largest-first greedy coin change.
    CoinChangeGreedy,
    /// Earliest-finish activity selection.
    ActivitySelection,
    /// Ratio-ordered fractional knapsack.
    FractionalKnapsack,
    /// Subset enumeration.
    Subsets,
    /// Permutation enumeration.
    Permutations,
    /// Fixed-size combination enumeration.
    Combinations,
}

impl Algorithm {
    /// Every algorithm, in catalog order.
    pub const ALL: [Self; 16] = [
        Self::Quicksort,
        Self::Heapsort,
        Self::Kruskal,
        Self::BellmanFord,
        Self::FloydWarshall,
        Self::Dfs,
        Self::Knapsack,
        Self::CoinChangeDp,
        Self::Lcs,
        Self::Fibonacci,
        Self::CoinChangeGreedy,
        Self::ActivitySelection,
        Self::FractionalKnapsack,
        Self::Subsets,
        Self::Permutations,
        Self::Combinations,
    ];

    /// Stable snake_case identifier (matches the serde name).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quicksort => "quicksort",
            Self::Heapsort => "heapsort",
            Self::Kruskal => "kruskal",
            Self::BellmanFord => "bellman_ford",
            Self::FloydWarshall => "floyd_warshall",
            Self::Dfs => "dfs",
            Self::Knapsack => "knapsack",
            Self::CoinChangeDp => "coin_change_dp",
            Self::Lcs => "lcs",
            Self::Fibonacci => "fibonacci",
            Self::CoinChangeGreedy => "coin_change_greedy",
            Self::ActivitySelection => "activity_selection",
            Self::FractionalKnapsack => "fractional_knapsack",
            Self::Subsets => "subsets",
            Self::Permutations => "permutations",
            Self::Combinations => "combinations",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision type recorded by a step.
///
/// One closed enumeration is shared by every core; each algorithm uses the
/// subset that matches its control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    // ===== Lifecycle =====
    /// First step of every trace.
    Initialize,
    /// Successful terminal step.
    Complete,
    /// Terminal step when no solution exists (unreachable target, leftover change).
    NotFound,
    /// Terminal step when a negative cycle makes distances meaningless.
    NegativeCycle,

    // ===== Sorting =====
    /// Pivot chosen for a partition.
    SelectPivot,
    /// Two elements compared.
    Compare,
    /// Two elements exchanged.
    Swap,
    /// Pivot moved to its final index.
    PivotPlaced,
    /// Sift-down invoked on a heap node.
    Heapify,
    /// Heap root moved into the sorted tail.
    Extract,

    // ===== Graph =====
    /// Edge under consideration.
    Examine,
    /// Edge accepted into the spanning tree.
    Add,
    /// Edge rejected because it closes a cycle.
    Reject,
    /// Start of a Bellman-Ford pass.
    IterationStart,
    /// Distance improved through an edge.
    Relax,
    /// A full pass changed nothing.
    NoChange,
    /// Candidate path through `k` compared.
    Check,
    /// Matrix entry improved.
    Update,
    /// Node pushed on the DFS stack.
    Push,
    /// Node visited for the first time.
    Visit,
    /// Edge discovered a new node.
    TreeEdge,
    /// Edge to an ancestor still on the stack.
    BackEdge,
    /// Edge to an already finished descendant.
    ForwardEdge,
    /// Edge to a finished node in another subtree.
    CrossEdge,
    /// Node popped after all neighbors were explored.
    Pop,

    // ===== Dynamic programming =====
    /// Including the item improves the cell.
    IncludeItem,
    /// Excluding the item is at least as good.
    ExcludeItem,
    /// Item weight exceeds the cell capacity.
    ItemTooHeavy,
    /// Move along the reconstruction path.
    TraceBack,
    /// Item or character recorded in the reconstructed solution.
    SelectItem,
    /// Candidate `dp[x - c] + 1` evaluated.
    TryCoin,
    /// Cell improved by a candidate.
    Improve,
    /// Characters matched.
    Match,
    /// Characters differ.
    Mismatch,
    /// Cell computed from its predecessors.
    Compute,

    // ===== Greedy =====
    /// Input reordered by the greedy key.
    Sort,
    /// Coins of one denomination taken.
    TakeCoin,
    /// Denomination larger than the remainder.
    SkipCoin,
    /// Activity accepted.
    SelectActivity,
    /// Activity overlaps the last accepted one.
    SkipActivity,
    /// Whole item taken.
    TakeWhole,
    /// Fraction of an item taken.
    TakeFraction,

    // ===== Backtracking =====
    /// Element added to the partial solution.
    Include,
    /// Element left out of the partial solution.
    Exclude,
    /// Element chosen at the current depth.
    TryChoice,
    /// Last choice undone.
    Backtrack,
    /// Complete solution reached.
    SolutionFound,
}

impl StepKind {
    /// Whether this kind may end a trace.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::NotFound | Self::NegativeCycle)
    }

    /// Stable snake_case identifier (matches the serde name).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Complete => "complete",
            Self::NotFound => "not_found",
            Self::NegativeCycle => "negative_cycle",
            Self::SelectPivot => "select_pivot",
            Self::Compare => "compare",
            Self::Swap => "swap",
            Self::PivotPlaced => "pivot_placed",
            Self::Heapify => "heapify",
            Self::Extract => "extract",
            Self::Examine => "examine",
            Self::Add => "add",
            Self::Reject => "reject",
            Self::IterationStart => "iteration_start",
            Self::Relax => "relax",
            Self::NoChange => "no_change",
            Self::Check => "check",
            Self::Update => "update",
            Self::Push => "push",
            Self::Visit => "visit",
            Self::TreeEdge => "tree_edge",
            Self::BackEdge => "back_edge",
            Self::ForwardEdge => "forward_edge",
            Self::CrossEdge => "cross_edge",
            Self::Pop => "pop",
            Self::IncludeItem => "include_item",
            Self::ExcludeItem => "exclude_item",
            Self::ItemTooHeavy => "item_too_heavy",
            Self::TraceBack => "trace_back",
            Self::SelectItem => "select_item",
            Self::TryCoin => "try_coin",
            Self::Improve => "improve",
            Self::Match => "match",
            Self::Mismatch => "mismatch",
            Self::Compute => "compute",
            Self::Sort => "sort",
            Self::TakeCoin => "take_coin",
            Self::SkipCoin => "skip_coin",
            Self::SelectActivity => "select_activity",
            Self::SkipActivity => "skip_activity",
            Self::TakeWhole => "take_whole",
            Self::TakeFraction => "take_fraction",
            Self::Include => "include",
            Self::Exclude => "exclude",
            Self::TryChoice => "try_choice",
            Self::Backtrack => "backtrack",
            Self::SolutionFound => "solution_found",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
