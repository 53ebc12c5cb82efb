//! Instance files and the single dispatch entry point.
//!
//! An [`Instance`] is a closed, serde-tagged enum keyed by `algorithm`, so
//! instance files read naturally:
//!
//! ```yaml
//! algorithm: kruskal
//! graph:
//!   nodes: [A, B, C]
//!   edges:
//!     - [A, B, 4]
//!     - [B, C, 1]
//! ```
//!
//! [`run`] checks size limits, dispatches to the matching core and wraps its
//! snapshots in the [`Snapshot`] enum so every trace has one type.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, info_span};

use crate::algorithms::backtracking::{self, BacktrackSnapshot};
use crate::algorithms::dp::{
    self, CoinChangeInstance, CoinChangeSnapshot, FibonacciSnapshot, KnapsackInstance,
    KnapsackSnapshot, LcsSnapshot,
};
use crate::algorithms::graph::{
    self as graph_cores, BellmanFordSnapshot, DfsSnapshot, FloydWarshallSnapshot, KruskalSnapshot,
};
use crate::algorithms::greedy::{
    self, Activity, ActivitySnapshot, FractionalSnapshot, GreedyCoinSnapshot,
};
use crate::algorithms::sorting::{self, SortSnapshot};
use crate::config::LimitsConfig;
use crate::error::{TraceError, TraceResult};
use crate::structures::WeightedGraph;
use crate::trace::{Algorithm, Trace};

/// Graph as written in instance files: labelled nodes and
/// `[from, to, weight]` triples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSpec {
    /// Node labels; ids follow list order.
    pub nodes: Vec<String>,
    /// `(from, to, weight)` by label.
    #[serde(default)]
    pub edges: Vec<(String, String, i64)>,
    /// Whether edges are one-way.
    #[serde(default)]
    pub directed: bool,
}

impl GraphSpec {
    /// Resolve labels into a [`WeightedGraph`].
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::UnknownNode`] for an edge naming a missing label.
    pub fn to_graph(&self) -> TraceResult<WeightedGraph> {
        let nodes: Vec<&str> = self.nodes.iter().map(String::as_str).collect();
        let edges: Vec<(&str, &str, i64)> = self
            .edges
            .iter()
            .map(|(from, to, weight)| (from.as_str(), to.as_str(), *weight))
            .collect();
        WeightedGraph::from_labels(&nodes, &edges, self.directed)
    }
}

/// Problem instance for one algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum Instance {
    /// Array to quicksort.
    Quicksort {
        /// Input values.
        array: Vec<i64>,
    },
    /// Array to heapsort.
    Heapsort {
        /// Input values.
        array: Vec<i64>,
    },
    /// Undirected graph for a minimum spanning tree.
    Kruskal {
        /// Input graph.
        graph: GraphSpec,
    },
    /// Graph and source label for single-source shortest paths.
    BellmanFord {
        /// Input graph.
        graph: GraphSpec,
        /// Source node label.
        source: String,
    },
    /// Graph for all-pairs shortest paths.
    FloydWarshall {
        /// Input graph.
        graph: GraphSpec,
    },
    /// Graph and start label for depth-first search.
    Dfs {
        /// Input graph.
        graph: GraphSpec,
        /// Start node label.
        start: String,
    },
    /// 0/1 knapsack.
    Knapsack(KnapsackInstance),
    /// Minimum-coin change.
    CoinChangeDp(CoinChangeInstance),
    /// Longest common subsequence.
    Lcs {
        /// First string.
        a: String,
        /// Second string.
        b: String,
    },
    /// Fibonacci number.
    Fibonacci {
        /// Index, at most 93.
        n: usize,
    },
    /// Greedy coin change.
    CoinChangeGreedy(CoinChangeInstance),
    /// Activity selection.
    ActivitySelection {
        /// Candidate activities.
        activities: Vec<Activity>,
    },
    /// Fractional knapsack.
    FractionalKnapsack(KnapsackInstance),
    /// Subset enumeration.
    Subsets {
        /// Input elements.
        items: Vec<i64>,
    },
    /// Permutation enumeration.
    Permutations {
        /// Input elements.
        items: Vec<i64>,
    },
    /// Combination enumeration.
    Combinations {
        /// Input elements.
        items: Vec<i64>,
        /// Combination size; defaults to `ceil(n / 2)`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        k: Option<usize>,
    },
}

impl Instance {
    /// Algorithm this instance is for.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        match self {
            Self::Quicksort { .. } => Algorithm::Quicksort,
            Self::Heapsort { .. } => Algorithm::Heapsort,
            Self::Kruskal { .. } => Algorithm::Kruskal,
            Self::BellmanFord { .. } => Algorithm::BellmanFord,
            Self::FloydWarshall { .. } => Algorithm::FloydWarshall,
            Self::Dfs { .. } => Algorithm::Dfs,
            Self::Knapsack(_) => Algorithm::Knapsack,
            Self::CoinChangeDp(_) => Algorithm::CoinChangeDp,
            Self::Lcs { .. } => Algorithm::Lcs,
            Self::Fibonacci { .. } => Algorithm::Fibonacci,
            Self::CoinChangeGreedy(_) => Algorithm::CoinChangeGreedy,
            Self::ActivitySelection { .. } => Algorithm::ActivitySelection,
            Self::FractionalKnapsack(_) => Algorithm::FractionalKnapsack,
            Self::Subsets { .. } => Algorithm::Subsets,
            Self::Permutations { .. } => Algorithm::Permutations,
            Self::Combinations { .. } => Algorithm::Combinations,
        }
    }

    /// Parse an instance from YAML.
    ///
    /// # Errors
    ///
    /// Returns error if the YAML is malformed or names no known algorithm.
    pub fn from_yaml(yaml: &str) -> TraceResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse an instance from JSON.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or names no known algorithm.
    pub fn from_json(json: &str) -> TraceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load an instance file; `.json` files are read as JSON, anything else
    /// as YAML.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> TraceResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Reject instances larger than `limits`.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::LimitExceeded`] naming the first oversized
    /// dimension.
    pub fn check_limits(&self, limits: &LimitsConfig) -> TraceResult<()> {
        let algorithm = self.algorithm();
        let ensure = |what: &'static str, actual: usize, limit: usize| {
            if actual > limit {
                Err(TraceError::LimitExceeded {
                    algorithm,
                    what,
                    actual,
                    limit,
                })
            } else {
                Ok(())
            }
        };
        let non_negative = |value: i64| usize::try_from(value).unwrap_or(0);

        match self {
            Self::Quicksort { array } | Self::Heapsort { array } => {
                ensure("array length", array.len(), limits.max_array_len)
            }
            Self::Kruskal { graph }
            | Self::BellmanFord { graph, .. }
            | Self::FloydWarshall { graph }
            | Self::Dfs { graph, .. } => {
                ensure("node count", graph.nodes.len(), limits.max_graph_nodes)
            }
            Self::Knapsack(k) => {
                ensure("item count", k.items.len(), limits.max_knapsack_items)?;
                ensure(
                    "capacity",
                    non_negative(k.capacity),
                    limits.max_knapsack_capacity,
                )
            }
            Self::CoinChangeDp(c) | Self::CoinChangeGreedy(c) => {
                ensure("denominations", c.coins.len(), limits.max_coins)?;
                ensure("amount", non_negative(c.amount), limits.max_coin_target)
            }
            Self::Lcs { a, b } => {
                ensure("first string length", a.chars().count(), limits.max_string_len)?;
                ensure("second string length", b.chars().count(), limits.max_string_len)
            }
            Self::Fibonacci { .. } => Ok(()),
            Self::ActivitySelection { activities } => {
                ensure("activity count", activities.len(), limits.max_greedy_items)
            }
            Self::FractionalKnapsack(k) => {
                ensure("item count", k.items.len(), limits.max_greedy_items)
            }
            Self::Subsets { items } | Self::Combinations { items, .. } => {
                ensure("item count", items.len(), limits.max_backtracking_items)
            }
            Self::Permutations { items } => {
                ensure("item count", items.len(), limits.max_permutation_items)
            }
        }
    }
}

/// Snapshot of any core, so traces from different algorithms share a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Snapshot {
    /// Quicksort or heapsort.
    Sort(SortSnapshot),
    /// Kruskal.
    Kruskal(KruskalSnapshot),
    /// Bellman-Ford.
    BellmanFord(BellmanFordSnapshot),
    /// Floyd-Warshall.
    FloydWarshall(FloydWarshallSnapshot),
    /// DFS.
    Dfs(DfsSnapshot),
    /// 0/1 knapsack.
    Knapsack(KnapsackSnapshot),
    /// Minimum-coin change.
    CoinChange(CoinChangeSnapshot),
    /// LCS.
    Lcs(LcsSnapshot),
    /// Fibonacci.
    Fibonacci(FibonacciSnapshot),
    /// Greedy coin change.
    GreedyCoin(GreedyCoinSnapshot),
    /// Activity selection.
    Activity(ActivitySnapshot),
    /// Fractional knapsack.
    Fractional(FractionalSnapshot),
    /// Subsets, permutations, combinations.
    Backtrack(BacktrackSnapshot),
}

macro_rules! snapshot_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Snapshot {
                fn from(snapshot: $ty) -> Self {
                    Self::$variant(snapshot)
                }
            }
        )*
    };
}

snapshot_from!(
    Sort(SortSnapshot),
    Kruskal(KruskalSnapshot),
    BellmanFord(BellmanFordSnapshot),
    FloydWarshall(FloydWarshallSnapshot),
    Dfs(DfsSnapshot),
    Knapsack(KnapsackSnapshot),
    CoinChange(CoinChangeSnapshot),
    Lcs(LcsSnapshot),
    Fibonacci(FibonacciSnapshot),
    GreedyCoin(GreedyCoinSnapshot),
    Activity(ActivitySnapshot),
    Fractional(FractionalSnapshot),
    Backtrack(BacktrackSnapshot),
);

fn erase<S: Into<Snapshot>>(trace: Trace<S>) -> Trace<Snapshot> {
    trace.map_snapshots(Into::into)
}

/// Run `instance` under the default limits.
///
/// # Errors
///
/// Returns an instance error if the instance is invalid or too large.
pub fn run(instance: &Instance) -> TraceResult<Trace<Snapshot>> {
    run_with_limits(instance, &LimitsConfig::default())
}

/// Run `instance` after checking it against `limits`.
///
/// # Errors
///
/// Returns [`TraceError::LimitExceeded`] for oversized instances and
/// [`TraceError::InvalidInstance`] or [`TraceError::UnknownNode`] for
/// malformed ones.
pub fn run_with_limits(instance: &Instance, limits: &LimitsConfig) -> TraceResult<Trace<Snapshot>> {
    let algorithm = instance.algorithm();
    let span = info_span!("run", %algorithm);
    let _guard = span.enter();

    if let Err(e) = instance.check_limits(limits) {
        debug!(error = %e, "instance rejected");
        return Err(e);
    }

    let trace = dispatch(instance)?;
    info!(steps = trace.len(), outcome = ?trace.outcome(), "trace recorded");
    Ok(trace)
}

fn dispatch(instance: &Instance) -> TraceResult<Trace<Snapshot>> {
    Ok(match instance {
        Instance::Quicksort { array } => erase(sorting::quicksort(array)),
        Instance::Heapsort { array } => erase(sorting::heapsort(array)),
        Instance::Kruskal { graph } => erase(graph_cores::kruskal(&graph.to_graph()?)?),
        Instance::BellmanFord { graph, source } => {
            let graph = graph.to_graph()?;
            let source = graph.resolve(source)?;
            erase(graph_cores::bellman_ford(&graph, source)?)
        }
        Instance::FloydWarshall { graph } => {
            erase(graph_cores::floyd_warshall(&graph.to_graph()?)?)
        }
        Instance::Dfs { graph, start } => {
            let graph = graph.to_graph()?;
            let start = graph.resolve(start)?;
            erase(graph_cores::dfs(&graph, start)?)
        }
        Instance::Knapsack(k) => erase(dp::knapsack(k)?),
        Instance::CoinChangeDp(c) => erase(dp::coin_change_dp(c)?),
        Instance::Lcs { a, b } => erase(dp::lcs(a, b)),
        Instance::Fibonacci { n } => erase(dp::fibonacci(*n)?),
        Instance::CoinChangeGreedy(c) => erase(greedy::coin_change_greedy(c)?),
        Instance::ActivitySelection { activities } => {
            erase(greedy::activity_selection(activities)?)
        }
        Instance::FractionalKnapsack(k) => erase(greedy::fractional_knapsack(k)?),
        Instance::Subsets { items } => erase(backtracking::subsets(items)),
        Instance::Permutations { items } => erase(backtracking::permutations(items)),
        Instance::Combinations { items, k } => erase(match k {
            Some(k) => backtracking::combinations_of_size(items, *k),
            None => backtracking::combinations(items),
        }),
    })
}
