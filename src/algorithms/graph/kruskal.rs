//! Minimum spanning tree via Kruskal's algorithm (undirected graphs).
//!
//! Edges are stably sorted by weight, so equal weights keep input order.
//! Cycle detection uses [`UnionFind`].

use serde::{Deserialize, Serialize};

use crate::error::{TraceError, TraceResult};
use crate::structures::{Edge, UnionFind, WeightedGraph};
use crate::trace::{Algorithm, StepKind, Trace, TraceRecorder};

/// State after each Kruskal decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KruskalSnapshot {
    /// All edges in processing order.
    pub sorted_edges: Vec<Edge>,
    /// Index into `sorted_edges` under consideration.
    pub current: Option<usize>,
    /// Edges accepted so far.
    pub mst: Vec<Edge>,
    /// Edges rejected as cycle-closing.
    pub rejected: Vec<Edge>,
    /// Union-Find parent pointers.
    pub parent: Vec<usize>,
    /// Number of components in the forest.
    pub components: usize,
    /// Sum of accepted edge weights.
    pub total_weight: i64,
}

/// Kruskal's minimum spanning tree.
///
/// Every edge gets an `examine` step followed by `add` or `reject`. A
/// disconnected graph ends with a spanning forest.
///
/// Time: O(E log E) for sorting + O(E α(V)) for union-find.
///
/// # Errors
///
/// Returns [`TraceError::InvalidInstance`] for directed graphs, dangling
/// edge endpoints, or a tree weight outside the `i64` range.
pub fn kruskal(graph: &WeightedGraph) -> TraceResult<Trace<KruskalSnapshot>> {
    if graph.directed {
        return Err(TraceError::invalid(
            Algorithm::Kruskal,
            "Kruskal's MST only works on undirected graphs",
        ));
    }
    graph.validate(Algorithm::Kruskal)?;

    let n = graph.node_count();
    let mut sorted_edges = graph.edges.clone();
    sorted_edges.sort_by_key(|e| e.weight);

    let mut uf = UnionFind::make_set(n);
    let mut state = KruskalSnapshot {
        sorted_edges,
        current: None,
        mst: Vec::new(),
        rejected: Vec::new(),
        parent: uf.parents().to_vec(),
        components: uf.set_count(),
        total_weight: 0,
    };
    let mut rec = TraceRecorder::new(
        Algorithm::Kruskal,
        format!(
            "{} edges sorted by weight over {n} nodes",
            state.sorted_edges.len()
        ),
        &state,
    );

    for index in 0..state.sorted_edges.len() {
        let edge = state.sorted_edges[index];
        let label = graph.describe(&edge);
        state.current = Some(index);
        rec.emit(StepKind::Examine, format!("Examine {label}"), &state);

        let merged = uf.union(edge.from, edge.to);
        state.parent = uf.parents().to_vec();
        state.components = uf.set_count();
        if merged {
            state.total_weight = state
                .total_weight
                .checked_add(edge.weight)
                .ok_or_else(|| {
                    TraceError::invalid(
                        Algorithm::Kruskal,
                        format!("MST weight overflows i64 at {label}"),
                    )
                })?;
            state.mst.push(edge);
            rec.emit(
                StepKind::Add,
                format!("Add {label}: joins two components"),
                &state,
            );
        } else {
            state.rejected.push(edge);
            rec.emit(
                StepKind::Reject,
                format!("Reject {label}: would form a cycle"),
                &state,
            );
        }
    }

    state.current = None;
    let message = if n == 0 || state.mst.len() + 1 == n {
        format!(
            "MST complete: {} edges, total weight {}",
            state.mst.len(),
            state.total_weight
        )
    } else {
        format!(
            "Graph is disconnected: spanning forest of {} components, total weight {}",
            state.components, state.total_weight
        )
    };
    Ok(rec.finish(StepKind::Complete, message, &state))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> WeightedGraph {
        WeightedGraph::from_labels(
            &["A", "B", "C", "D", "E"],
            &[
                ("A", "B", 4),
                ("A", "D", 2),
                ("B", "C", 5),
                ("B", "D", 1),
                ("C", "E", 2),
                ("D", "E", 8),
                ("D", "C", 6),
            ],
            false,
        )
        .expect("labels resolve")
    }

    #[test]
    fn test_kruskal_scenario() {
        let graph = scenario();
        let trace = kruskal(&graph).expect("valid graph");
        let last = trace.final_snapshot().expect("terminal");

        let labels: Vec<String> = last.mst.iter().map(|e| graph.describe(e)).collect();
        assert_eq!(labels, vec!["B-D:1", "A-D:2", "C-E:2", "B-C:5"]);
        assert_eq!(last.total_weight, 10);
        assert_eq!(last.mst.len(), graph.node_count() - 1);
        assert_eq!(last.components, 1);
    }

    #[test]
    fn test_every_edge_examined_once() {
        let graph = scenario();
        let trace = kruskal(&graph).expect("valid graph");
        assert_eq!(trace.count(StepKind::Examine), graph.edges.len());
        assert_eq!(
            trace.count(StepKind::Add) + trace.count(StepKind::Reject),
            graph.edges.len()
        );
    }

    #[test]
    fn test_examine_precedes_decision() {
        let trace = kruskal(&scenario()).expect("valid graph");
        let kinds = trace.kinds();
        for (i, kind) in kinds.iter().enumerate() {
            if matches!(kind, StepKind::Add | StepKind::Reject) {
                assert_eq!(kinds[i - 1], StepKind::Examine);
            }
        }
    }

    #[test]
    fn test_ties_keep_input_order() {
        let graph = WeightedGraph::with_nodes(3, false)
            .edge(1, 2, 1)
            .edge(0, 1, 1)
            .edge(0, 2, 1);
        let trace = kruskal(&graph).expect("valid graph");
        let last = trace.final_snapshot().expect("terminal");
        assert_eq!(last.mst, vec![Edge::new(1, 2, 1), Edge::new(0, 1, 1)]);
        assert_eq!(last.rejected, vec![Edge::new(0, 2, 1)]);
    }

    #[test]
    fn test_disconnected_forest() {
        let graph = WeightedGraph::with_nodes(4, false).edge(0, 1, 3).edge(2, 3, 4);
        let trace = kruskal(&graph).expect("valid graph");
        let last = trace.final_snapshot().expect("terminal");
        assert_eq!(last.components, 2);
        assert!(trace.last().expect("terminal").message().contains("disconnected"));
    }

    #[test]
    fn test_single_node() {
        let trace = kruskal(&WeightedGraph::with_nodes(1, false)).expect("valid graph");
        assert_eq!(trace.kinds(), vec![StepKind::Initialize, StepKind::Complete]);
    }

    #[test]
    fn test_weight_overflow_is_invalid() {
        let graph = WeightedGraph::from_labels(
            &["A", "B", "C"],
            &[("A", "B", i64::MAX), ("B", "C", 1)],
            false,
        )
        .expect("labels resolve");
        let err = kruskal(&graph).unwrap_err();
        assert!(err.is_instance_error());
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_extreme_weights_that_fit() {
        let graph = WeightedGraph::with_nodes(3, false)
            .edge(0, 1, i64::MIN)
            .edge(1, 2, i64::MAX)
            .edge(0, 2, i64::MAX);
        let trace = kruskal(&graph).expect("valid graph");
        let last = trace.final_snapshot().expect("terminal");
        assert_eq!(last.total_weight, -1);
        assert_eq!(last.rejected, vec![Edge::new(0, 2, i64::MAX)]);
    }

    #[test]
    fn test_directed_rejected() {
        let err = kruskal(&WeightedGraph::with_nodes(2, true)).unwrap_err();
        assert!(err.is_instance_error());
    }
}
