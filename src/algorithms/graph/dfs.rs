//! Iterative depth-first search with edge classification.
//!
//! Uses an explicit stack and a per-node neighbor cursor, so a node is popped
//! only after every neighbor has been scanned. Neighbors are scanned in
//! ascending node id, which makes the traversal order unique.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::TraceResult;
use crate::structures::{NodeId, WeightedGraph};
use crate::trace::{Algorithm, StepKind, Trace, TraceRecorder};

/// DFS edge class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeClass {
    /// Discovered a new node.
    Tree,
    /// Leads to a node still on the stack.
    Back,
    /// Leads to a finished descendant (directed only).
    Forward,
    /// Leads to a finished node in another subtree (directed only).
    Cross,
}

/// An edge together with its DFS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedEdge {
    /// Node being scanned.
    pub from: NodeId,
    /// Neighbor reached.
    pub to: NodeId,
    /// Class assigned when first seen.
    pub class: EdgeClass,
}

/// Traversal state after each decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfsSnapshot {
    /// Explicit stack, bottom first.
    pub stack: Vec<NodeId>,
    /// Nodes discovered so far.
    pub visited: Vec<bool>,
    /// Nodes whose neighbors are exhausted.
    pub finished: Vec<bool>,
    /// Discovery order.
    pub order: Vec<NodeId>,
    /// Node on top of the stack.
    pub current: Option<NodeId>,
    /// Classified edges in the order they were seen.
    pub edges: Vec<ClassifiedEdge>,
}

/// Depth-first search from `start`.
///
/// An undirected edge is classified once, from whichever endpoint scans it
/// first; parallel undirected edges between the same pair count as one.
///
/// # Errors
///
/// Returns [`crate::TraceError::InvalidInstance`] if `start` or an edge
/// endpoint is out of range.
pub fn dfs(graph: &WeightedGraph, start: NodeId) -> TraceResult<Trace<DfsSnapshot>> {
    graph.validate(Algorithm::Dfs)?;
    graph.validate_node(start, Algorithm::Dfs, "start")?;

    let n = graph.node_count();
    let adjacency = graph.adjacency();
    let mut cursor = vec![0usize; n];
    let mut discovered_at = vec![0usize; n];
    let mut seen_pairs: HashSet<(NodeId, NodeId)> = HashSet::new();

    let mut state = DfsSnapshot {
        stack: Vec::new(),
        visited: vec![false; n],
        finished: vec![false; n],
        order: Vec::new(),
        current: None,
        edges: Vec::new(),
    };
    let mut rec = TraceRecorder::new(
        Algorithm::Dfs,
        format!("DFS from {} over {n} nodes", graph.label(start)),
        &state,
    );

    state.stack.push(start);
    state.current = Some(start);
    rec.emit(
        StepKind::Push,
        format!("Push {}", graph.label(start)),
        &state,
    );

    while let Some(&u) = state.stack.last() {
        state.current = Some(u);
        if !state.visited[u] {
            state.visited[u] = true;
            discovered_at[u] = state.order.len();
            state.order.push(u);
            rec.emit(StepKind::Visit, format!("Visit {}", graph.label(u)), &state);
        }

        let mut descended = false;
        while let Some(&(v, _)) = adjacency[u].get(cursor[u]) {
            cursor[u] += 1;

            if !graph.directed && !seen_pairs.insert((u.min(v), u.max(v))) {
                continue;
            }

            if !state.visited[v] {
                state.edges.push(ClassifiedEdge {
                    from: u,
                    to: v,
                    class: EdgeClass::Tree,
                });
                state.stack.push(v);
                rec.emit(
                    StepKind::TreeEdge,
                    format!(
                        "Tree edge {} -> {}: push {}",
                        graph.label(u),
                        graph.label(v),
                        graph.label(v)
                    ),
                    &state,
                );
                descended = true;
                break;
            }

            let (class, kind, why) = if !state.finished[v] {
                (EdgeClass::Back, StepKind::BackEdge, "still on the stack")
            } else if discovered_at[u] < discovered_at[v] {
                (
                    EdgeClass::Forward,
                    StepKind::ForwardEdge,
                    "finished descendant",
                )
            } else {
                (EdgeClass::Cross, StepKind::CrossEdge, "finished elsewhere")
            };
            state.edges.push(ClassifiedEdge { from: u, to: v, class });
            rec.emit(
                kind,
                format!(
                    "{} -> {}: {} is {why}",
                    graph.label(u),
                    graph.label(v),
                    graph.label(v)
                ),
                &state,
            );
        }

        if !descended {
            state.stack.pop();
            state.finished[u] = true;
            state.current = state.stack.last().copied();
            rec.emit(
                StepKind::Pop,
                format!("Pop {}: all neighbors explored", graph.label(u)),
                &state,
            );
        }
    }

    state.current = None;
    let order: Vec<&str> = state.order.iter().map(|&v| graph.label(v)).collect();
    let message = format!("Traversal order: {}", order.join(" "));
    Ok(rec.finish(StepKind::Complete, message, &state))
}
