//! Floyd-Warshall all-pairs shortest paths.

use serde::{Deserialize, Serialize};

use crate::error::TraceResult;
use crate::structures::{Distance, NodeId, WeightedGraph};
use crate::trace::{Algorithm, StepKind, Trace, TraceRecorder};

/// Distance matrix after each check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloydWarshallSnapshot {
    /// `dist[i][j]`: best known path length from `i` to `j`.
    pub dist: Vec<Vec<Distance>>,
    /// Intermediate node currently allowed.
    pub k: Option<NodeId>,
    /// Cell `(i, j)` under consideration.
    pub cell: Option<(NodeId, NodeId)>,
    /// `dist[i][k] + dist[k][j]` for the current cell; infinite when no cell
    /// is under consideration.
    pub candidate: Distance,
}

/// Floyd-Warshall over every ordered pair.
///
/// The matrix starts at 0 on the diagonal and ∞ elsewhere, then each edge
/// overwrites its cell with the smallest parallel weight. Undirected edges
/// fill both cells. A negative diagonal entry at the end means a negative
/// cycle and ends the trace with `negative_cycle`.
///
/// Time: O(V^3).
///
/// # Errors
///
/// Returns [`crate::TraceError::InvalidInstance`] for dangling edge endpoints.
pub fn floyd_warshall(graph: &WeightedGraph) -> TraceResult<Trace<FloydWarshallSnapshot>> {
    graph.validate(Algorithm::FloydWarshall)?;
    let n = graph.node_count();

    let mut dist = vec![vec![Distance::Infinite; n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = Distance::ZERO;
    }
    for arc in graph.arcs() {
        let w = Distance::Finite(arc.weight);
        let cell = &mut dist[arc.from][arc.to];
        if w < *cell {
            *cell = w;
        }
    }

    let mut state = FloydWarshallSnapshot {
        dist,
        k: None,
        cell: None,
        candidate: Distance::Infinite,
    };
    let mut rec = TraceRecorder::new(
        Algorithm::FloydWarshall,
        format!("{n}x{n} matrix initialized from {} edges", graph.edges.len()),
        &state,
    );

    for k in 0..n {
        state.k = Some(k);
        for i in 0..n {
            for j in 0..n {
                let through = state.dist[i][k].plus(state.dist[k][j]);
                let current = state.dist[i][j];
                state.cell = Some((i, j));
                state.candidate = through;
                rec.emit(
                    StepKind::Check,
                    format!(
                        "via {}: dist[{}][{}] = {current}, dist[{}][{}] + dist[{}][{}] = {through}",
                        graph.label(k),
                        graph.label(i),
                        graph.label(j),
                        graph.label(i),
                        graph.label(k),
                        graph.label(k),
                        graph.label(j)
                    ),
                    &state,
                );

                if through.is_finite() && through < current {
                    state.dist[i][j] = through;
                    rec.emit(
                        StepKind::Update,
                        format!(
                            "dist[{}][{}] improves {current} -> {through} via {}",
                            graph.label(i),
                            graph.label(j),
                            graph.label(k)
                        ),
                        &state,
                    );
                }
            }
        }
    }

    state.k = None;
    state.cell = None;
    state.candidate = Distance::Infinite;

    if let Some(v) = (0..n).find(|&v| state.dist[v][v].is_negative()) {
        let message = format!(
            "dist[{0}][{0}] = {1} < 0: negative cycle through {0}",
            graph.label(v),
            state.dist[v][v]
        );
        return Ok(rec.finish(StepKind::NegativeCycle, message, &state));
    }
    Ok(rec.finish(
        StepKind::Complete,
        format!("All-pairs distances computed for {n} nodes"),
        &state,
    ))
}
