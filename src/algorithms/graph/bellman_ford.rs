//! Bellman-Ford single-source shortest paths.
//!
//! Runs exactly `|V| - 1` passes over every arc, then one verification sweep.
//! If an arc is still relaxable after the passes, the trace ends with
//! `negative_cycle` rather than presenting those distances as final.

use serde::{Deserialize, Serialize};

use crate::error::TraceResult;
use crate::structures::{Distance, Edge, NodeId, WeightedGraph};
use crate::trace::{Algorithm, StepKind, Trace, TraceRecorder};

/// Distance table after each decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BellmanFordSnapshot {
    /// Source node.
    pub source: NodeId,
    /// Best known distance per node.
    pub distances: Vec<Distance>,
    /// Predecessor on the best known path.
    pub predecessors: Vec<Option<NodeId>>,
    /// 1-based pass number (0 before the first pass).
    pub pass: usize,
    /// Arc under consideration.
    pub edge: Option<Edge>,
    /// Relaxations performed in the current pass.
    pub relaxed_in_pass: usize,
    /// Arc proving a reachable negative cycle.
    pub negative_cycle_edge: Option<Edge>,
}

/// Bellman-Ford from `source`.
///
/// Undirected edges are relaxed in both directions (forward first).
///
/// Time: O(V * E).
///
/// # Errors
///
/// Returns [`crate::TraceError::InvalidInstance`] if `source` or an edge
/// endpoint is out of range.
pub fn bellman_ford(
    graph: &WeightedGraph,
    source: NodeId,
) -> TraceResult<Trace<BellmanFordSnapshot>> {
    graph.validate(Algorithm::BellmanFord)?;
    graph.validate_node(source, Algorithm::BellmanFord, "source")?;

    let n = graph.node_count();
    let arcs = graph.arcs();

    let mut state = BellmanFordSnapshot {
        source,
        distances: vec![Distance::Infinite; n],
        predecessors: vec![None; n],
        pass: 0,
        edge: None,
        relaxed_in_pass: 0,
        negative_cycle_edge: None,
    };
    state.distances[source] = Distance::ZERO;
    let mut rec = TraceRecorder::new(
        Algorithm::BellmanFord,
        format!(
            "dist[{}] = 0, all others ∞; {} passes over {} arcs",
            graph.label(source),
            n.saturating_sub(1),
            arcs.len()
        ),
        &state,
    );

    for pass in 1..n {
        state.pass = pass;
        state.edge = None;
        state.relaxed_in_pass = 0;
        rec.emit(
            StepKind::IterationStart,
            format!("Pass {pass} of {}", n - 1),
            &state,
        );

        for arc in &arcs {
            state.edge = Some(*arc);
            let via = state.distances[arc.from].add_weight(arc.weight);
            let label = graph.describe(arc);
            rec.emit(
                StepKind::Examine,
                format!(
                    "Examine {label}: dist[{}] + {} = {via} vs dist[{}] = {}",
                    graph.label(arc.from),
                    arc.weight,
                    graph.label(arc.to),
                    state.distances[arc.to]
                ),
                &state,
            );

            if via.is_finite() && via < state.distances[arc.to] {
                state.distances[arc.to] = via;
                state.predecessors[arc.to] = Some(arc.from);
                state.relaxed_in_pass += 1;
                rec.emit(
                    StepKind::Relax,
                    format!("Relax {label}: dist[{}] = {via}", graph.label(arc.to)),
                    &state,
                );
            }
        }

        if state.relaxed_in_pass == 0 {
            state.edge = None;
            rec.emit(
                StepKind::NoChange,
                format!("Pass {pass} relaxed nothing; distances are stable"),
                &state,
            );
        }
    }

    state.edge = None;
    if let Some(arc) = arcs.iter().find(|arc| {
        let via = state.distances[arc.from].add_weight(arc.weight);
        via.is_finite() && via < state.distances[arc.to]
    }) {
        state.negative_cycle_edge = Some(*arc);
        let message = format!(
            "{} still relaxes after {} passes: negative cycle reachable from {}",
            graph.describe(arc),
            n.saturating_sub(1),
            graph.label(source)
        );
        return Ok(rec.finish(StepKind::NegativeCycle, message, &state));
    }

    let summary: Vec<String> = state
        .distances
        .iter()
        .enumerate()
        .map(|(v, d)| format!("{}={d}", graph.label(v)))
        .collect();
    let message = format!("Shortest distances: {}", summary.join(", "));
    Ok(rec.finish(StepKind::Complete, message, &state))
}
