//! Weighted graph instances shared by the graph cores.
//!
//! Nodes are dense ids `0..n` with display labels. Neighbor iteration is
//! always in ascending node id (ties by input order), which is what makes
//! traversal order unique.

use serde::{Deserialize, Serialize};

use crate::error::{TraceError, TraceResult};
use crate::trace::Algorithm;

/// Dense node index.
pub type NodeId = usize;

/// A weighted edge (or arc, in a directed graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Tail node.
    pub from: NodeId,
    /// Head node.
    pub to: NodeId,
    /// Edge weight.
    pub weight: i64,
}

impl Edge {
    /// Create a new edge.
    #[must_use]
    pub const fn new(from: NodeId, to: NodeId, weight: i64) -> Self {
        Self { from, to, weight }
    }

    /// Same edge traversed the other way.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            weight: self.weight,
        }
    }
}

/// Graph as node labels plus an edge list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedGraph {
    /// Display label per node id.
    pub nodes: Vec<String>,
    /// Edges in input order.
    #[serde(default)]
    pub edges: Vec<Edge>,
    /// Whether edges are one-way.
    #[serde(default)]
    pub directed: bool,
}

impl WeightedGraph {
    /// Create a graph with `n` nodes labelled `A`, `B`, ... (`N26`, `N27`, ...
    /// past `Z`) and no edges.
    #[must_use]
    pub fn with_nodes(n: usize, directed: bool) -> Self {
        Self {
            nodes: (0..n).map(default_label).collect(),
            edges: Vec::new(),
            directed,
        }
    }

    /// Build from labels and `(from, to, weight)` triples naming those labels.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::UnknownNode`] if an edge names a missing label.
    pub fn from_labels(
        nodes: &[&str],
        edges: &[(&str, &str, i64)],
        directed: bool,
    ) -> TraceResult<Self> {
        let mut graph = Self {
            nodes: nodes.iter().map(|s| (*s).to_string()).collect(),
            edges: Vec::with_capacity(edges.len()),
            directed,
        };
        for &(from, to, weight) in edges {
            let u = graph.resolve(from)?;
            let v = graph.resolve(to)?;
            graph.edges.push(Edge::new(u, v, weight));
        }
        Ok(graph)
    }

    /// Add an edge (builder style).
    #[must_use]
    pub fn edge(mut self, from: NodeId, to: NodeId, weight: i64) -> Self {
        self.edges.push(Edge::new(from, to, weight));
        self
    }

    /// Look up a node id by label.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::UnknownNode`] if no node has this label.
    pub fn resolve(&self, label: &str) -> TraceResult<NodeId> {
        self.nodes
            .iter()
            .position(|n| n == label)
            .ok_or_else(|| TraceError::UnknownNode {
                label: label.to_string(),
            })
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Label of `id`.
    #[must_use]
    pub fn label(&self, id: NodeId) -> &str {
        self.nodes.get(id).map_or("?", String::as_str)
    }

    /// Render an edge as `A-B:4` (or `A->B:4` when directed).
    #[must_use]
    pub fn describe(&self, edge: &Edge) -> String {
        let arrow = if self.directed { "->" } else { "-" };
        format!(
            "{}{arrow}{}:{}",
            self.label(edge.from),
            self.label(edge.to),
            edge.weight
        )
    }

    /// Check that every edge references an existing node.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InvalidInstance`] for a dangling endpoint.
    pub fn validate(&self, algorithm: Algorithm) -> TraceResult<()> {
        let n = self.node_count();
        for (index, edge) in self.edges.iter().enumerate() {
            if edge.from >= n || edge.to >= n {
                return Err(TraceError::invalid(
                    algorithm,
                    format!(
                        "edge {index} ({} -> {}) references a node outside 0..{n}",
                        edge.from, edge.to
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Check that `node` exists.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InvalidInstance`] if it does not.
    pub fn validate_node(&self, node: NodeId, algorithm: Algorithm, role: &str) -> TraceResult<()> {
        if node >= self.node_count() {
            return Err(TraceError::invalid(
                algorithm,
                format!("{role} node {node} >= num_nodes {}", self.node_count()),
            ));
        }
        Ok(())
    }

    /// Directed arcs: the edge list itself, or each undirected edge in both
    /// directions (forward first), preserving input order.
    #[must_use]
    pub fn arcs(&self) -> Vec<Edge> {
        if self.directed {
            return self.edges.clone();
        }
        self.edges
            .iter()
            .flat_map(|e| [*e, e.reversed()])
            .collect()
    }

    /// Outgoing neighbors per node, ascending by neighbor id.
    #[must_use]
    pub fn adjacency(&self) -> Vec<Vec<(NodeId, i64)>> {
        let mut adj = vec![Vec::new(); self.node_count()];
        for arc in self.arcs() {
            if arc.from < adj.len() {
                adj[arc.from].push((arc.to, arc.weight));
            }
        }
        for list in &mut adj {
            list.sort_by_key(|&(to, _)| to);
        }
        adj
    }
}

fn default_label(i: usize) -> String {
    if i < 26 {
        char::from(b'A' + i as u8).to_string()
    } else {
        format!("N{i}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_nodes_labels() {
        let g = WeightedGraph::with_nodes(28, false);
        assert_eq!(g.label(0), "A");
        assert_eq!(g.label(25), "Z");
        assert_eq!(g.label(26), "N26");
        assert_eq!(g.label(99), "?");
    }

    #[test]
    fn test_from_labels() {
        let g = WeightedGraph::from_labels(&["A", "B"], &[("A", "B", 3)], false)
            .expect("valid labels");
        assert_eq!(g.edges, vec![Edge::new(0, 1, 3)]);
        assert_eq!(g.describe(&g.edges[0]), "A-B:3");
    }

    #[test]
    fn test_from_labels_unknown() {
        let err = WeightedGraph::from_labels(&["A"], &[("A", "Q", 1)], false).unwrap_err();
        assert!(matches!(err, TraceError::UnknownNode { label } if label == "Q"));
    }

    #[test]
    fn test_validate_dangling_edge() {
        let g = WeightedGraph::with_nodes(2, true).edge(0, 5, 1);
        assert!(g.validate(Algorithm::BellmanFord).is_err());
        assert!(g.validate_node(1, Algorithm::Dfs, "start").is_ok());
        assert!(g.validate_node(2, Algorithm::Dfs, "start").is_err());
    }

    #[test]
    fn test_arcs_undirected_both_ways() {
        let g = WeightedGraph::with_nodes(2, false).edge(0, 1, 7);
        assert_eq!(g.arcs(), vec![Edge::new(0, 1, 7), Edge::new(1, 0, 7)]);
    }

    #[test]
    fn test_adjacency_sorted() {
        let g = WeightedGraph::with_nodes(4, true)
            .edge(0, 3, 1)
            .edge(0, 1, 1)
            .edge(0, 2, 1);
        let adj = g.adjacency();
        let order: Vec<NodeId> = adj[0].iter().map(|&(v, _)| v).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_describe_directed() {
        let g = WeightedGraph::with_nodes(2, true).edge(1, 0, -2);
        assert_eq!(g.describe(&g.edges[0]), "B->A:-2");
    }
}
