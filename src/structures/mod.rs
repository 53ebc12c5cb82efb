//! Supporting data structures shared by the algorithm cores.

pub mod distance;
pub mod graph;
pub mod union_find;

pub use distance::Distance;
pub use graph::{Edge, NodeId, WeightedGraph};
pub use union_find::UnionFind;
