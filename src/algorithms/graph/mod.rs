//! Graph cores: minimum spanning tree, shortest paths, traversal.

mod bellman_ford;
mod dfs;
mod floyd_warshall;
mod kruskal;

pub use bellman_ford::{bellman_ford, BellmanFordSnapshot};
pub use dfs::{dfs, ClassifiedEdge, DfsSnapshot, EdgeClass};
pub use floyd_warshall::{floyd_warshall, FloydWarshallSnapshot};
pub use kruskal::{kruskal, KruskalSnapshot};
