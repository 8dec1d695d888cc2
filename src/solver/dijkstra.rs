use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::solver::{search, Algorithm, SearchResult};

/// Dijkstra's algorithm. Nodes are re-admitted whenever a strictly cheaper route to them is
/// found, so the trace may contain a node more than once.
pub fn dijkstra(
    graph: &Graph,
    origin: NodeId,
    destination: NodeId,
    early_exit: bool,
) -> Result<SearchResult> {
    search(graph, origin, destination, Algorithm::Dijkstra, early_exit)
}
