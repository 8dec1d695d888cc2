use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::solver::{search, Algorithm, SearchResult};

/// Breadth-first search. Terrain costs only matter in that impassable edges are never followed,
/// so the returned path has the fewest moves rather than the lowest cost.
///
/// Skipping impassable edges here, although no cost is accumulated, keeps reachability identical
/// across all four strategies.
pub fn breadth_first_search(
    graph: &Graph,
    origin: NodeId,
    destination: NodeId,
    early_exit: bool,
) -> Result<SearchResult> {
    search(graph, origin, destination, Algorithm::BreadthFirst, early_exit)
}
