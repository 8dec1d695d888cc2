use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::solver::{search, Algorithm, SearchResult};

/// A* search with the straight-line distance to the destination, scaled by `heuristic_factor`, as
/// heuristic. Factors above one trade path quality for fewer expansions (weighted A*). The
/// heuristic is not guaranteed to be admissible, so even a factor of one can return a
/// suboptimal path on some cost layouts.
pub fn astar(
    graph: &Graph,
    origin: NodeId,
    destination: NodeId,
    heuristic_factor: f32,
    early_exit: bool,
) -> Result<SearchResult> {
    search(
        graph,
        origin,
        destination,
        Algorithm::AStar { heuristic_factor },
        early_exit,
    )
}
