use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::solver::{search, Algorithm, SearchResult};

/// Greedy best-first search: always expands the admitted node closest to the destination in a
/// straight line. Costs are not accumulated, so paths may be far from the cheapest.
///
/// Impassable edges are still never followed, which keeps reachability identical across all four
/// strategies.
pub fn greedy_best_first_search(
    graph: &Graph,
    origin: NodeId,
    destination: NodeId,
    early_exit: bool,
) -> Result<SearchResult> {
    search(graph, origin, destination, Algorithm::GreedyBestFirst, early_exit)
}
