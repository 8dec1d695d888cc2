//! The four search strategies share a single traversal routine, [search]. They differ only in the
//! frontier they pop from, whether accumulated cost is tracked and the priority a node is
//! admitted with, all of which [Algorithm] decides.
use core::fmt;
use std::collections::VecDeque;

use fxhash::FxHashMap;
use log::{debug, info};

use crate::error::{EmptyQueueError, Error, Result};
use crate::graph::{Graph, NodeId};
use crate::path::{reconstruct, CameFrom, Path, SearchTrace};
use crate::priority_queue::PriorityQueue;

pub mod astar;
pub mod bfs;
pub mod dijkstra;
pub mod greedy;

pub use astar::astar;
pub use bfs::breadth_first_search;
pub use dijkstra::dijkstra;
pub use greedy::greedy_best_first_search;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Algorithm {
    /// FIFO frontier, ignores costs. Finds paths with the fewest moves.
    BreadthFirst,
    /// Priority frontier ordered by accumulated cost.
    Dijkstra,
    /// Priority frontier ordered by straight-line distance to the destination, ignores costs.
    GreedyBestFirst,
    /// Priority frontier ordered by accumulated cost plus the scaled straight-line distance to the
    /// destination. A factor of zero behaves like [Dijkstra](Algorithm::Dijkstra), large factors
    /// approach [GreedyBestFirst](Algorithm::GreedyBestFirst).
    AStar { heuristic_factor: f32 },
}

impl Algorithm {
    pub fn astar(heuristic_factor: f32) -> Algorithm {
        Algorithm::AStar { heuristic_factor }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::BreadthFirst => "breadth-first search",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::GreedyBestFirst => "greedy best-first search",
            Algorithm::AStar { .. } => "A*",
        }
    }

    /// Cost-aware algorithms re-admit a node whenever a cheaper route to it shows up; the others
    /// admit every node at most once.
    pub fn tracks_cost(&self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::AStar { .. })
    }

    pub fn uses_priority_queue(&self) -> bool {
        !matches!(self, Algorithm::BreadthFirst)
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Algorithm::AStar { heuristic_factor }
                if !(heuristic_factor.is_finite() && heuristic_factor >= 0.0) =>
            {
                Err(Error::InvalidHeuristicFactor(heuristic_factor))
            }
            _ => Ok(()),
        }
    }

    /// Priority of `next` when admitted with accumulated cost `cost`.
    fn priority(&self, graph: &Graph, cost: f32, next: NodeId, destination: NodeId) -> f32 {
        match *self {
            Algorithm::BreadthFirst => 0.0,
            Algorithm::Dijkstra => cost,
            Algorithm::GreedyBestFirst => graph.distance(next, destination),
            Algorithm::AStar { heuristic_factor } => {
                cost + graph.distance(next, destination) * heuristic_factor
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Algorithm::AStar { heuristic_factor } => {
                write!(f, "A* (heuristic factor {})", heuristic_factor)
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// Search settings, kept together so callers can store them next to a graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    /// Stop as soon as the destination is popped from the frontier instead of draining it.
    pub early_exit: bool,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            algorithm: Algorithm::astar(1.0),
            early_exit: false,
        }
    }
}

impl SearchConfig {
    pub fn new(algorithm: Algorithm) -> SearchConfig {
        SearchConfig {
            algorithm,
            ..SearchConfig::default()
        }
    }

    pub fn with_early_exit(mut self, early_exit: bool) -> SearchConfig {
        self.early_exit = early_exit;
        self
    }

    pub fn search(&self, graph: &Graph, origin: NodeId, destination: NodeId) -> Result<SearchResult> {
        search(graph, origin, destination, self.algorithm, self.early_exit)
    }
}

/// Outcome of a search. When `found` is false, `path` is the best-effort reconstruction towards
/// the destination and should be shown as incomplete.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub found: bool,
    pub path: Path,
    pub trace: SearchTrace,
    /// Number of nodes popped from the frontier.
    pub expanded: usize,
}

/// Frontier policy: a FIFO queue or a priority queue.
trait Frontier {
    fn push(&mut self, node: NodeId, priority: f32);
    fn pop(&mut self) -> std::result::Result<NodeId, EmptyQueueError>;
    fn is_empty(&self) -> bool;
}

impl Frontier for VecDeque<NodeId> {
    fn push(&mut self, node: NodeId, _priority: f32) {
        self.push_back(node);
    }
    fn pop(&mut self) -> std::result::Result<NodeId, EmptyQueueError> {
        self.pop_front().ok_or(EmptyQueueError)
    }
    fn is_empty(&self) -> bool {
        VecDeque::is_empty(self)
    }
}

impl Frontier for PriorityQueue<NodeId> {
    fn push(&mut self, node: NodeId, priority: f32) {
        self.insert(node, priority);
    }
    fn pop(&mut self) -> std::result::Result<NodeId, EmptyQueueError> {
        self.extract_min()
    }
    fn is_empty(&self) -> bool {
        PriorityQueue::is_empty(self)
    }
}

/// Searches a path from `origin` to `destination` with the given algorithm.
///
/// Both nodes must belong to `graph`. Edges with infinite cost are never followed. With
/// `early_exit` the search stops once the destination is popped from the frontier; otherwise the
/// whole reachable component is explored, which makes the cost-aware algorithms settle on the
/// cheapest path they can find.
pub fn search(
    graph: &Graph,
    origin: NodeId,
    destination: NodeId,
    algorithm: Algorithm,
    early_exit: bool,
) -> Result<SearchResult> {
    graph.check_node(origin)?;
    graph.check_node(destination)?;
    algorithm.validate()?;

    let result = if origin == destination {
        let mut trace = SearchTrace::new();
        trace.record(origin);
        SearchResult {
            found: true,
            path: Path::new(vec![origin]),
            trace,
            expanded: 0,
        }
    } else if algorithm.uses_priority_queue() {
        let frontier = PriorityQueue::<NodeId, f32>::new();
        traverse(graph, origin, destination, algorithm, early_exit, frontier)?
    } else {
        let frontier = VecDeque::<NodeId>::new();
        traverse(graph, origin, destination, algorithm, early_exit, frontier)?
    };

    debug!(
        "{} from {} to {}: found {}, {} expanded, {} admitted, path of {} nodes",
        algorithm,
        origin,
        destination,
        result.found,
        result.expanded,
        result.trace.len(),
        result.path.len()
    );
    if !result.found {
        info!("{} is not reachable from {} using {}", destination, origin, algorithm);
    }
    Ok(result)
}

fn traverse<F: Frontier>(
    graph: &Graph,
    origin: NodeId,
    destination: NodeId,
    algorithm: Algorithm,
    early_exit: bool,
    mut frontier: F,
) -> Result<SearchResult> {
    let mut trace = SearchTrace::new();
    let mut came_from = CameFrom::default();
    let mut cost_so_far: FxHashMap<NodeId, f32> = FxHashMap::default();

    frontier.push(origin, 0.0);
    trace.record(origin);
    came_from.insert(origin, None);
    cost_so_far.insert(origin, 0.0);

    let mut found = false;
    let mut expanded = 0;
    while !frontier.is_empty() && !(found && early_exit) {
        let current = frontier.pop()?;
        expanded += 1;
        if current == destination {
            found = true;
        }
        let current_cost = cost_so_far
            .get(&current)
            .copied()
            .unwrap_or(f32::INFINITY);

        for &next in graph.neighbors(current) {
            if next == current || !graph.contains(next) {
                continue;
            }
            let edge_cost = graph.edge_cost(current, next);
            if !edge_cost.is_finite() {
                continue;
            }
            let new_cost = if algorithm.tracks_cost() {
                let new_cost = current_cost + edge_cost;
                if !new_cost.is_finite()
                    || cost_so_far.get(&next).is_some_and(|&known| new_cost >= known)
                {
                    continue;
                }
                cost_so_far.insert(next, new_cost);
                new_cost
            } else {
                if came_from.contains_key(&next) {
                    continue;
                }
                0.0
            };
            frontier.push(next, algorithm.priority(graph, new_cost, next, destination));
            trace.record(next);
            came_from.insert(next, Some(current));
        }
    }

    Ok(SearchResult {
        found,
        path: reconstruct(origin, destination, &came_from),
        trace,
        expanded,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::graph::Position;

    pub(crate) const ALL_ALGORITHMS: [Algorithm; 4] = [
        Algorithm::BreadthFirst,
        Algorithm::Dijkstra,
        Algorithm::GreedyBestFirst,
        Algorithm::AStar {
            heuristic_factor: 1.0,
        },
    ];

    /// Nodes along the x axis, connected in both directions.
    pub(crate) fn line_graph(costs: &[f32]) -> (Graph, Vec<NodeId>) {
        let mut graph = Graph::new();
        let ids = costs
            .iter()
            .enumerate()
            .map(|(x, &c)| graph.add_node(c, Position::new(x as f32, 0.0)).unwrap())
            .collect::<Vec<_>>();
        for pair in ids.windows(2) {
            graph.add_undirected_edge(pair[0], pair[1]).unwrap();
        }
        (graph, ids)
    }

    /// `o - p1 - t` is the short way, `o - r - q - t` the cheap one. Dijkstra admits `t` through
    /// `p1` before it finds the cheaper route through `q`.
    pub(crate) fn detour_graph() -> (Graph, [NodeId; 5]) {
        let mut graph = Graph::new();
        let o = graph.add_node(0.0, Position::new(0.0, 0.0)).unwrap();
        let p1 = graph.add_node(5.0, Position::new(1.0, 1.0)).unwrap();
        let r = graph.add_node(3.0, Position::new(0.0, -1.0)).unwrap();
        let q = graph.add_node(0.0, Position::new(1.0, -1.0)).unwrap();
        let t = graph.add_node(0.0, Position::new(2.0, 0.0)).unwrap();
        for (a, b) in [(o, p1), (o, r), (r, q), (p1, t), (q, t)] {
            graph.add_undirected_edge(a, b).unwrap();
        }
        (graph, [o, p1, r, q, t])
    }

    #[test]
    fn three_node_line_is_found_by_all() {
        let (graph, n) = line_graph(&[1.0, 1.0, 1.0]);
        for algorithm in ALL_ALGORITHMS {
            for early_exit in [false, true] {
                let result = search(&graph, n[0], n[2], algorithm, early_exit).unwrap();
                assert!(result.found, "{algorithm}");
                assert_eq!(result.path.nodes(), &n[..], "{algorithm}");
                assert_eq!(result.trace.ordered_frontier(), &n[..], "{algorithm}");
            }
        }
    }

    #[test]
    fn impassable_middle_blocks_all() {
        let (graph, n) = line_graph(&[1.0, f32::INFINITY, 1.0]);
        for algorithm in ALL_ALGORITHMS {
            let result = search(&graph, n[0], n[2], algorithm, false).unwrap();
            assert!(!result.found, "{algorithm}");
            assert_eq!(result.path.nodes(), &[n[0]], "{algorithm}");
            assert_eq!(result.trace.ordered_frontier(), &[n[0]], "{algorithm}");
        }
    }

    #[test]
    fn same_origin_and_destination() {
        let (graph, n) = line_graph(&[1.0, 1.0]);
        for algorithm in ALL_ALGORITHMS {
            let result = search(&graph, n[1], n[1], algorithm, false).unwrap();
            assert!(result.found);
            assert_eq!(result.path.nodes(), &[n[1]]);
            assert_eq!(result.trace.ordered_frontier(), &[n[1]]);
        }
    }

    #[test]
    fn rejects_foreign_nodes_and_bad_factors() {
        let (graph, n) = line_graph(&[1.0, 1.0]);
        let missing = NodeId::new(7);
        for algorithm in ALL_ALGORITHMS {
            assert_eq!(
                search(&graph, missing, n[0], algorithm, false),
                Err(Error::UnknownNode(missing))
            );
            assert_eq!(
                search(&graph, n[0], missing, algorithm, true),
                Err(Error::UnknownNode(missing))
            );
        }
        for factor in [-1.0, f32::INFINITY, f32::NAN] {
            assert!(matches!(
                search(&graph, n[0], n[1], Algorithm::astar(factor), false),
                Err(Error::InvalidHeuristicFactor(_))
            ));
        }
    }

    #[test]
    fn early_exit_still_expands_destination() {
        // 0 - 1 - 2 - 3: once 2 is popped its neighbour 3 is admitted before the loop stops.
        let (graph, n) = line_graph(&[1.0, 1.0, 1.0, 1.0]);
        let result = search(&graph, n[0], n[2], Algorithm::BreadthFirst, true).unwrap();
        assert!(result.found);
        assert_eq!(result.expanded, 3);
        assert_eq!(result.trace.ordered_frontier(), &n[..]);
        let full = search(&graph, n[0], n[2], Algorithm::BreadthFirst, false).unwrap();
        assert_eq!(full.expanded, 4);
        assert_eq!(full.path, result.path);
    }

    #[test]
    fn malformed_neighbours_are_skipped() {
        let mut graph = Graph::new();
        let a = graph.add_node(1.0, Position::new(0.0, 0.0)).unwrap();
        let b = graph.add_node(1.0, Position::new(1.0, 0.0)).unwrap();
        graph.add_edge(a, a).unwrap();
        graph.add_edge(a, b).unwrap();
        for algorithm in ALL_ALGORITHMS {
            let result = search(&graph, a, b, algorithm, false).unwrap();
            assert!(result.found);
            assert_eq!(result.path.nodes(), &[a, b]);
            // b has no outgoing edges, the reverse direction is unreachable.
            let back = search(&graph, b, a, algorithm, false).unwrap();
            assert!(!back.found);
            assert_eq!(back.path.nodes(), &[b]);
        }
    }

    #[test]
    fn searches_are_repeatable() {
        let (graph, n) = line_graph(&[1.0, 4.0, 2.0, 1.0, 3.0]);
        for algorithm in ALL_ALGORITHMS {
            let first = search(&graph, n[4], n[0], algorithm, false).unwrap();
            let second = search(&graph, n[4], n[0], algorithm, false).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn config_defaults_to_astar() {
        let config = SearchConfig::default();
        assert_eq!(config.algorithm, Algorithm::astar(1.0));
        assert!(!config.early_exit);
        let config = SearchConfig::new(Algorithm::Dijkstra).with_early_exit(true);
        let (graph, n) = line_graph(&[1.0, 1.0, 1.0]);
        let result = config.search(&graph, n[0], n[2]).unwrap();
        assert!(result.found);
        assert_eq!(result.path.cost(&graph), 4.0);
    }
}
