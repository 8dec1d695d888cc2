//! # grid_search
//!
//! Pathfinding on weighted grid graphs with four interchangeable strategies:
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search),
//! [Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm),
//! [greedy best-first search](https://en.wikipedia.org/wiki/Best-first_search) and
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm).
//!
//! Every node carries a terrain cost and moving between two nodes costs the sum of both terrain
//! costs. An infinite terrain cost makes a node impassable. Besides the [Path], each search returns
//! a [SearchTrace] listing nodes in the order they entered the frontier, which is what
//! visualisations of the search play back.
pub mod error;
pub mod graph;
pub mod grid;
pub mod path;
pub mod priority_queue;
pub mod solver;

use log::info;

pub use error::{EmptyQueueError, Error, Result};
pub use graph::{Graph, Node, NodeId, Position};
pub use grid::{Connectivity, GridBuilder, GridGraph};
pub use path::{reconstruct, Path, SearchTrace};
pub use priority_queue::PriorityQueue;
pub use solver::{
    astar, breadth_first_search, dijkstra, greedy_best_first_search, search, Algorithm,
    SearchConfig, SearchResult,
};

use grid_util::point::Point;

/// Inline capacity of neighbour lists; enough for a full 8-neighbourhood.
pub const N_SMALLVEC_SIZE: usize = 8;

/// Couples a [GridGraph] with a [SearchConfig] and translates world positions or grid cells into
/// nodes before searching, the way an agent walking the grid would use it.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    pub grid: GridGraph,
    pub config: SearchConfig,
}

impl Pathfinder {
    pub fn new(grid: GridGraph) -> Pathfinder {
        Pathfinder {
            grid,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(grid: GridGraph, config: SearchConfig) -> Pathfinder {
        Pathfinder { grid, config }
    }

    /// Searches between the nodes closest to `from` and `to`.
    pub fn find_path(&self, from: Position, to: Position) -> Result<SearchResult> {
        let graph = self.grid.graph();
        let origin = graph.closest_node(from).ok_or(Error::EmptyGraph)?;
        let destination = graph.closest_node(to).ok_or(Error::EmptyGraph)?;
        info!(
            "Searching from {} (closest to {}) to {} (closest to {})",
            origin, from, destination, to
        );
        self.config.search(graph, origin, destination)
    }

    /// Searches between two grid cells.
    pub fn find_path_between(&self, start: Point, goal: Point) -> Result<SearchResult> {
        let origin = self.grid.node_at(start).ok_or(Error::OutOfBounds(start))?;
        let destination = self.grid.node_at(goal).ok_or(Error::OutOfBounds(goal))?;
        self.config.search(self.grid.graph(), origin, destination)
    }

    /// Grid cells along a search result's path.
    pub fn path_points(&self, path: &Path) -> Vec<Point> {
        path.nodes()
            .iter()
            .filter_map(|&id| self.grid.point_of(id))
            .collect()
    }
}
