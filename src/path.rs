use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use itertools::Itertools;
use log::warn;

use crate::graph::{Graph, NodeId, Position};

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Predecessor of every node admitted during a search, in admission order. The origin maps to
/// [None].
pub type CameFrom = FxIndexMap<NodeId, Option<NodeId>>;

/// Ordered sequence of nodes from the origin (first) to the destination (last).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    nodes: Vec<NodeId>,
}

impl Path {
    pub fn new(nodes: Vec<NodeId>) -> Path {
        Path { nodes }
    }
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }
    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    /// Number of moves needed to follow the path.
    pub fn edge_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
    pub fn origin(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }
    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
    /// Sum of the edge costs along the path. Infinite if any step is impassable.
    pub fn cost(&self, graph: &Graph) -> f32 {
        self.nodes
            .iter()
            .tuple_windows()
            .map(|(&a, &b)| graph.edge_cost(a, b))
            .sum()
    }
    /// Whether every step of the path follows an edge of `graph`. Paths returned for a failed
    /// search usually are not.
    pub fn is_connected(&self, graph: &Graph) -> bool {
        self.nodes
            .iter()
            .tuple_windows()
            .all(|(&a, b)| graph.neighbors(a).contains(b))
    }
    /// World positions of the nodes, for path following or drawing.
    pub fn positions(&self, graph: &Graph) -> Vec<Position> {
        self.nodes
            .iter()
            .filter_map(|&id| graph.position(id))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a NodeId;
    type IntoIter = std::slice::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Diagnostic record of a search: every node in the order it entered the frontier, starting with
/// the origin. Nodes re-admitted with a better cost appear once per admission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchTrace {
    ordered_frontier: Vec<NodeId>,
}

impl SearchTrace {
    pub fn new() -> SearchTrace {
        SearchTrace::default()
    }
    pub(crate) fn record(&mut self, node: NodeId) {
        self.ordered_frontier.push(node);
    }
    pub fn ordered_frontier(&self) -> &[NodeId] {
        &self.ordered_frontier
    }
    pub fn len(&self) -> usize {
        self.ordered_frontier.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ordered_frontier.is_empty()
    }
    /// How many times `node` was admitted to the frontier.
    pub fn admissions(&self, node: NodeId) -> usize {
        self.ordered_frontier.iter().filter(|&&n| n == node).count()
    }
}

/// Walks back from `destination` through `came_from` until the origin or a node without recorded
/// predecessor is reached, then returns the walk in origin to destination order. The origin is
/// always the first element, so an unvisited destination gives the single node path `[origin]`.
pub fn reconstruct(origin: NodeId, destination: NodeId, came_from: &CameFrom) -> Path {
    let mut nodes = Vec::new();
    let mut current = destination;
    while current != origin {
        let Some(&parent) = came_from.get(&current) else {
            break;
        };
        if nodes.len() >= came_from.len() {
            warn!("Predecessor chain from {} does not terminate", destination);
            break;
        }
        nodes.push(current);
        match parent {
            Some(parent) => current = parent,
            None => break,
        }
    }
    nodes.push(origin);
    nodes.reverse();
    Path::new(nodes)
}
