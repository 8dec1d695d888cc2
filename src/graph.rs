//! Arena-backed navigation graph. Nodes are addressed by [NodeId] and refer to their neighbours
//! by id, so the graph owns every node and adjacency never forms ownership cycles.
use core::fmt;
use std::collections::VecDeque;

use log::warn;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::error::{check_terrain_cost, Error, Result};
use crate::N_SMALLVEC_SIZE;

/// Stable handle of a node inside a [Graph].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> NodeId {
        NodeId(index)
    }
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// World-space position of a node. Only the heuristic, the closest-node lookup and debug output
/// look at it; search correctness never depends on it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Position {
        Position { x, y }
    }
    pub fn distance_squared(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
    /// Straight-line (Euclidean) distance.
    pub fn distance(&self, other: &Position) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    terrain_cost: f32,
    position: Position,
    neighbors: SmallVec<[NodeId; N_SMALLVEC_SIZE]>,
}

impl Node {
    /// Cost contributed by this node to every edge touching it. [f32::INFINITY] marks the node as
    /// impassable.
    pub fn terrain_cost(&self) -> f32 {
        self.terrain_cost
    }
    pub fn position(&self) -> Position {
        self.position
    }
    /// Neighbours in insertion order, which is also the order in which searches expand them.
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }
    pub fn is_passable(&self) -> bool {
        self.terrain_cost.is_finite()
    }
}

/// Owns all [Node]s. Searches borrow the graph immutably, so its topology cannot change while one
/// is running and any number of searches may share it across threads.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    pub fn with_capacity(capacity: usize) -> Graph {
        Graph {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Adds an unconnected node and returns its id. Ids are handed out densely starting at zero.
    pub fn add_node(&mut self, terrain_cost: f32, position: Position) -> Result<NodeId> {
        let terrain_cost = check_terrain_cost(terrain_cost)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            terrain_cost,
            position,
            neighbors: SmallVec::new(),
        });
        Ok(id)
    }

    /// Appends `to` to the neighbour list of `from`. Self edges and repeated edges are ignored.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        self.check_node(from)?;
        self.check_node(to)?;
        if from == to {
            warn!("Ignoring self edge on {}", from);
            return Ok(());
        }
        let neighbors = &mut self.nodes[from.0].neighbors;
        if !neighbors.contains(&to) {
            neighbors.push(to);
        }
        Ok(())
    }

    /// Connects both nodes to each other.
    pub fn add_undirected_edge(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        self.add_edge(a, b)?;
        self.add_edge(b, a)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub(crate) fn check_node(&self, id: NodeId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(Error::UnknownNode(id))
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(ix, n)| (NodeId(ix), n))
    }

    /// Neighbours of `id`, or an empty slice for an id that is not part of the graph.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.neighbors()).unwrap_or(&[])
    }

    pub fn position(&self, id: NodeId) -> Option<Position> {
        self.node(id).map(|n| n.position)
    }

    /// Changes the terrain cost of a node. Only possible between searches, as searches hold a
    /// shared borrow of the graph.
    pub fn set_terrain_cost(&mut self, id: NodeId, cost: f32) -> Result<()> {
        self.check_node(id)?;
        self.nodes[id.0].terrain_cost = check_terrain_cost(cost)?;
        Ok(())
    }

    /// The cost of moving from `a` to `b`: the sum of both terrain costs. Infinite when either
    /// endpoint is impassable or unknown.
    pub fn edge_cost(&self, a: NodeId, b: NodeId) -> f32 {
        match (self.node(a), self.node(b)) {
            (Some(a), Some(b)) => a.terrain_cost + b.terrain_cost,
            _ => f32::INFINITY,
        }
    }

    /// Straight-line distance between two node positions, used as search heuristic.
    pub fn distance(&self, a: NodeId, b: NodeId) -> f32 {
        match (self.node(a), self.node(b)) {
            (Some(a), Some(b)) => a.position.distance(&b.position),
            _ => f32::INFINITY,
        }
    }

    /// Finds the node whose position is closest to `point` by linear scan. Among equally close
    /// nodes the one with the lowest id wins. Returns [None] only for an empty graph.
    pub fn closest_node(&self, point: Position) -> Option<NodeId> {
        // Squared distances of far away points overflow f32.
        let distance = |node: &Node| {
            let dx = f64::from(node.position.x) - f64::from(point.x);
            let dy = f64::from(node.position.y) - f64::from(point.y);
            dx * dx + dy * dy
        };
        let mut nodes = self.nodes();
        let (mut closest, first) = nodes.next()?;
        let mut closest_distance = distance(first);
        for (id, node) in nodes {
            let d = distance(node);
            if d < closest_distance {
                closest_distance = d;
                closest = id;
            }
        }
        Some(closest)
    }

    /// Joins the endpoints of every edge with a finite cost. Edges are treated as undirected, so
    /// the result only describes reachability for graphs with symmetric adjacency such as those
    /// built by [GridBuilder](crate::grid::GridBuilder). Use [connected](Self::connected) for
    /// graphs with one-way edges.
    pub fn components(&self) -> UnionFind<usize> {
        let mut components = UnionFind::new(self.nodes.len());
        for (id, node) in self.nodes() {
            for &next in node.neighbors() {
                if self.contains(next) && self.edge_cost(id, next).is_finite() {
                    components.union(id.0, next.0);
                }
            }
        }
        components
    }

    /// Checks whether `b` can be reached from `a` by following passable edges in their direction,
    /// which is exactly when a search from `a` to `b` finds a path.
    pub fn connected(&self, a: NodeId, b: NodeId) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        let mut visited = vec![false; self.nodes.len()];
        let mut queue = VecDeque::from([a]);
        visited[a.0] = true;
        while let Some(current) = queue.pop_front() {
            if current == b {
                return true;
            }
            for &next in self.neighbors(current) {
                if self.contains(next)
                    && !visited[next.0]
                    && self.edge_cost(current, next).is_finite()
                {
                    visited[next.0] = true;
                    queue.push_back(next);
                }
            }
        }
        false
    }
}
