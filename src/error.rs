use grid_util::point::Point;
use thiserror::Error;

use crate::graph::NodeId;

/// Returned by [PriorityQueue::extract_min](crate::priority_queue::PriorityQueue::extract_min)
/// when there is nothing left to extract. Searches only pop from non-empty frontiers, so seeing
/// this from a search means the frontier bookkeeping is broken.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("extract_min called on an empty priority queue")]
pub struct EmptyQueueError;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("node {0} is not part of the graph")]
    UnknownNode(NodeId),
    #[error("heuristic factor {0} must be finite and non-negative")]
    InvalidHeuristicFactor(f32),
    #[error("terrain cost {0} must be non-negative or infinite")]
    InvalidTerrainCost(f32),
    #[error("grid dimensions {width}x{height} must both be positive")]
    InvalidDimensions { width: usize, height: usize },
    #[error("cell size {0} must be finite and positive")]
    InvalidCellSize(f32),
    #[error("cell {0} lies outside the grid")]
    OutOfBounds(Point),
    #[error("graph has no nodes")]
    EmptyGraph,
    #[error(transparent)]
    EmptyQueue(#[from] EmptyQueueError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Terrain costs are either non-negative floats or positive infinity.
pub(crate) fn check_terrain_cost(cost: f32) -> Result<f32> {
    if cost >= 0.0 {
        Ok(cost)
    } else {
        Err(Error::InvalidTerrainCost(cost))
    }
}
