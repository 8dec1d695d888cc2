use core::fmt;

use grid_util::point::Point;
use log::info;

use crate::error::{check_terrain_cost, Error, Result};
use crate::graph::{Graph, NodeId, Position};
use crate::path::Path;

/// Which cells count as adjacent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Connectivity {
    /// The four cardinal neighbours.
    #[default]
    VonNeumann,
    /// The cardinal neighbours followed by the four diagonal ones.
    Moore,
}

impl Connectivity {
    /// Neighbour offsets in expansion order: east, south, west, north, then the diagonals.
    fn offsets(&self) -> &'static [(i32, i32)] {
        static OFFSETS: [(i32, i32); 8] = [
            (1, 0),
            (0, -1),
            (-1, 0),
            (0, 1),
            (1, -1),
            (-1, -1),
            (-1, 1),
            (1, 1),
        ];
        match self {
            Connectivity::VonNeumann => &OFFSETS[..4],
            Connectivity::Moore => &OFFSETS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum CostModifier {
    Cell(Point, f32),
    Region { min: Point, max: Point, cost: f32 },
}

/// Builds a [GridGraph] from grid dimensions and terrain costs. Cost modifiers are applied on top
/// of the default cost in the order they were added, so later modifiers win where they overlap.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    width: usize,
    height: usize,
    default_cost: f32,
    cell_size: f32,
    origin: Position,
    connectivity: Connectivity,
    modifiers: Vec<CostModifier>,
}

impl GridBuilder {
    pub fn new(width: usize, height: usize) -> GridBuilder {
        GridBuilder {
            width,
            height,
            default_cost: 1.0,
            cell_size: 1.0,
            origin: Position::default(),
            connectivity: Connectivity::default(),
            modifiers: Vec::new(),
        }
    }

    pub fn default_cost(mut self, cost: f32) -> GridBuilder {
        self.default_cost = cost;
        self
    }

    /// Distance between the centres of adjacent cells in world units.
    pub fn cell_size(mut self, cell_size: f32) -> GridBuilder {
        self.cell_size = cell_size;
        self
    }

    /// World position of cell `(0, 0)`.
    pub fn origin(mut self, origin: Position) -> GridBuilder {
        self.origin = origin;
        self
    }

    pub fn connectivity(mut self, connectivity: Connectivity) -> GridBuilder {
        self.connectivity = connectivity;
        self
    }

    pub fn cell_cost(mut self, cell: Point, cost: f32) -> GridBuilder {
        self.modifiers.push(CostModifier::Cell(cell, cost));
        self
    }

    /// Sets the cost of every cell in the rectangle spanned by `min` and `max`, both inclusive.
    pub fn region_cost(mut self, min: Point, max: Point, cost: f32) -> GridBuilder {
        self.modifiers.push(CostModifier::Region { min, max, cost });
        self
    }

    fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    pub fn build(&self) -> Result<GridGraph> {
        let invalid_dimensions = Error::InvalidDimensions {
            width: self.width,
            height: self.height,
        };
        // Cells are addressed with i32 points and node ids with usize.
        let max_side = i32::MAX as usize;
        if self.width == 0 || self.height == 0 || self.width > max_side || self.height > max_side {
            return Err(invalid_dimensions);
        }
        let n_cells = self
            .width
            .checked_mul(self.height)
            .ok_or(invalid_dimensions)?;
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(Error::InvalidCellSize(self.cell_size));
        }
        let mut costs = vec![check_terrain_cost(self.default_cost)?; n_cells];
        for modifier in &self.modifiers {
            match *modifier {
                CostModifier::Cell(p, cost) => {
                    if !self.in_bounds(p) {
                        return Err(Error::OutOfBounds(p));
                    }
                    costs[p.y as usize * self.width + p.x as usize] = check_terrain_cost(cost)?;
                }
                CostModifier::Region { min, max, cost } => {
                    for corner in [min, max] {
                        if !self.in_bounds(corner) {
                            return Err(Error::OutOfBounds(corner));
                        }
                    }
                    let cost = check_terrain_cost(cost)?;
                    for y in min.y.min(max.y)..=min.y.max(max.y) {
                        for x in min.x.min(max.x)..=min.x.max(max.x) {
                            costs[y as usize * self.width + x as usize] = cost;
                        }
                    }
                }
            }
        }

        info!(
            "Building {}x{} grid graph with {:?} connectivity",
            self.width, self.height, self.connectivity
        );
        let mut graph = Graph::with_capacity(n_cells);
        for y in 0..self.height {
            for x in 0..self.width {
                let position = Position::new(
                    self.origin.x + x as f32 * self.cell_size,
                    self.origin.y + y as f32 * self.cell_size,
                );
                graph.add_node(costs[y * self.width + x], position)?;
            }
        }
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let from = NodeId::new(y as usize * self.width + x as usize);
                for &(dx, dy) in self.connectivity.offsets() {
                    let p = Point::new(x + dx, y + dy);
                    if self.in_bounds(p) {
                        graph.add_edge(from, NodeId::new(p.y as usize * self.width + p.x as usize))?;
                    }
                }
            }
        }
        Ok(GridGraph {
            graph,
            width: self.width,
            height: self.height,
            connectivity: self.connectivity,
        })
    }
}

/// A [Graph] laid out as a grid. Cell `(x, y)` is node `y * width + x`.
#[derive(Clone, Debug)]
pub struct GridGraph {
    graph: Graph,
    width: usize,
    height: usize,
    connectivity: Connectivity,
}

impl GridGraph {
    pub fn graph(&self) -> &Graph {
        &self.graph
    }
    pub fn into_graph(self) -> Graph {
        self.graph
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    pub fn node_at(&self, p: Point) -> Option<NodeId> {
        self.in_bounds(p)
            .then(|| NodeId::new(p.y as usize * self.width + p.x as usize))
    }

    pub fn point_of(&self, id: NodeId) -> Option<Point> {
        self.graph.contains(id).then(|| {
            Point::new(
                (id.index() % self.width) as i32,
                (id.index() / self.width) as i32,
            )
        })
    }

    pub fn cost_at(&self, p: Point) -> Option<f32> {
        self.node_at(p)
            .and_then(|id| self.graph.node(id))
            .map(|n| n.terrain_cost())
    }

    /// Updates the terrain cost of a cell between searches.
    pub fn set_cost(&mut self, p: Point, cost: f32) -> Result<()> {
        let id = self.node_at(p).ok_or(Error::OutOfBounds(p))?;
        self.graph.set_terrain_cost(id, cost)
    }

    pub fn closest_node(&self, position: Position) -> Option<NodeId> {
        self.graph.closest_node(position)
    }

    /// Text rendering with the origin marked `S`, the destination `G`, other path cells `*`,
    /// impassable cells `#` and everything else `.`. Rows are printed top (highest y) first.
    pub fn render_path(&self, path: &Path) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in (0..self.height as i32).rev() {
            for x in 0..self.width as i32 {
                let p = Point::new(x, y);
                let id = self.node_at(p);
                let c = if id == path.origin() {
                    'S'
                } else if id == path.destination() {
                    'G'
                } else if id.is_some_and(|id| path.nodes().contains(&id)) {
                    '*'
                } else if self.cost_at(p).is_some_and(|c| c.is_infinite()) {
                    '#'
                } else {
                    '.'
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for GridGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for y in (0..self.height as i32).rev() {
            let values = (0..self.width as i32)
                .map(|x| match self.cost_at(Point::new(x, y)) {
                    Some(c) if c.is_finite() => format!("{:>4}", c),
                    _ => format!("{:>4}", "#"),
                })
                .collect::<String>();
            writeln!(f, "{}", values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_four_connected_grid() {
        let grid = GridBuilder::new(3, 2).build().unwrap();
        let graph = grid.graph();
        assert_eq!(graph.len(), 6);
        let center = grid.node_at(Point::new(1, 0)).unwrap();
        let expected = [Point::new(2, 0), Point::new(0, 0), Point::new(1, 1)]
            .map(|p| grid.node_at(p).unwrap());
        assert_eq!(graph.neighbors(center), &expected);
        assert_eq!(grid.point_of(center), Some(Point::new(1, 0)));
        assert_eq!(grid.point_of(NodeId::new(6)), None);
        assert_eq!(grid.node_at(Point::new(3, 0)), None);
        assert_eq!(grid.node_at(Point::new(-1, 0)), None);
    }

    #[test]
    fn moore_grid_adds_diagonals_last() {
        let grid = GridBuilder::new(3, 3)
            .connectivity(Connectivity::Moore)
            .build()
            .unwrap();
        let center = grid.node_at(Point::new(1, 1)).unwrap();
        let neighbors = grid.graph().neighbors(center);
        assert_eq!(neighbors.len(), 8);
        assert_eq!(grid.point_of(neighbors[0]), Some(Point::new(2, 1)));
        assert_eq!(grid.point_of(neighbors[4]), Some(Point::new(2, 0)));
        let corner = grid.node_at(Point::new(0, 0)).unwrap();
        assert_eq!(grid.graph().neighbors(corner).len(), 3);
    }

    #[test]
    fn modifiers_apply_in_order() {
        let grid = GridBuilder::new(4, 4)
            .default_cost(2.0)
            .region_cost(Point::new(2, 2), Point::new(0, 0), 5.0)
            .cell_cost(Point::new(1, 1), f32::INFINITY)
            .build()
            .unwrap();
        assert_eq!(grid.cost_at(Point::new(0, 2)), Some(5.0));
        assert_eq!(grid.cost_at(Point::new(1, 1)), Some(f32::INFINITY));
        assert_eq!(grid.cost_at(Point::new(3, 3)), Some(2.0));
        assert_eq!(grid.cost_at(Point::new(4, 0)), None);
    }

    #[test]
    fn positions_follow_origin_and_cell_size() {
        let grid = GridBuilder::new(2, 2)
            .origin(Position::new(10.0, -2.0))
            .cell_size(0.5)
            .build()
            .unwrap();
        let id = grid.node_at(Point::new(1, 1)).unwrap();
        assert_eq!(grid.graph().position(id), Some(Position::new(10.5, -1.5)));
        assert_eq!(grid.closest_node(Position::new(10.4, -1.4)), Some(id));
    }

    #[test]
    fn invalid_grids_are_rejected() {
        assert_eq!(
            GridBuilder::new(0, 3).build().unwrap_err(),
            Error::InvalidDimensions {
                width: 0,
                height: 3
            }
        );
        let too_wide = i32::MAX as usize + 1;
        assert_eq!(
            GridBuilder::new(too_wide, 1).build().unwrap_err(),
            Error::InvalidDimensions {
                width: too_wide,
                height: 1
            }
        );
        assert_eq!(
            GridBuilder::new(1, too_wide).build().unwrap_err(),
            Error::InvalidDimensions {
                width: 1,
                height: too_wide
            }
        );
        assert!(matches!(
            GridBuilder::new(2, 2).cell_size(0.0).build(),
            Err(Error::InvalidCellSize(_))
        ));
        assert!(matches!(
            GridBuilder::new(2, 2).default_cost(-1.0).build(),
            Err(Error::InvalidTerrainCost(_))
        ));
        assert_eq!(
            GridBuilder::new(2, 2)
                .cell_cost(Point::new(2, 0), 1.0)
                .build()
                .unwrap_err(),
            Error::OutOfBounds(Point::new(2, 0))
        );
    }

    #[test]
    fn set_cost_updates_cell() {
        let mut grid = GridBuilder::new(2, 1).build().unwrap();
        grid.set_cost(Point::new(1, 0), 3.0).unwrap();
        assert_eq!(grid.cost_at(Point::new(1, 0)), Some(3.0));
        assert!(grid.set_cost(Point::new(5, 0), 3.0).is_err());
        assert!(grid.set_cost(Point::new(0, 0), -3.0).is_err());
    }

    #[test]
    fn render_marks_path_and_walls() {
        let grid = GridBuilder::new(3, 2)
            .cell_cost(Point::new(1, 1), f32::INFINITY)
            .build()
            .unwrap();
        let path = Path::new(
            [Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]
                .iter()
                .map(|&p| grid.node_at(p).unwrap())
                .collect(),
        );
        assert_eq!(grid.render_path(&path), ".#.\nS*G\n");
    }
}
