use grid_search::{Algorithm, GridBuilder, Pathfinder, SearchConfig};
use grid_util::point::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |  E|
// | # |
// |S  |
//  ___
// where
// - # marks an impassable cell
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let grid = GridBuilder::new(3, 3)
        .cell_cost(Point::new(1, 1), f32::INFINITY)
        .build()
        .unwrap();
    println!("{}", grid);
    for algorithm in [
        Algorithm::BreadthFirst,
        Algorithm::Dijkstra,
        Algorithm::GreedyBestFirst,
        Algorithm::astar(1.0),
    ] {
        let pathfinder = Pathfinder::with_config(grid.clone(), SearchConfig::new(algorithm));
        let result = pathfinder
            .find_path_between(Point::new(0, 0), Point::new(2, 2))
            .unwrap();
        println!("{}: {} nodes admitted", algorithm, result.trace.len());
        println!("{}", pathfinder.grid.render_path(&result.path));
    }
}
