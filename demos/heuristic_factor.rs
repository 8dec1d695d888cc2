use grid_search::{astar, GridBuilder};
use grid_util::point::Point;

// The heuristic_factor scales the straight-line distance used by A*. Larger factors make nodes
// closer to the goal (ignoring terrain) get evaluated sooner. This is called Weighted A* and it
// trades path cost for fewer expansions.

fn main() {
    const N: i32 = 30;
    let grid = GridBuilder::new(N as usize, N as usize)
        .region_cost(Point::new(8, 8), Point::new(15, 15), f32::INFINITY)
        .region_cost(Point::new(0, 3), Point::new(5, 8), 6.0)
        .region_cost(Point::new(10, 0), Point::new(15, 5), 3.0)
        .build()
        .unwrap();
    let start = grid.node_at(Point::new(1, 1)).unwrap();
    let end = grid.node_at(Point::new(N - 3, N - 3)).unwrap();
    for heuristic_factor in [0.0, 1.0, 1.3, 2.0, 5.0] {
        let result = astar(grid.graph(), start, end, heuristic_factor, true).unwrap();
        println!(
            "factor {heuristic_factor}: cost {}, {} expanded",
            result.path.cost(grid.graph()),
            result.expanded
        );
    }
}
