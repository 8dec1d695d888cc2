use grid_search::{dijkstra, GridBuilder};
use grid_util::point::Point;

// When the goal cannot be reached the search still returns a best-effort path and the full
// frontier trace, which callers draw as an incomplete path.

fn main() {
    let grid = GridBuilder::new(6, 4)
        .region_cost(Point::new(3, 0), Point::new(3, 3), f32::INFINITY)
        .build()
        .unwrap();
    let start = grid.node_at(Point::new(0, 0)).unwrap();
    let end = grid.node_at(Point::new(5, 3)).unwrap();
    let result = dijkstra(grid.graph(), start, end, false).unwrap();
    println!("found: {}", result.found);
    println!("{}", grid.render_path(&result.path));
    println!("Frontier order:");
    for id in result.trace.ordered_frontier() {
        if let Some(p) = grid.point_of(*id) {
            println!("{:?}", p);
        }
    }
}
