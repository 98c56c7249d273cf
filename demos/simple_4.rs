use grid_util::point::Point;
use std::collections::HashSet;
use tile_astar::{Pathfinder, TerrainGrid};

// In this example a path is found on a 4x4 grid with shape
//  ____
// |S   |
// |### |
// |### |
// |E   |
//  ____
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let grid = TerrainGrid::from_rows(vec![
        vec![0, 0, 0, 0],
        vec![1, 1, 1, 0],
        vec![1, 1, 1, 0],
        vec![0, 0, 0, 0],
    ])
    .unwrap();
    println!("{}", grid);
    let impassable: HashSet<i32> = [1].into_iter().collect();
    let start = Point::new(0, 0);
    let end = Point::new(0, 3);
    match Pathfinder::new().search(&grid, start, end, &impassable).unwrap() {
        Some(result) => {
            println!("Path of cost {}:", result.cost);
            for p in &result.path {
                println!("{:?}", p);
            }
            println!("Checked {} cells:", result.checked.len());
            println!("{}", result.render(&grid, &impassable));
        }
        None => println!("No path was found."),
    }
}
