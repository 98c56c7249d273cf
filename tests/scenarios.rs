use grid_util::point::Point;
use std::collections::HashSet;
use tile_astar::{search, GridError, Pathfinder, TerrainGrid};

fn corridor_grid() -> TerrainGrid<u8> {
    //  ____
    // |S  G|
    // |### |
    // |### |
    // |    |
    //  ____
    TerrainGrid::from_rows(vec![
        vec![0, 0, 0, 0],
        vec![1, 1, 1, 0],
        vec![1, 1, 1, 0],
        vec![0, 0, 0, 0],
    ])
    .unwrap()
}

#[test]
fn corridor_goal_on_open_row() {
    let walls: HashSet<u8> = [1].into_iter().collect();
    let result = search(&corridor_grid(), Point::new(0, 0), Point::new(3, 0), &walls)
        .unwrap()
        .unwrap();
    assert_eq!(result.path.len(), 4);
    assert_eq!(result.path.last().map(|p| p.x), Some(3));
    assert!(result.checked.len() <= 16);
}

#[test]
fn corridor_goal_behind_wall() {
    let walls: HashSet<u8> = [1].into_iter().collect();
    let result = search(&corridor_grid(), Point::new(0, 0), Point::new(0, 3), &walls)
        .unwrap()
        .unwrap();
    assert_eq!(result.path.len(), 10);
    assert!(result.path.contains(&Point::new(3, 1)));
    assert!(result.path.contains(&Point::new(3, 2)));
    assert_eq!(result.cost, 90);
}

#[test]
fn same_start_and_goal() {
    let grid: TerrainGrid<u8> = TerrainGrid::new(4, 4, 0);
    let p = Point::new(2, 2);
    let result = search(&grid, p, p, &HashSet::new()).unwrap().unwrap();
    assert_eq!(result.path, vec![p]);
    assert_eq!(result.checked, vec![p]);
    assert_eq!(result.cost, 0);
}

/// Terrain values are opaque, any hashable type works.
#[test]
fn named_terrain() {
    let grid = TerrainGrid::from_rows(
        ["grass", "water", "grass"]
            .iter()
            .map(|row| vec![*row, *row, "road"])
            .collect(),
    )
    .unwrap();
    let impassable: HashSet<&str> = ["water", "lava"].into_iter().collect();
    let result = Pathfinder::new()
        .search(&grid, Point::new(0, 0), Point::new(0, 2), &impassable)
        .unwrap()
        .unwrap();
    assert_eq!(
        result.path,
        vec![
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(2, 0),
            Point::new(2, 1),
            Point::new(2, 2),
            Point::new(1, 2),
            Point::new(0, 2),
        ]
    );
}

#[test]
fn malformed_input_is_an_error() {
    let walls: HashSet<u8> = HashSet::new();
    assert_eq!(
        TerrainGrid::from_rows(vec![vec![0u8, 0, 0], vec![0, 0]]),
        Err(GridError::Ragged {
            row: 1,
            expected: 3,
            found: 2
        })
    );
    assert!(search(&corridor_grid(), Point::new(0, 0), Point::new(4, 4), &walls).is_err());
}
