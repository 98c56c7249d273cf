//! # tile_astar
//!
//! Tile-to-tile pathfinding on a rectangular grid of arbitrary terrain values using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm). Movement is restricted to the four
//! orthogonal neighbours at a uniform step cost, so the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) is an exact heuristic
//! on open terrain and a lower bound otherwise.
//!
//! Besides the path, every search reports the cells it examined, which is handy for
//! visualizing what the search did. Results are deterministic: among equally short paths the
//! one found by expanding neighbours in the order down, left, right, up wins.
//!
//! ```
//! use grid_util::point::Point;
//! use std::collections::HashSet;
//! use tile_astar::TerrainGrid;
//!
//! let grid = TerrainGrid::from_rows(vec![
//!     vec![0, 0, 0, 0],
//!     vec![1, 1, 1, 0],
//!     vec![1, 1, 1, 0],
//!     vec![0, 0, 0, 0],
//! ])
//! .unwrap();
//! let walls: HashSet<i32> = [1].into_iter().collect();
//! let result = tile_astar::search(&grid, Point::new(0, 0), Point::new(0, 3), &walls)
//!     .unwrap()
//!     .expect("the corridor along the right edge connects both corners");
//! assert_eq!(result.steps(), 9);
//! ```
pub mod astar;
pub mod error;
pub mod pathfinder;
pub mod terrain_grid;

pub use error::GridError;
pub use pathfinder::{PathResult, Pathfinder};
pub use terrain_grid::TerrainGrid;

use grid_util::point::Point;
use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

/// Default cost of a single orthogonal step.
pub const C: i32 = 10;

/// Searches with a default [Pathfinder]. See [Pathfinder::search].
pub fn search<T, S>(
    grid: &TerrainGrid<T>,
    start: Point,
    goal: Point,
    impassable: &HashSet<T, S>,
) -> error::Result<Option<PathResult>>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    Pathfinder::new().search(grid, start, goal, impassable)
}
