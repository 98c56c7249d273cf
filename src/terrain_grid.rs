use crate::error::{GridError, Result};
use core::fmt;
use grid_util::point::Point;
use itertools::Itertools;
use smallvec::SmallVec;
use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

/// Offsets of the 4-neighbourhood in the order they are expanded: down, left, right, up.
/// Rows grow downwards, so "down" is `+y`. The order decides which of several equally short
/// paths is returned.
pub const NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, 1), (-1, 0), (1, 0), (0, -1)];

/// A rectangular grid of opaque terrain values, stored row-major. A cell is addressed as
/// `(x, y)` where `x` is the column and `y` the row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainGrid<T> {
    pub width: usize,
    pub height: usize,
    cells: Vec<T>,
}

impl<T: Clone> TerrainGrid<T> {
    pub fn new(width: usize, height: usize, default_value: T) -> Self {
        TerrainGrid {
            width,
            height,
            cells: vec![default_value; width * height],
        }
    }
}

impl<T> TerrainGrid<T> {
    /// Builds a grid from rows so that `rows[y][x]` becomes cell `(x, y)`. Fails on an empty
    /// grid or when the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::Empty);
        }
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(GridError::Ragged {
                row,
                expected: width,
                found: cells.len(),
            });
        }
        let height = rows.len();
        Ok(TerrainGrid {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn index_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }
    pub fn point_in_bounds(&self, point: Point) -> bool {
        self.index_in_bounds(point.x, point.y)
    }
    fn get_ix(&self, x: i32, y: i32) -> usize {
        y as usize * self.width + x as usize
    }
    pub fn get(&self, x: i32, y: i32) -> Option<&T> {
        if self.index_in_bounds(x, y) {
            self.cells.get(self.get_ix(x, y))
        } else {
            None
        }
    }
    pub fn get_point(&self, point: Point) -> Option<&T> {
        self.get(point.x, point.y)
    }
    /// Overwrites a cell. Grids are only edited between searches; a running search borrows
    /// the grid immutably.
    pub fn set(&mut self, x: i32, y: i32, value: T) -> Result<()> {
        if !self.index_in_bounds(x, y) {
            return Err(self.out_of_bounds("cell", Point::new(x, y)));
        }
        let ix = self.get_ix(x, y);
        self.cells[ix] = value;
        Ok(())
    }
    pub fn set_point(&mut self, point: Point, value: T) -> Result<()> {
        self.set(point.x, point.y, value)
    }
    /// Iterates over the rows from top (`y = 0`) to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width.max(1))
    }

    /// A cell is passable when it lies on the grid and its value is not impassable.
    pub fn is_passable<S>(&self, point: Point, impassable: &HashSet<T, S>) -> bool
    where
        T: Eq + Hash,
        S: BuildHasher,
    {
        self.get_point(point)
            .is_some_and(|value| !impassable.contains(value))
    }

    /// The four orthogonal neighbours of a point in expansion order, whether or not they lie
    /// on the grid.
    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; 4]> {
        NEUMANN_OFFSETS
            .iter()
            .map(|&(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .collect()
    }

    /// The passable orthogonal neighbours of a point in expansion order.
    pub fn passable_neighborhood<S>(
        &self,
        point: &Point,
        impassable: &HashSet<T, S>,
    ) -> SmallVec<[Point; 4]>
    where
        T: Eq + Hash,
        S: BuildHasher,
    {
        self.neighborhood_points(point)
            .into_iter()
            .filter(|p| self.is_passable(*p, impassable))
            .collect()
    }

    /// Checks that a search endpoint lies on the grid.
    pub(crate) fn validate_endpoint(&self, endpoint: &'static str, point: Point) -> Result<()> {
        if self.is_empty() {
            Err(GridError::Empty)
        } else if !self.point_in_bounds(point) {
            Err(self.out_of_bounds(endpoint, point))
        } else {
            Ok(())
        }
    }
    fn out_of_bounds(&self, endpoint: &'static str, point: Point) -> GridError {
        GridError::OutOfBounds {
            endpoint,
            x: point.x,
            y: point.y,
            width: self.width,
            height: self.height,
        }
    }
}

impl<T: fmt::Display> fmt::Display for TerrainGrid<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for row in self.rows() {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walled_grid() -> TerrainGrid<u8> {
        TerrainGrid::from_rows(vec![
            vec![0, 0, 0, 0],
            vec![1, 1, 1, 0],
            vec![1, 1, 1, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap()
    }

    #[test]
    fn rows_are_indexed_by_y() {
        let grid = walled_grid();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.get(0, 1), Some(&1));
        assert_eq!(grid.get(3, 1), Some(&0));
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.get(0, -1), None);
    }

    #[test]
    fn rejects_malformed_rows() {
        let empty: Vec<Vec<u8>> = vec![];
        assert_eq!(TerrainGrid::from_rows(empty), Err(GridError::Empty));
        assert_eq!(
            TerrainGrid::<u8>::from_rows(vec![vec![], vec![]]),
            Err(GridError::Empty)
        );
        assert_eq!(
            TerrainGrid::from_rows(vec![vec![0, 0], vec![0]]),
            Err(GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn neighbours_follow_expansion_order() {
        let grid: TerrainGrid<u8> = TerrainGrid::new(3, 3, 0);
        let p = Point::new(1, 1);
        let expected = [
            Point::new(1, 2),
            Point::new(0, 1),
            Point::new(2, 1),
            Point::new(1, 0),
        ];
        assert_eq!(grid.neighborhood_points(&p).as_slice(), &expected);
    }

    #[test]
    fn passability_respects_bounds_and_values() {
        let grid = walled_grid();
        let impassable: HashSet<u8> = [1].into_iter().collect();
        assert!(grid.is_passable(Point::new(3, 1), &impassable));
        assert!(!grid.is_passable(Point::new(0, 1), &impassable));
        assert!(!grid.is_passable(Point::new(-1, 0), &impassable));
        // Only (1, 0) survives: (0, 1) is a wall, the others are off the grid.
        assert_eq!(
            grid.passable_neighborhood(&Point::new(0, 0), &impassable)
                .as_slice(),
            &[Point::new(1, 0)]
        );
        assert!(grid.is_passable(Point::new(0, 1), &HashSet::new()));
    }

    #[test]
    fn set_rejects_cells_off_the_grid() {
        let mut grid: TerrainGrid<char> = TerrainGrid::new(2, 2, '.');
        grid.set_point(Point::new(1, 0), '#').unwrap();
        assert_eq!(grid.get(1, 0), Some(&'#'));
        assert!(matches!(
            grid.set(2, 0, '#'),
            Err(GridError::OutOfBounds { endpoint: "cell", .. })
        ));
    }

    #[test]
    fn display_prints_rows_top_down() {
        let grid = walled_grid();
        assert_eq!(
            grid.to_string(),
            "Grid:\n0 0 0 0\n1 1 1 0\n1 1 1 0\n0 0 0 0\n"
        );
    }
}
