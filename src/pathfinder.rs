use crate::astar::{astar_closed, SearchOutcome};
use crate::error::Result;
use crate::terrain_grid::TerrainGrid;
use crate::C;
use grid_util::point::Point;
use itertools::Itertools;
use log::{debug, info};
use smallvec::SmallVec;
use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

/// A path found by a [Pathfinder] together with every cell the search finalized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathResult {
    /// Cells from start to goal, both inclusive.
    pub path: Vec<Point>,
    /// Cells finalized during the search in the order they were finalized, for diagnostics and
    /// visualization.
    pub checked: Vec<Point>,
    /// Cost of the path, the number of steps times the step cost.
    pub cost: i32,
}

impl PathResult {
    /// Number of moves along the path.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Draws the grid with the search overlaid: `S` start, `G` goal, `*` path, `o` checked,
    /// `#` impassable and `.` for untouched open cells.
    pub fn render<T, S>(&self, grid: &TerrainGrid<T>, impassable: &HashSet<T, S>) -> String
    where
        T: Eq + Hash,
        S: BuildHasher,
    {
        let path: HashSet<&Point> = self.path.iter().collect();
        let checked: HashSet<&Point> = self.checked.iter().collect();
        (0..grid.height() as i32)
            .map(|y| {
                (0..grid.width() as i32)
                    .map(|x| {
                        let p = Point::new(x, y);
                        if self.path.first() == Some(&p) {
                            'S'
                        } else if self.path.last() == Some(&p) {
                            'G'
                        } else if path.contains(&p) {
                            '*'
                        } else if checked.contains(&p) {
                            'o'
                        } else if grid.is_passable(p, impassable) {
                            '.'
                        } else {
                            '#'
                        }
                    })
                    .collect::<String>()
            })
            .join("\n")
    }
}

impl From<SearchOutcome<Point, i32>> for PathResult {
    fn from(outcome: SearchOutcome<Point, i32>) -> Self {
        PathResult {
            path: outcome.path,
            checked: outcome.checked,
            cost: outcome.cost,
        }
    }
}

/// A* over the 4-neighbourhood of a [TerrainGrid] with a uniform step cost. Holds no search
/// state, so one instance can serve any number of searches, also from several threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pathfinder {
    /// Cost of a single orthogonal move.
    pub step_cost: i32,
    /// Gives up (reporting no path) after finalizing this many cells.
    pub max_expansions: Option<usize>,
}

impl Default for Pathfinder {
    fn default() -> Pathfinder {
        Pathfinder {
            step_cost: C,
            max_expansions: None,
        }
    }
}

impl Pathfinder {
    pub fn new() -> Pathfinder {
        Pathfinder::default()
    }

    /// Cost of moving between two cells along the grid axes.
    pub fn cost(&self, p1: &Point, p2: &Point) -> i32 {
        let delta_x = (p1.x - p2.x).abs();
        let delta_y = (p1.y - p2.y).abs();
        (delta_x + delta_y) * self.step_cost
    }

    /// The Manhattan distance scaled by the step cost. Exact without obstacles and never an
    /// overestimate with them.
    pub fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        self.cost(p1, p2)
    }

    /// Cost of following a path cell by cell.
    pub fn path_cost(&self, path: &[Point]) -> i32 {
        path.iter()
            .tuple_windows()
            .map(|(p1, p2)| self.cost(p1, p2))
            .sum()
    }

    fn successors<T, S>(
        &self,
        grid: &TerrainGrid<T>,
        impassable: &HashSet<T, S>,
        node: &Point,
    ) -> SmallVec<[(Point, i32); 4]>
    where
        T: Eq + Hash,
        S: BuildHasher,
    {
        grid.passable_neighborhood(node, impassable)
            .into_iter()
            .map(|p| (p, self.step_cost))
            .collect()
    }

    /// Computes the cheapest path from `start` to `goal` that avoids cells holding one of the
    /// `impassable` values.
    ///
    /// The start cell itself is never checked for passability, so a search may begin on an
    /// impassable cell. Returns `Ok(None)` if no path exists and an error if the grid is empty
    /// or an endpoint lies outside it.
    pub fn search<T, S>(
        &self,
        grid: &TerrainGrid<T>,
        start: Point,
        goal: Point,
        impassable: &HashSet<T, S>,
    ) -> Result<Option<PathResult>>
    where
        T: Eq + Hash,
        S: BuildHasher,
    {
        grid.validate_endpoint("start", start)?;
        grid.validate_endpoint("goal", goal)?;
        debug!("Searching path from {:?} to {:?}", start, goal);
        let result = astar_closed(
            &start,
            |node| self.successors(grid, impassable, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
            self.max_expansions,
        )
        .map(PathResult::from);
        match &result {
            Some(found) => info!(
                "Found path from {:?} to {:?} of cost {} after checking {} cells",
                start,
                goal,
                found.cost,
                found.checked.len()
            ),
            None => debug!("No path from {:?} to {:?}", start, goal),
        }
        Ok(result)
    }

    /// Computes the cheapest path from `start` to any of `goals` and returns the goal that was
    /// reached along with the path. The heuristic is the distance to the closest goal.
    /// Otherwise behaves like [search](Self::search).
    pub fn search_multiple_goals<T, S>(
        &self,
        grid: &TerrainGrid<T>,
        start: Point,
        goals: &[Point],
        impassable: &HashSet<T, S>,
    ) -> Result<Option<(Point, PathResult)>>
    where
        T: Eq + Hash,
        S: BuildHasher,
    {
        grid.validate_endpoint("start", start)?;
        for goal in goals {
            grid.validate_endpoint("goal", *goal)?;
        }
        if goals.is_empty() {
            return Ok(None);
        }
        debug!("Searching path from {:?} to any of {:?}", start, goals);
        let result = astar_closed(
            &start,
            |node| self.successors(grid, impassable, node),
            |point| {
                goals
                    .iter()
                    .map(|goal| self.heuristic(point, goal))
                    .min()
                    .unwrap_or(0)
            },
            |point| goals.contains(point),
            self.max_expansions,
        )
        .map(PathResult::from);
        Ok(result.and_then(|found| found.path.last().copied().map(|goal| (goal, found))))
    }
}
