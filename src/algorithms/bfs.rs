use crate::algorithms::common::PathfindingAlgorithm;
use crate::grid::{Grid, Position};
use pathfinding::prelude::bfs;

/// Breadth-first search using the `pathfinding` crate. With unit move costs
/// its path lengths are ground truth, which makes it the reference A* is
/// checked against.
#[derive(Debug, Default, Clone, Copy)]
pub struct BreadthFirst;

impl BreadthFirst {
    pub fn new() -> Self {
        BreadthFirst
    }

    /// Number of moves on a shortest path, if any.
    pub fn distance(grid: &Grid, start: Position, goal: Position) -> Option<usize> {
        BreadthFirst.find_path(grid, start, goal).map(|path| path.len() - 1)
    }
}

impl PathfindingAlgorithm for BreadthFirst {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn find_path(&mut self, grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>> {
        if !grid.contains(start) || !grid.contains(goal) {
            return None;
        }
        if start != goal && !grid.is_hollow(goal) {
            return None;
        }
        bfs(&start, |p| grid.get_neighbors(p), |p| *p == goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_around_a_wall() {
        let grid = Grid::parse(
            "
            ...
            .#.
            ...
            ",
        )
        .unwrap();
        assert_eq!(BreadthFirst::distance(&grid, Position::new(1, 0), Position::new(1, 2)), Some(4));
    }

    #[test]
    fn unreachable_goal() {
        let grid = Grid::parse(".#.").unwrap();
        assert_eq!(BreadthFirst::distance(&grid, Position::new(0, 0), Position::new(2, 0)), None);
    }

    #[test]
    fn same_cell_is_distance_zero() {
        let grid = Grid::open(2, 2).unwrap();
        assert_eq!(BreadthFirst::distance(&grid, Position::new(1, 1), Position::new(1, 1)), Some(0));
    }
}
