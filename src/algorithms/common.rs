use crate::grid::{Grid, Position};

pub trait PathfindingAlgorithm {
    /// Short identifier used in reports.
    fn name(&self) -> &'static str;

    /// Path from `start` to `goal`, both endpoints included, or `None` if the
    /// goal cannot be reached.
    fn find_path(&mut self, grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>>;
}
