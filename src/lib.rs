//! Shortest paths on 4-connected walkability grids.
//!
//! The core is [`find_path`]: A* with unit move cost and a Manhattan
//! heuristic, driven by a binary min-heap over externally stored scores
//! ([`OpenHeap`]). The path is written into a caller-provided buffer of flat
//! cell indices (`y * width + x`), nearest-to-start first; the returned
//! length is always the full one, so callers can spot truncation.
//!
//! ```
//! use grid_astar::{find_path, Grid, Position};
//!
//! // 0 is a wall, 1 is hollow; the middle row is blocked except on the right.
//! let map = [
//!     1, 1, 1,
//!     0, 0, 1,
//!     1, 1, 1,
//! ];
//! let grid = Grid::from_bytes(3, 3, &map).unwrap();
//! let mut out = [0usize; 8];
//! let len = find_path(&grid, Position::new(0, 0), Position::new(0, 2), &mut out).unwrap();
//! assert_eq!(len, Some(6));
//! assert_eq!(&out[..6], &[1, 2, 5, 8, 7, 6]);
//! ```

pub mod algorithms;
pub mod batch_simulation;
pub mod config;
pub mod error;
pub mod grid;
pub mod simulation;
pub mod statistics;

pub use algorithms::a_star::{find_path, find_path_flat, find_path_positions, AStar, SearchOutcome, NO_PATH};
pub use algorithms::binary_heap::OpenHeap;
pub use algorithms::bfs::BreadthFirst;
pub use algorithms::common::PathfindingAlgorithm;
pub use error::{GridError, SearchError};
pub use grid::{manhattan, Cell, Grid, Position, MAX_CELLS};
pub use statistics::SearchStats;
