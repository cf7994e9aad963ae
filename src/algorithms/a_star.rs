use crate::algorithms::binary_heap::OpenHeap;
use crate::algorithms::common::PathfindingAlgorithm;
use crate::error::{GridError, Result, SearchError};
use crate::grid::{manhattan, Grid, Position};
use crate::statistics::SearchStats;
use log::{debug, trace, warn};

/// Returned on the flat boundary when the target cannot be reached.
pub const NO_PATH: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    Free,
    Open,
    Closed,
}

/// Per-search node arena, one slot per grid cell. `g`, `h`, `f` and `parent`
/// are only meaningful once a node has left `Free`.
struct Nodes {
    state: Vec<NodeState>,
    g: Vec<u32>,
    h: Vec<u32>,
    f: Vec<u32>,
    parent: Vec<usize>,
}

impl Nodes {
    fn new(count: usize) -> Self {
        Nodes {
            state: vec![NodeState::Free; count],
            g: vec![0; count],
            h: vec![0; count],
            f: vec![0; count],
            parent: vec![usize::MAX; count],
        }
    }
}

/// Destination for reconstructed path steps.
trait PathSink {
    fn capacity(&self) -> usize;
    fn put(&mut self, slot: usize, node: usize);
}

impl PathSink for [usize] {
    fn capacity(&self) -> usize {
        self.len()
    }

    fn put(&mut self, slot: usize, node: usize) {
        self[slot] = node;
    }
}

impl PathSink for [i32] {
    fn capacity(&self) -> usize {
        self.len()
    }

    // `Grid` caps its cell count at `MAX_CELLS`, so every index fits.
    fn put(&mut self, slot: usize, node: usize) {
        self[slot] = node as i32;
    }
}

/// Result of one search together with its counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// `Some(0)` when start and target coincide, `Some(n)` for a path of `n`
    /// steps, `None` when the target is unreachable.
    pub length: Option<usize>,
    pub stats: SearchStats,
}

/// A* over a 4-connected grid with unit move cost and a Manhattan heuristic.
///
/// The search allocates its working state per call, so one `AStar` (or one
/// `Grid`) may be shared freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar {
    max_expansions: Option<usize>,
}

impl AStar {
    /// Creates an unbounded searcher.
    pub fn new() -> Self {
        AStar::default()
    }

    /// Creates a searcher that fails with [`SearchError::ExpansionLimit`]
    /// instead of expanding more than `limit` nodes.
    pub fn with_expansion_limit(limit: usize) -> Self {
        AStar {
            max_expansions: Some(limit),
        }
    }

    /// Finds a shortest path from `start` to `target` and writes it into `out`
    /// as flat node indices, nearest-to-start first. The start cell is not
    /// written; the target is the last step.
    ///
    /// When the path is longer than `out`, only its last `out.len()` steps
    /// are written and the full length is still reported.
    pub fn search(
        &self,
        grid: &Grid,
        start: Position,
        target: Position,
        out: &mut [usize],
    ) -> Result<SearchOutcome> {
        self.run(grid, start, target, out)
    }

    fn run<S: PathSink + ?Sized>(
        &self,
        grid: &Grid,
        start: Position,
        target: Position,
        out: &mut S,
    ) -> Result<SearchOutcome> {
        if !grid.contains(start) {
            return Err(SearchError::out_of_bounds("start", start, grid.width(), grid.height()));
        }
        if !grid.contains(target) {
            return Err(SearchError::out_of_bounds("target", target, grid.width(), grid.height()));
        }

        trace!(
            "[AStar] find_path: start=({},{}) target=({},{}) grid={}x{} capacity={}",
            start.x,
            start.y,
            target.x,
            target.y,
            grid.width(),
            grid.height(),
            out.capacity()
        );

        let mut stats = SearchStats::default();

        if start == target {
            return Ok(SearchOutcome {
                length: Some(0),
                stats,
            });
        }
        if !grid.is_hollow(target) {
            debug!("[AStar] target ({},{}) is a wall", target.x, target.y);
            return Ok(SearchOutcome { length: None, stats });
        }

        let start_index = grid.index(start);
        let target_index = grid.index(target);
        let mut nodes = Nodes::new(grid.len());
        let mut open = OpenHeap::with_nodes(grid.len());

        nodes.h[start_index] = manhattan(start, target);
        nodes.f[start_index] = nodes.h[start_index];
        nodes.state[start_index] = NodeState::Open;
        open.push(start_index, &nodes.f);
        stats.opened = 1;
        stats.peak_open = 1;

        while let Some(current) = open.pull_min(&nodes.f) {
            if let Some(limit) = self.max_expansions {
                if stats.expanded >= limit {
                    warn!("[AStar] expansion limit {} reached", limit);
                    return Err(SearchError::ExpansionLimit {
                        expanded: stats.expanded,
                    });
                }
            }

            nodes.state[current] = NodeState::Closed;
            stats.expanded += 1;
            let step_g = nodes.g[current] + 1;

            for neighbor in grid.orthogonal_indices(current) {
                if !grid.is_hollow_index(neighbor) {
                    continue;
                }
                match nodes.state[neighbor] {
                    NodeState::Closed => continue,
                    NodeState::Free => {
                        nodes.state[neighbor] = NodeState::Open;
                        nodes.parent[neighbor] = current;
                        nodes.g[neighbor] = step_g;
                        nodes.h[neighbor] = manhattan(grid.position(neighbor), target);
                        nodes.f[neighbor] = step_g + nodes.h[neighbor];
                        open.push(neighbor, &nodes.f);
                        stats.opened += 1;
                    }
                    NodeState::Open => {
                        if step_g < nodes.g[neighbor] {
                            nodes.g[neighbor] = step_g;
                            nodes.f[neighbor] = step_g + nodes.h[neighbor];
                            nodes.parent[neighbor] = current;
                            open.decrease(neighbor, &nodes.f);
                            stats.improved += 1;
                        }
                    }
                }
            }
            stats.peak_open = stats.peak_open.max(open.len());

            // The target is final as soon as it is discovered: the heuristic
            // is consistent and every move costs the same.
            if nodes.state[target_index] == NodeState::Open {
                break;
            }
        }

        if nodes.state[target_index] != NodeState::Open {
            debug!(
                "[AStar] no path from ({},{}) to ({},{}); {}",
                start.x, start.y, target.x, target.y, stats
            );
            return Ok(SearchOutcome { length: None, stats });
        }

        let length = nodes.g[target_index] as usize;
        write_path(&nodes, start_index, target_index, length, out);

        if length > out.capacity() {
            debug!(
                "[AStar] path of {} steps truncated to the last {}",
                length,
                out.capacity()
            );
        }
        debug!("[AStar] found path of {} steps; {}", length, stats);

        Ok(SearchOutcome {
            length: Some(length),
            stats,
        })
    }
}

/// Walk the whole parent chain from the target back to the start, writing
/// only the steps that fit: with `length` steps and room for `capacity`, the
/// first `length - capacity` steps are skipped.
fn write_path<S: PathSink + ?Sized>(
    nodes: &Nodes,
    start: usize,
    target: usize,
    length: usize,
    out: &mut S,
) {
    let skip = length.saturating_sub(out.capacity());
    let mut current = target;
    for step in (1..=length).rev() {
        if step > skip {
            out.put(step - 1 - skip, current);
        }
        current = nodes.parent[current];
    }
    debug_assert_eq!(current, start, "parent chain must end at the start");
}

/// Shortest path from `start` to `target` written into `out`; see
/// [`AStar::search`] for the buffer layout.
///
/// Returns `Some(0)` when already at the target, `Some(length)` for a found
/// path (even if it did not fit), and `None` when no path exists.
pub fn find_path(
    grid: &Grid,
    start: Position,
    target: Position,
    out: &mut [usize],
) -> Result<Option<usize>> {
    AStar::new().search(grid, start, target, out).map(|outcome| outcome.length)
}

/// Every step of the shortest path, start excluded, target included.
pub fn find_path_positions(
    grid: &Grid,
    start: Position,
    target: Position,
) -> Result<Option<Vec<Position>>> {
    let mut buffer = vec![0; grid.len()];
    let length = find_path(grid, start, target, &mut buffer)?;
    Ok(length.map(|len| buffer[..len].iter().map(|&i| grid.position(i)).collect()))
}

/// The raw call boundary: coordinates, a `0`/`1` byte map of
/// `width * height` cells and an index buffer.
///
/// Returns `0` when start equals target, the full path length when a path
/// exists, and [`NO_PATH`] otherwise. Invalid dimensions, coordinates or map
/// bytes are reported as errors.
#[allow(clippy::too_many_arguments)]
pub fn find_path_flat(
    start_x: i32,
    start_y: i32,
    target_x: i32,
    target_y: i32,
    map: &[u8],
    width: i32,
    height: i32,
    out: &mut [i32],
) -> Result<i32> {
    if width <= 0 || height <= 0 {
        return Err(GridError::EmptyGrid {
            width: width.max(0) as usize,
            height: height.max(0) as usize,
        }
        .into());
    }
    let (width, height) = (width as usize, height as usize);

    let to_position = |what: &'static str, x: i32, y: i32| -> Result<Position> {
        if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
            return Err(SearchError::OutOfBounds {
                what,
                position: (x as i64, y as i64),
                width,
                height,
            });
        }
        Ok(Position::new(x as usize, y as usize))
    };
    let start = to_position("start", start_x, start_y)?;
    let target = to_position("target", target_x, target_y)?;

    let grid = Grid::from_bytes(width, height, map)?;
    let outcome = AStar::new().run(&grid, start, target, out)?;
    Ok(outcome.length.map_or(NO_PATH, |len| len as i32))
}

impl PathfindingAlgorithm for AStar {
    fn name(&self) -> &'static str {
        "a_star"
    }

    fn find_path(&mut self, grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>> {
        let mut buffer = vec![0; grid.len()];
        match self.search(grid, start, goal, &mut buffer) {
            Ok(outcome) => outcome.length.map(|len| {
                std::iter::once(start)
                    .chain(buffer[..len].iter().map(|&i| grid.position(i)))
                    .collect()
            }),
            Err(e) => {
                warn!("[AStar] search failed: {}", e);
                None
            }
        }
    }
}
