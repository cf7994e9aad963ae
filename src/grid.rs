use crate::error::GridError;
use rand::Rng;
use rustc_hash::FxHashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }
}

/// Walkability of a single cell. The discriminants match the byte encoding
/// accepted by [`Grid::from_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    Wall = 0,
    Hollow = 1,
}

impl TryFrom<u8> for Cell {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Wall),
            1 => Ok(Cell::Hollow),
            other => Err(other),
        }
    }
}

/// Largest supported cell count. Keeps every index inside `i32` and every
/// `g + h` score inside `u32`.
pub const MAX_CELLS: usize = i32::MAX as usize;

/// Manhattan distance between two cells; the search heuristic. Exact for
/// cells of one grid, since `width + height <= MAX_CELLS + 1`.
pub fn manhattan(a: Position, b: Position) -> u32 {
    (a.x.abs_diff(b.x) + a.y.abs_diff(b.y)) as u32
}

/// Immutable-by-convention walkability map stored row-major, so the cell at
/// `(x, y)` lives at flat index `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// A grid with every cell hollow.
    pub fn open(width: usize, height: usize) -> Result<Self, GridError> {
        Self::check_dimensions(width, height)?;
        Ok(Grid {
            width,
            height,
            cells: vec![Cell::Hollow; width * height],
        })
    }

    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        Self::check_dimensions(width, height)?;
        if cells.len() != width * height {
            return Err(GridError::CellCountMismatch {
                expected: width * height,
                found: cells.len(),
            });
        }
        Ok(Grid { width, height, cells })
    }

    /// Build a grid from the flat byte encoding: `0` is a wall, `1` is hollow.
    pub fn from_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, GridError> {
        let cells = bytes
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                Cell::try_from(value).map_err(|value| GridError::InvalidCell { index, value })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(width, height, cells)
    }

    /// Parse an ASCII map: `#` is a wall, `.` is hollow. Blank lines and
    /// surrounding whitespace are ignored.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut cells = Vec::new();
        let mut width = 0;
        let mut height = 0;

        for (row, line) in text.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
            let before = cells.len();
            for (column, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '#' => Cell::Wall,
                    '.' => Cell::Hollow,
                    _ => return Err(GridError::InvalidChar { row, column, ch }),
                };
                cells.push(cell);
            }
            let found = cells.len() - before;
            if row == 0 {
                width = found;
            } else if found != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            height += 1;
        }

        Self::from_cells(width, height, cells)
    }

    /// Scatter up to `num_walls` walls at random, never covering a cell in
    /// `keep_clear`. Gives up after `num_walls * 3` attempts so dense requests
    /// on small grids terminate.
    pub fn random<R: Rng>(
        width: usize,
        height: usize,
        num_walls: usize,
        keep_clear: &[Position],
        rng: &mut R,
    ) -> Result<Self, GridError> {
        let mut grid = Self::open(width, height)?;

        let mut walls_placed = 0;
        let mut attempts = 0;
        while walls_placed < num_walls && attempts < num_walls * 3 {
            let pos = Position {
                x: rng.gen_range(0..width),
                y: rng.gen_range(0..height),
            };

            if !keep_clear.contains(&pos) && grid.cell(pos) == Cell::Hollow {
                grid.set(pos, Cell::Wall);
                walls_placed += 1;
            }
            attempts += 1;
        }

        Ok(grid)
    }

    fn check_dimensions(width: usize, height: usize) -> Result<(), GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        match width.checked_mul(height) {
            Some(cells) if cells <= MAX_CELLS => Ok(()),
            Some(cells) => Err(GridError::TooLarge { cells }),
            None => Err(GridError::TooLarge { cells: usize::MAX }),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells, i.e. the number of search nodes.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn index(&self, pos: Position) -> usize {
        pos.y * self.width + pos.x
    }

    pub fn position(&self, index: usize) -> Position {
        Position {
            x: index % self.width,
            y: index / self.width,
        }
    }

    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[self.index(pos)]
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        let index = self.index(pos);
        self.cells[index] = cell;
    }

    pub fn is_hollow(&self, pos: Position) -> bool {
        self.cell(pos) == Cell::Hollow
    }

    pub fn is_hollow_index(&self, index: usize) -> bool {
        self.cells[index] == Cell::Hollow
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Wall).count()
    }

    /// In-bounds orthogonal neighbours of `index`, walls included, in the
    /// order up, left, right, down. The order fixes tie-breaking in the search.
    pub fn orthogonal_indices(&self, index: usize) -> impl Iterator<Item = usize> {
        let (x, y) = (index % self.width, index / self.width);
        let width = self.width;
        let up = (y > 0).then(|| index - width);
        let left = (x > 0).then(|| index - 1);
        let right = (x + 1 < width).then(|| index + 1);
        let down = (y + 1 < self.height).then(|| index + width);
        [up, left, right, down].into_iter().flatten()
    }

    /// Hollow orthogonal neighbours of `pos`.
    pub fn get_neighbors(&self, pos: &Position) -> Vec<Position> {
        self.orthogonal_indices(self.index(*pos))
            .filter(|&i| self.is_hollow_index(i))
            .map(|i| self.position(i))
            .collect()
    }

    /// Draw the grid with an optional path overlay. `path` holds flat node
    /// indices as written by the search.
    pub fn render(&self, start: Option<Position>, target: Option<Position>, path: &[usize]) -> String {
        GridView {
            grid: self,
            start,
            target,
            on_path: path.iter().copied().collect(),
        }
        .to_string()
    }
}

/// A grid with its endpoints and path cells marked, ready for printing.
struct GridView<'a> {
    grid: &'a Grid,
    start: Option<Position>,
    target: Option<Position>,
    on_path: FxHashSet<usize>,
}

impl fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for x in 0..self.grid.width {
            write!(f, "{:2}", x % 10)?;
        }
        writeln!(f)?;

        for y in 0..self.grid.height {
            write!(f, "{:2} ", y)?;
            for x in 0..self.grid.width {
                let pos = Position { x, y };
                let ch = if Some(pos) == self.start {
                    'S'
                } else if Some(pos) == self.target {
                    'T'
                } else if self.on_path.contains(&self.grid.index(pos)) {
                    '*'
                } else {
                    match self.grid.cell(pos) {
                        Cell::Wall => '#',
                        Cell::Hollow => '.',
                    }
                };
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
