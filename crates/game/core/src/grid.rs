//! Row-major layout of roster slots.
//!
//! Slots fill a fixed-width grid left to right, top to bottom. The last row
//! may be partial, so neighbour lookups must respect both the row boundary
//! and the total slot count.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

/// Coordinate of a slot on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Index ↔ coordinate mapping for `len` slots on a grid `width` cells wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    len: usize,
}

impl Grid {
    /// A width of zero is coerced to one.
    pub const fn new(width: usize, len: usize) -> Self {
        Self {
            width: if width == 0 { 1 } else { width },
            len,
        }
    }

    /// Grid used for battle rosters.
    pub const fn for_roster(len: usize) -> Self {
        Self::new(BattleConfig::GRID_WIDTH, len)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of rows, counting a trailing partial row.
    pub const fn height(&self) -> usize {
        self.len.div_ceil(self.width)
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        (index < self.len).then(|| Cell::new(index / self.width, index % self.width))
    }

    pub fn index(&self, cell: Cell) -> Option<usize> {
        if cell.col >= self.width {
            return None;
        }
        let index = cell.row.checked_mul(self.width)?.checked_add(cell.col)?;
        (index < self.len).then_some(index)
    }

    /// Orthogonal neighbours of `index` in up, down, left, right order.
    ///
    /// Left/right never wrap across rows. Out-of-range indices have none.
    pub fn neighbors(&self, index: usize) -> ArrayVec<usize, 4> {
        let mut out = ArrayVec::new();
        let Some(Cell { row, col }) = self.cell(index) else {
            return out;
        };

        let candidates = [
            row.checked_sub(1).map(|r| Cell::new(r, col)),
            Some(Cell::new(row + 1, col)),
            col.checked_sub(1).map(|c| Cell::new(row, c)),
            Some(Cell::new(row, col + 1)),
        ];

        for cell in candidates.into_iter().flatten() {
            if let Some(neighbor) = self.index(cell) {
                out.push(neighbor);
            }
        }
        out
    }

    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).contains(&b)
    }
}
