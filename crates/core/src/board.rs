//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or tagged with the
//! piece kind that locked into it.
//! Uses a flat array, row-major: index = row * WIDTH + col.
//! Row 0 is the top of the well, row 19 the floor.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_SIZE, BOARD_WIDTH};

/// Row indices, at most one per board row
pub type RowList = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    pub fn index(row: i8, col: i8) -> Option<usize> {
        if col < 0 || col >= BOARD_WIDTH as i8 || row < 0 || row >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((row as usize) * (BOARD_WIDTH as usize) + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at (row, col); None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col); returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Cell at a linear index; None if out of range
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// True when the linear index is in range and holds a locked cell.
    ///
    /// Out-of-range indices report `false`; callers that care about bounds
    /// go through [`crate::collision::can_place`].
    pub fn is_occupied(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(Some(_)))
    }

    /// Tag every index with `kind`.
    ///
    /// Indices must already be validated as empty and in range. An index past
    /// the end of the board is an invariant violation and panics.
    pub fn mark_occupied(&mut self, indices: &[usize], kind: PieceKind) {
        for &idx in indices {
            assert!(
                idx < BOARD_SIZE,
                "board index {idx} out of range (size {BOARD_SIZE})"
            );
            debug_assert!(self.cells[idx].is_none(), "cell {idx} already occupied");
            self.cells[idx] = Some(kind);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = row * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Indices of all full rows, top to bottom
    pub fn full_rows(&self) -> RowList {
        (0..BOARD_HEIGHT as usize)
            .filter(|&row| self.is_row_full(row))
            .collect()
    }

    /// Clear a row and shift all rows above down by one.
    /// The top row becomes empty; total length is unchanged.
    pub fn clear_row(&mut self, row: usize) {
        if row >= BOARD_HEIGHT as usize {
            return;
        }

        let width = BOARD_WIDTH as usize;

        // copy_within handles overlapping ranges
        self.cells.copy_within(0..row * width, width);

        for cell in &mut self.cells[..width] {
            *cell = None;
        }
    }

    /// Clear all full rows and return the row indices that were cleared (bottom to top).
    ///
    /// Full rows are identified before anything moves, then the remaining
    /// rows are compacted downwards in one two-pointer pass.
    pub fn clear_full_rows(&mut self) -> RowList {
        let mut cleared_rows = RowList::new();
        let width = BOARD_WIDTH as usize;
        let mut write_row = BOARD_HEIGHT as usize;

        for read_row in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_row) {
                cleared_rows.push(read_row);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * width;
                    self.cells.copy_within(src..src + width, write_row * width);
                }
            }
        }

        for cell in &mut self.cells[..write_row * width] {
            *cell = None;
        }

        cleared_rows
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the board as a grid of piece codes (0 = empty)
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (row, out_row) in out.iter_mut().enumerate() {
            let start = row * width;
            for (col, slot) in out_row.iter_mut().enumerate() {
                *slot = self.cells[start + col].map(|k| k.code()).unwrap_or(0);
            }
        }
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Fill a whole row, leaving the listed columns empty.
    ///
    /// Used to set up scenarios (puzzles, tests, benches).
    pub fn fill_row_except(&mut self, row: usize, gaps: &[usize], kind: PieceKind) {
        if row >= BOARD_HEIGHT as usize {
            return;
        }
        let start = row * BOARD_WIDTH as usize;
        for col in 0..BOARD_WIDTH as usize {
            self.cells[start + col] = if gaps.contains(&col) {
                None
            } else {
                Some(kind)
            };
        }
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT as usize);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [None; BOARD_SIZE];
        for (row, line) in cells_2d.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                flat[row * BOARD_WIDTH as usize + col] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(BOARD_WIDTH as usize)
            .map(|row| row.to_vec())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
