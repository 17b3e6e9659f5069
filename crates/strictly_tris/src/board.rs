//! The N x N grid.

use super::action::MoveError;
use super::types::{Cell, Coord, Dimension, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Square board of `N * N` cells in row-major order.
///
/// The board only knows about bounds and occupancy. Phase gating and win
/// logic live in the engine and the rules module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: Dimension,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board of the given size.
    #[instrument]
    pub fn new(size: Dimension) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size.cell_count()],
        }
    }

    /// Side length.
    pub fn size(&self) -> Dimension {
        self.size
    }

    /// Gets the cell at `coord`, or `None` if it is off the board.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// True if the cell exists and holds no mark.
    pub fn is_empty(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Cell::Empty))
    }

    /// Puts `player`'s mark on an empty cell.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` when the coordinate is off the board, `Occupied` when
    /// the cell already holds a mark. The board is unchanged on error.
    #[instrument(skip(self), fields(size = self.size.get()))]
    pub fn place(&mut self, coord: Coord, player: Player) -> Result<(), MoveError> {
        let index = self.index(coord).ok_or(MoveError::OutOfBounds {
            row: coord.row(),
            col: coord.col(),
            size: self.size.get(),
        })?;

        if self.cells[index] != Cell::Empty {
            debug!(%coord, "Cell already occupied");
            return Err(MoveError::Occupied(coord));
        }

        self.cells[index] = Cell::Occupied(player);
        Ok(())
    }

    /// Throws away every mark and re-seeds the grid at `size`.
    #[instrument(skip(self))]
    pub fn reset(&mut self, size: Dimension) {
        self.size = size;
        self.cells = vec![Cell::Empty; size.cell_count()];
    }

    /// True iff every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Number of cells holding a mark.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Number of marks `player` has on the board.
    pub fn marks_of(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(player))
            .count()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates the board one row at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.get())
    }

    /// Coordinates of every empty cell.
    pub fn empty_cells(&self) -> Vec<Coord> {
        let n = self.size.get();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| Coord::new(i / n, i % n))
            .collect()
    }

    /// Formats the board as a human-readable grid with row/column indices.
    pub fn display(&self) -> String {
        let n = self.size.get();
        let width = (n - 1).to_string().len();
        let mut result = String::new();

        result.push_str(&" ".repeat(width + 1));
        for col in 0..n {
            result.push_str(&format!(" {:>width$}", col, width = width));
        }
        result.push('\n');

        for (row, cells) in self.rows().enumerate() {
            result.push_str(&format!("{:>width$} ", row, width = width));
            for cell in cells {
                result.push_str(&format!(" {:>width$}", cell.symbol(), width = width));
            }
            if row + 1 < n {
                result.push('\n');
            }
        }
        result
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.size
            .contains(coord)
            .then(|| coord.row() * self.size.get() + coord.col())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Dimension::default())
    }
}
