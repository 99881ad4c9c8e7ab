// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation

use crate::{Cell, GameError, Move, BOARD_SIZE};

/// The 15x15 board matrix, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::Empty; BOARD_SIZE * BOARD_SIZE],
        }
    }

    /// Build a board from wire rows, failing on any short row or unknown value
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, GameError> {
        let mut board = Self::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let mv = Move::new(row as u8, col as u8)?;
                let raw = rows
                    .get(row)
                    .and_then(|r| r.get(col))
                    .copied()
                    .ok_or(GameError::InvalidCoordinate {
                        row: row as u8,
                        col: col as u8,
                    })?;
                board.set(mv, Cell::try_from(raw)?);
            }
        }
        Ok(board)
    }

    /// Get the content at the specified position
    pub fn get(&self, mv: Move) -> Cell {
        self.cells[mv.index()]
    }

    /// Overwrite one cell, returning what was there before
    pub fn set(&mut self, mv: Move, cell: Cell) -> Cell {
        std::mem::replace(&mut self.cells[mv.index()], cell)
    }

    /// Count cells holding the given value
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// Wire form: one `Vec<u8>` per row
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(BOARD_SIZE)
            .map(|row| row.iter().map(|c| *c as u8).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(row: u8, col: u8) -> Move {
        Move::new(row, col).unwrap()
    }

    #[test]
    fn set_returns_prior_value() {
        let mut board = Board::new();
        assert_eq!(board.set(mv(3, 4), Cell::Black), Cell::Empty);
        assert_eq!(board.set(mv(3, 4), Cell::White), Cell::Black);
        assert_eq!(board.get(mv(3, 4)), Cell::White);
        assert_eq!(board.count(Cell::Empty), BOARD_SIZE * BOARD_SIZE - 1);
    }

    #[test]
    fn rows_round_trip() {
        let mut board = Board::new();
        board.set(mv(0, 0), Cell::Black);
        board.set(mv(14, 13), Cell::White);
        let rows = board.to_rows();
        assert_eq!(rows.len(), BOARD_SIZE);
        assert_eq!(rows[14][13], 2);
        assert_eq!(Board::from_rows(&rows).unwrap(), board);
    }

    #[test]
    fn from_rows_rejects_malformed_input() {
        let mut rows = Board::new().to_rows();
        rows[2][5] = 7;
        assert_eq!(Board::from_rows(&rows), Err(GameError::InvalidCell(7)));

        let mut short = Board::new().to_rows();
        short[9].truncate(3);
        assert!(Board::from_rows(&short).is_err());
    }
}
