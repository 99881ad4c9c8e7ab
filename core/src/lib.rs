// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gomoku Core - Board, snapshot and evaluation types
//!
//! This crate provides the pure half of the Gomoku client:
//! - The 15x15 board matrix and its cell values
//! - Server snapshot types as they appear on the wire
//! - The evaluation mapper (score to win probability and advantage label)
//! - Status and clock text derivation
//! - Parsing of user-typed coordinates

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod clock;
pub mod coordinate;
pub mod evaluation;
pub mod snapshot;
pub mod status;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use thiserror::Error;

/// Number of rows and columns on the board
pub const BOARD_SIZE: usize = 15;

/// Player in the game. The human always plays Black against the AI's White.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Player {
    /// Black, the human player (moves first)
    Black = 1,
    /// White, the AI opponent
    White = 2,
}

impl Player {
    /// The side controlled by the local user
    pub const HUMAN: Player = Player::Black;

    /// Returns the opposite player
    pub fn opposite(&self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Cell value of this player's piece
    pub fn stone(&self) -> Cell {
        Cell::from(*self)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Player::Black => "Black",
            Player::White => "White",
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = GameError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Player::Black),
            2 => Ok(Player::White),
            other => Err(GameError::InvalidPlayer(other)),
        }
    }
}

/// Content of a single board intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Black = 1,
    White = 2,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl TryFrom<u8> for Cell {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Black),
            2 => Ok(Cell::White),
            other => Err(GameError::InvalidCell(other)),
        }
    }
}

/// Winner of a finished game, encoded as `"B"` / `"W"` by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "W")]
    White,
}

impl Winner {
    /// Whether the local (Black) player won
    pub fn is_human(&self) -> bool {
        matches!(self, Winner::Black)
    }
}

/// A board position, 0-indexed. Always within `0..BOARD_SIZE` on both axes.
///
/// On the wire a move is the two-element array `[row, col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Move {
    row: u8,
    col: u8,
}

impl Move {
    /// Create a move, rejecting coordinates outside the board
    pub fn new(row: u8, col: u8) -> Result<Self, GameError> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Ok(Self { row, col })
        } else {
            Err(GameError::InvalidCoordinate { row, col })
        }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Row-major index into a flattened board
    pub fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }
}

impl TryFrom<(u8, u8)> for Move {
    type Error = GameError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Move::new(row, col)
    }
}

impl From<Move> for (u8, u8) {
    fn from(mv: Move) -> Self {
        (mv.row, mv.col)
    }
}

/// User-facing form, 1-indexed
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row + 1, self.col + 1)
    }
}

/// Errors raised while building domain values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The coordinate is outside the board
    #[error("Invalid coordinate ({row}, {col})")]
    InvalidCoordinate { row: u8, col: u8 },

    /// A board cell carried an unknown value
    #[error("Invalid cell value {0}")]
    InvalidCell(u8),

    /// A player code other than 1 or 2
    #[error("Invalid player code {0}")]
    InvalidPlayer(u8),

    /// Text could not be read as a coordinate
    #[error("Invalid coordinate '{0}': use 1-15 or a-f")]
    UnparsableCoordinate(String),
}

pub use board::Board;
pub use evaluation::{AdvantageLabel, BarWidths, EvaluationMapper, EvaluationReading};
pub use snapshot::{ClockSnapshot, GameSnapshot, MoveReply, TimeRemaining};
pub use status::StatusReport;
