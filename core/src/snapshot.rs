// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server snapshot payloads.
//!
//! Two shapes exist. A [`GameSnapshot`] is returned by `make_move` and
//! `restart` and carries the board. A [`ClockSnapshot`] is returned by
//! `game_state` and has no board field at all, so it can never be mistaken
//! for a board update.

use serde::{Deserialize, Serialize};

use crate::{Move, Player, Winner};

/// Remaining clock time per side, in seconds. The server may send
/// fractional values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub black: f64,
    pub white: f64,
}

impl TimeRemaining {
    pub fn for_player(&self, player: Player) -> f64 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }
}

/// Full game state as reported after a move or a restart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Raw board rows. Kept in wire form so rendering can skip bad cells
    /// instead of rejecting the whole payload.
    #[serde(default)]
    pub board: Option<Vec<Vec<u8>>>,
    pub current_player: Player,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub winner: Option<Winner>,
    #[serde(default)]
    pub ai_score: Option<f64>,
    #[serde(default)]
    pub last_move: Option<Move>,
    #[serde(default)]
    pub time_remaining: Option<TimeRemaining>,
}

impl GameSnapshot {
    /// Snapshot of a fresh game with an empty board
    pub fn new_game() -> Self {
        Self {
            board: Some(crate::Board::new().to_rows()),
            current_player: Player::HUMAN,
            game_over: false,
            winner: None,
            ai_score: None,
            last_move: None,
            time_remaining: None,
        }
    }
}

/// Minimal state polled on a timer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub current_player: Player,
    #[serde(default)]
    pub last_move: Option<Move>,
    pub time_remaining: TimeRemaining,
}

/// Body of a `make_move` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoveReply {
    /// The server refused the move (illegal, not your turn, game over...)
    Rejected { error: String },
    /// The move was played; carries the state after any AI reply
    Accepted(GameSnapshot),
}
