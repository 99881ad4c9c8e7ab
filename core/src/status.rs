// SPDX-License-Identifier: MIT OR Apache-2.0

//! Status line and evaluation line derivation

use crate::evaluation::{BarWidths, EvaluationMapper};
use crate::snapshot::GameSnapshot;
use crate::{Player, Winner};

/// Text shown while waiting on the AI
pub const AI_THINKING: &str = "AI is thinking...";
/// Text shown when it is the human's move
pub const YOUR_TURN: &str = "Your turn (Black)";

/// What the status area should show for one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub status_line: String,
    pub game_over: bool,
    /// `None` when the game is over or the server sent no score
    pub evaluation_line: Option<String>,
    pub bar: BarWidths,
}

impl StatusReport {
    pub fn from_snapshot(snapshot: &GameSnapshot, mapper: &EvaluationMapper) -> Self {
        if snapshot.game_over {
            return Self {
                status_line: game_over_line(snapshot.winner).to_string(),
                game_over: true,
                evaluation_line: None,
                bar: BarWidths::neutral(),
            };
        }

        let status_line = match snapshot.current_player {
            Player::Black => YOUR_TURN,
            Player::White => AI_THINKING,
        }
        .to_string();

        match snapshot.ai_score.filter(|s| s.is_finite()) {
            Some(score) => {
                let reading = mapper.read(score);
                Self {
                    status_line,
                    game_over: false,
                    evaluation_line: Some(reading.describe()),
                    bar: reading.bar,
                }
            }
            None => Self {
                status_line,
                game_over: false,
                evaluation_line: None,
                bar: mapper.bar_widths(0.0),
            },
        }
    }
}

/// Status text for a finished game. Anything but a Black win reads as an AI win.
pub fn game_over_line(winner: Option<Winner>) -> &'static str {
    if winner.is_some_and(|w| w.is_human()) {
        "Game Over - You won!"
    } else {
        "Game Over - AI won!"
    }
}

/// Text of the end-of-game announcement
pub fn announcement(winner: Option<Winner>) -> &'static str {
    if winner.is_some_and(|w| w.is_human()) {
        "You won!"
    } else {
        "AI won!"
    }
}
