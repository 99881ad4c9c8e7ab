// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move reconciler
//!
//! Governs one human move at a time:
//!
//! ```text
//! Ready --submit--> Pending --reply--> Ready       (rolled back / committed)
//!                           \--reply--> GameOver   (committed, game finished)
//! Ready | GameOver --restart--> Restarting --> Ready | GameOver
//! ```
//!
//! While Pending the board carries exactly one speculative cell, saved
//! together with the value it replaced.

use gomoku_core::status::announcement;
use gomoku_core::{Cell, GameSnapshot, Move, MoveReply, Player};
use gomoku_network::NetError;
use thiserror::Error;

use crate::status::StatusRenderer;
use crate::view::{GameView, ViewError};

/// Shown when the move request itself failed
pub const MOVE_FAILED_MESSAGE: &str = "Error making move. Please try again.";
/// Shown when a restart request failed
pub const RESTART_FAILED_MESSAGE: &str = "Error restarting game. Please try again.";

/// The speculative overlay of an unconfirmed move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMove {
    pub mv: Move,
    pub prior: Cell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilerState {
    Ready,
    Pending(PendingMove),
    /// A finished game; input stays locked until a restart
    GameOver,
    /// Waiting on `/restart`; remembers whether the old game was over
    Restarting { was_over: bool },
}

/// Why a command was refused without contacting the server
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Still waiting for the server")]
    Busy,
    #[error("The game is over. Type 'restart' to play again.")]
    GameOver,
    #[error(transparent)]
    View(#[from] ViewError),
}

/// How a pending move ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Committed {
        game_over: bool,
        /// Winner message to show once the final board has been drawn
        announcement: Option<&'static str>,
    },
    RolledBack {
        message: String,
    },
}

#[derive(Debug, Clone)]
pub struct MoveReconciler {
    state: ReconcilerState,
}

impl Default for MoveReconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveReconciler {
    pub fn new() -> Self {
        Self {
            state: ReconcilerState::Ready,
        }
    }

    pub fn state(&self) -> ReconcilerState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, ReconcilerState::Pending(_))
    }

    /// Ready -> Pending. On success the caller must send the move request.
    pub fn submit(&mut self, view: &mut GameView, mv: Move) -> Result<(), SubmitError> {
        match self.state {
            ReconcilerState::Ready => {}
            ReconcilerState::GameOver => return Err(SubmitError::GameOver),
            ReconcilerState::Pending(_) | ReconcilerState::Restarting { .. } => {
                return Err(SubmitError::Busy)
            }
        }

        let prior = view.board.apply_speculative(mv, Player::HUMAN)?;
        view.board.lock_input();
        self.state = ReconcilerState::Pending(PendingMove { mv, prior });
        tracing::debug!("Move {} pending, prior cell {:?}", mv, prior);
        Ok(())
    }

    /// Pending -> Ready | GameOver. Returns `None` if no move was pending.
    pub fn resolve(
        &mut self,
        view: &mut GameView,
        status: &mut StatusRenderer,
        result: Result<MoveReply, NetError>,
    ) -> Option<Resolution> {
        let ReconcilerState::Pending(pending) = self.state else {
            tracing::warn!("Move reply arrived with no move pending");
            return None;
        };

        let snapshot = match result {
            Ok(MoveReply::Accepted(snapshot)) if snapshot.board.is_some() => snapshot,
            Ok(MoveReply::Accepted(snapshot)) => {
                tracing::error!("Invalid server response - missing board: {:?}", snapshot);
                return Some(self.roll_back(view, status, pending, MOVE_FAILED_MESSAGE));
            }
            Ok(MoveReply::Rejected { error }) => {
                tracing::info!("Server rejected {}: {}", pending.mv, error);
                return Some(self.roll_back(view, status, pending, &error));
            }
            Err(e) if e.is_protocol() => {
                tracing::error!("Invalid server response to move {}: {}", pending.mv, e);
                return Some(self.roll_back(view, status, pending, MOVE_FAILED_MESSAGE));
            }
            Err(e) => {
                tracing::error!("Error making move {}: {}", pending.mv, e);
                return Some(self.roll_back(view, status, pending, MOVE_FAILED_MESSAGE));
            }
        };

        // The authoritative board supersedes the speculative cell
        apply_confirmed(view, status, &snapshot);
        if snapshot.last_move.is_some() {
            view.last_move.show(snapshot.last_move);
        }

        let game_over = snapshot.game_over;
        if game_over {
            self.state = ReconcilerState::GameOver;
        } else {
            self.state = ReconcilerState::Ready;
            view.board.unlock_input();
        }
        tracing::info!("Move {} committed (game over: {})", pending.mv, game_over);

        Some(Resolution::Committed {
            game_over,
            announcement: game_over.then(|| announcement(snapshot.winner)),
        })
    }

    /// Ready | GameOver -> Restarting. On success the caller must send the
    /// restart request.
    pub fn begin_restart(&mut self, view: &mut GameView) -> Result<(), SubmitError> {
        let was_over = match self.state {
            ReconcilerState::Ready => false,
            ReconcilerState::GameOver => true,
            ReconcilerState::Pending(_) | ReconcilerState::Restarting { .. } => {
                return Err(SubmitError::Busy)
            }
        };
        view.board.lock_input();
        self.state = ReconcilerState::Restarting { was_over };
        Ok(())
    }

    /// Restarting -> Ready | GameOver
    pub fn finish_restart(
        &mut self,
        view: &mut GameView,
        status: &mut StatusRenderer,
        result: Result<GameSnapshot, NetError>,
    ) {
        let ReconcilerState::Restarting { was_over } = self.state else {
            tracing::warn!("Restart reply arrived with no restart in progress");
            return;
        };

        match result {
            Ok(snapshot) if snapshot.board.is_some() => {
                apply_confirmed(view, status, &snapshot);
                view.last_move.show(None);
                if snapshot.game_over {
                    self.state = ReconcilerState::GameOver;
                } else {
                    self.state = ReconcilerState::Ready;
                    view.board.unlock_input();
                }
                tracing::info!("Game restarted");
            }
            Ok(_) => {
                tracing::error!("Invalid restart response - missing board");
                self.abort_restart(view, was_over);
            }
            Err(e) if e.is_protocol() => {
                tracing::error!("Invalid restart response: {}", e);
                self.abort_restart(view, was_over);
            }
            Err(e) => {
                tracing::error!("Error restarting game: {}", e);
                self.abort_restart(view, was_over);
            }
        }
    }

    fn abort_restart(&mut self, view: &mut GameView, was_over: bool) {
        view.alert(RESTART_FAILED_MESSAGE);
        if was_over {
            self.state = ReconcilerState::GameOver;
        } else {
            self.state = ReconcilerState::Ready;
            view.board.unlock_input();
        }
    }

    fn roll_back(
        &mut self,
        view: &mut GameView,
        status: &StatusRenderer,
        pending: PendingMove,
        message: &str,
    ) -> Resolution {
        view.board.revert(pending.mv, pending.prior);
        status.resync(view);
        view.alert(message);
        view.board.unlock_input();
        self.state = ReconcilerState::Ready;
        Resolution::RolledBack {
            message: message.to_string(),
        }
    }
}

/// Draw a confirmed full snapshot: board, marker and status
fn apply_confirmed(view: &mut GameView, status: &mut StatusRenderer, snapshot: &GameSnapshot) {
    if let Some(rows) = &snapshot.board {
        let report = view.board.render(rows);
        if !report.is_clean() {
            tracing::warn!("{} cells could not be drawn", report.skipped.len());
        }
    }
    view.board.highlight_last_move(snapshot.last_move);
    status.render(view, snapshot);
}
