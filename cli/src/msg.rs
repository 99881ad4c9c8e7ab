// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message types between the input reader, network tasks and the controller.

use gomoku_core::coordinate::parse_move;
use gomoku_core::{ClockSnapshot, GameSnapshot, Move, MoveReply};
use gomoku_network::NetError;

/// Commands typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Place the human piece
    Place(Move),
    /// Start a new game
    Restart,
    /// Draw the whole screen again
    Redraw,
    /// Leave the client
    Quit,
}

pub const HELP: &str = "\
Commands:
  <row> <col>     place a stone, e.g. '8 8' or 'a f' (1-15, or a-f for 10-15)
  restart | new   start a new game
  board           redraw the board
  help            show this help
  quit | exit     leave";

impl Command {
    /// Parse one input line. `Ok(None)` for blank lines and `help`, which
    /// need no controller action.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "" | "help" | "?" => Ok(None),
            "restart" | "new" => Ok(Some(Command::Restart)),
            "board" => Ok(Some(Command::Redraw)),
            "quit" | "exit" => Ok(Some(Command::Quit)),
            _ => parse_move(line)
                .map(|mv| Some(Command::Place(mv)))
                .map_err(|e| e.to_string()),
        }
    }
}

/// Results delivered back to the controller loop
#[derive(Debug)]
pub enum NetEvent {
    /// A `game_state` poll finished
    ClockFetched(Result<ClockSnapshot, NetError>),
    /// A `make_move` request finished
    MoveResolved(Result<MoveReply, NetError>),
    /// A `restart` request finished
    Restarted(Result<GameSnapshot, NetError>),
    /// The delayed end-of-game announcement is due
    Announce(&'static str),
}
