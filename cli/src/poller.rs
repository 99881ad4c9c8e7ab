// SPDX-License-Identifier: MIT OR Apache-2.0

//! Clock poller
//!
//! Idle -> Fetching -> Idle, once per timer tick. Writes only the clock panel
//! and the last-move text; never the board.

use gomoku_core::clock::{format_time, is_low_time};
use gomoku_core::{ClockSnapshot, Player};
use gomoku_network::NetError;

use crate::view::GameView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Fetching,
}

#[derive(Debug, Clone)]
pub struct ClockPoller {
    state: PollState,
    low_time_threshold: u64,
}

impl ClockPoller {
    pub fn new(low_time_threshold: u64) -> Self {
        Self {
            state: PollState::Idle,
            low_time_threshold,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    /// Timer fired. Returns whether a fetch should be issued; a tick that
    /// lands while the previous fetch is outstanding is dropped.
    pub fn begin_tick(&mut self) -> bool {
        match self.state {
            PollState::Idle => {
                self.state = PollState::Fetching;
                true
            }
            PollState::Fetching => {
                tracing::debug!("Clock fetch still in flight, skipping tick");
                false
            }
        }
    }

    /// Fetch finished. Failures leave the displayed values untouched.
    pub fn complete(&mut self, view: &mut GameView, result: Result<ClockSnapshot, NetError>) {
        self.state = PollState::Idle;
        match result {
            Ok(snapshot) => self.apply(view, &snapshot),
            Err(e) => tracing::error!("Error updating time: {}", e),
        }
    }

    pub fn apply(&self, view: &mut GameView, snapshot: &ClockSnapshot) {
        for player in [Player::Black, Player::White] {
            let seconds = snapshot.time_remaining.for_player(player);
            let clock = view.clocks.side_mut(player);
            clock.text = format_time(seconds);
            clock.low = is_low_time(seconds, self.low_time_threshold);
        }
        view.clocks.set_active(snapshot.current_player);

        if snapshot.last_move.is_some() {
            view.last_move.show(snapshot.last_move);
        }
    }
}
