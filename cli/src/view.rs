// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retained view model.
//!
//! [`GameView`] is the one structure every component writes into. It is built
//! once at start-up from a [`BoardLayout`] and passed by `&mut` into each
//! operation. Field ownership is split: the move reconciler is the only
//! writer of the board, the clock poller only writes the clock panel and the
//! last-move text.

use gomoku_core::evaluation::BarWidths;
use gomoku_core::{Board, Cell, Move, Player, BOARD_SIZE};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("No cell handle at {0}")]
    MissingCell(Move),
}

/// Which cell handles exist in the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    present: Vec<bool>,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::full()
    }
}

impl BoardLayout {
    /// Every intersection has a handle
    pub fn full() -> Self {
        Self {
            present: vec![true; BOARD_SIZE * BOARD_SIZE],
        }
    }

    /// Same layout with the handle at `mv` missing
    pub fn without(mut self, mv: Move) -> Self {
        self.present[mv.index()] = false;
        self
    }
}

/// Visual state of one intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellView {
    pub piece: Cell,
    /// Carries the last-move marker
    pub marked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The view has no handle for this cell
    MissingHandle,
    /// The server board has no value here (short row or missing row)
    MissingValue,
    /// The server sent something other than 0, 1 or 2
    InvalidValue(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedCell {
    pub row: usize,
    pub col: usize,
    pub reason: SkipReason,
}

/// Cells a render pass could not draw
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub skipped: Vec<SkippedCell>,
}

impl RenderReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Board View Model: the last-known-good matrix plus its cell handles
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    board: Board,
    cells: Vec<Option<CellView>>,
    highlight: Option<Move>,
    input_enabled: bool,
}

impl BoardView {
    pub fn new(layout: &BoardLayout) -> Self {
        Self {
            board: Board::new(),
            cells: layout
                .present
                .iter()
                .map(|present| present.then(CellView::default))
                .collect(),
            highlight: None,
            input_enabled: true,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, mv: Move) -> Option<&CellView> {
        self.cells[mv.index()].as_ref()
    }

    pub fn highlight(&self) -> Option<Move> {
        self.highlight
    }

    /// Number of cells carrying the last-move marker
    pub fn marker_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.marked).count()
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn lock_input(&mut self) {
        self.input_enabled = false;
    }

    pub fn unlock_input(&mut self) {
        self.input_enabled = true;
    }

    /// Draw a server board. Rendering the same rows twice leaves the view
    /// unchanged. Bad cells are logged and skipped; the matrix keeps its
    /// previous value for them.
    pub fn render(&mut self, rows: &[Vec<u8>]) -> RenderReport {
        let mut report = RenderReport::default();

        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let mut skip = |reason| {
                    tracing::warn!("Skipping cell ({}, {}): {:?}", row, col, reason);
                    report.skipped.push(SkippedCell { row, col, reason });
                };

                let Some(raw) = rows.get(row).and_then(|r| r.get(col)).copied() else {
                    skip(SkipReason::MissingValue);
                    continue;
                };
                let Ok(cell) = Cell::try_from(raw) else {
                    skip(SkipReason::InvalidValue(raw));
                    continue;
                };

                let idx = row * BOARD_SIZE + col;
                // Both indices are below BOARD_SIZE, so this cannot fail
                if let Ok(mv) = Move::new(row as u8, col as u8) {
                    self.board.set(mv, cell);
                }
                match self.cells[idx].as_mut() {
                    Some(view) => view.piece = cell,
                    None => skip(SkipReason::MissingHandle),
                }
            }
        }

        report
    }

    /// Write `player`'s piece at `mv` ahead of confirmation, returning the
    /// value it replaced
    pub fn apply_speculative(&mut self, mv: Move, player: Player) -> Result<Cell, ViewError> {
        let view = self.cells[mv.index()]
            .as_mut()
            .ok_or(ViewError::MissingCell(mv))?;
        view.piece = player.stone();
        Ok(self.board.set(mv, player.stone()))
    }

    /// Put back exactly the value saved by [`apply_speculative`](Self::apply_speculative)
    pub fn revert(&mut self, mv: Move, prior: Cell) {
        self.board.set(mv, prior);
        match self.cells[mv.index()].as_mut() {
            Some(view) => view.piece = prior,
            None => tracing::warn!("Reverted {} without a cell handle", mv),
        }
    }

    /// Move the last-move marker. `None` just clears it.
    pub fn highlight_last_move(&mut self, mv: Option<Move>) {
        for view in self.cells.iter_mut().flatten() {
            view.marked = false;
        }
        self.highlight = None;

        let Some(mv) = mv else {
            return;
        };
        match self.cells[mv.index()].as_mut() {
            Some(view) => {
                view.marked = true;
                self.highlight = Some(mv);
            }
            None => tracing::warn!("Could not find cell for last move at {}", mv),
        }
    }
}

/// One player's clock
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClockView {
    pub text: String,
    pub active: bool,
    pub low: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClockPanel {
    pub black: ClockView,
    pub white: ClockView,
}

impl ClockPanel {
    pub fn side(&self, player: Player) -> &ClockView {
        match player {
            Player::Black => &self.black,
            Player::White => &self.white,
        }
    }

    pub fn side_mut(&mut self, player: Player) -> &mut ClockView {
        match player {
            Player::Black => &mut self.black,
            Player::White => &mut self.white,
        }
    }

    /// Mark exactly `player` as the side to move
    pub fn set_active(&mut self, player: Player) {
        self.side_mut(player).active = true;
        self.side_mut(player.opposite()).active = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusView {
    pub text: String,
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationView {
    /// Empty when there is nothing to show
    pub text: String,
    pub bar: BarWidths,
}

impl Default for EvaluationView {
    fn default() -> Self {
        Self {
            text: String::new(),
            bar: BarWidths::neutral(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LastMoveView {
    pub text: String,
}

impl LastMoveView {
    /// Show `mv` 1-indexed, or clear the line
    pub fn show(&mut self, mv: Option<Move>) {
        self.text = match mv {
            Some(mv) => format!("Last move: {}", mv),
            None => String::new(),
        };
    }
}

/// Everything the presenter draws
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub board: BoardView,
    pub clocks: ClockPanel,
    pub status: StatusView,
    pub evaluation: EvaluationView,
    pub last_move: LastMoveView,
    alerts: Vec<String>,
    notice: Option<String>,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(&BoardLayout::full())
    }
}

impl GameView {
    pub fn new(layout: &BoardLayout) -> Self {
        Self {
            board: BoardView::new(layout),
            clocks: ClockPanel::default(),
            status: StatusView {
                text: gomoku_core::status::YOUR_TURN.to_string(),
                game_over: false,
            },
            evaluation: EvaluationView::default(),
            last_move: LastMoveView::default(),
            alerts: Vec::new(),
            notice: None,
        }
    }

    /// Queue a modal message for the user
    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Transient hint, e.g. why a command was ignored
    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}
