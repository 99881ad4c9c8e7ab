// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text rendering of the view model for the terminal.

use std::io::{self, Write};

use gomoku_core::evaluation::BarWidths;
use gomoku_core::{Cell, Move, Player, BOARD_SIZE};

use crate::view::{BoardView, ClockView, GameView};

/// Width of the evaluation bar in characters
const BAR_CHARS: usize = 40;

/// Something that can show a [`GameView`] to the user
pub trait Presenter {
    /// Bring the display up to date. Queued alerts and notices are consumed.
    fn present(&mut self, view: &mut GameView) -> io::Result<()>;

    /// Forget what was last drawn so the next `present` draws everything
    fn invalidate(&mut self) {}
}

/// Render the board as text, 1-indexed labels on both axes
pub fn render_board(board: &BoardView) -> String {
    let mut output = String::new();

    output.push_str("   ");
    for col in 1..=BOARD_SIZE {
        output.push_str(&format!("{:>3}", col));
    }
    output.push('\n');

    for row in 0..BOARD_SIZE {
        output.push_str(&format!("{:>2} ", row + 1));
        for col in 0..BOARD_SIZE {
            let cell = Move::new(row as u8, col as u8)
                .ok()
                .and_then(|mv| board.cell(mv));
            let (marker, symbol) = match cell {
                Some(view) => (if view.marked { '*' } else { ' ' }, piece_symbol(view.piece)),
                None => (' ', ' '),
            };
            output.push(' ');
            output.push(marker);
            output.push(symbol);
        }
        output.push('\n');
    }

    output
}

fn piece_symbol(cell: Cell) -> char {
    match cell {
        Cell::Black => '●',
        Cell::White => '○',
        Cell::Empty => '·',
    }
}

/// Split the bar between the two sides, each keeping at least one character
pub fn render_bar(bar: BarWidths) -> String {
    let total = bar.white + bar.black;
    let share = if total > 0.0 { bar.white / total } else { 0.5 };
    let white = ((share * BAR_CHARS as f64).round() as usize).clamp(1, BAR_CHARS - 1);
    format!(
        "White [{}{}] Black",
        "░".repeat(white),
        "█".repeat(BAR_CHARS - white)
    )
}

fn clock_part(player: Player, clock: &ClockView) -> String {
    let text = if clock.text.is_empty() { "-:--" } else { &clock.text };
    let mut part = format!("{} {}", player.name(), text);
    if clock.active {
        part.push_str(" <");
    }
    if clock.low {
        part.push_str(" (low)");
    }
    part
}

pub fn render_clocks(view: &GameView) -> String {
    format!(
        "{}  |  {}",
        clock_part(Player::Black, &view.clocks.black),
        clock_part(Player::White, &view.clocks.white)
    )
}

/// Everything except the clocks, which change on their own cadence
pub fn render_frame(view: &GameView) -> String {
    let mut frame = render_board(&view.board);
    frame.push('\n');
    frame.push_str(&view.status.text);
    frame.push('\n');
    if !view.evaluation.text.is_empty() {
        frame.push_str(&view.evaluation.text);
        frame.push('\n');
    }
    frame.push_str(&render_bar(view.evaluation.bar));
    frame.push('\n');
    if !view.last_move.text.is_empty() {
        frame.push_str(&view.last_move.text);
        frame.push('\n');
    }
    if !view.board.input_enabled() && !view.status.game_over {
        frame.push_str("Waiting for the server...\n");
    }
    frame
}

/// Prints changed parts of the view to a writer, stdout by default
pub struct TerminalPresenter<W: Write = io::Stdout> {
    out: W,
    last_frame: Option<String>,
    last_clocks: Option<String>,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_frame: None,
            last_clocks: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, view: &mut GameView) -> io::Result<()> {
        let frame = render_frame(view);
        if self.last_frame.as_deref() != Some(frame.as_str()) {
            writeln!(self.out, "\n{}", frame)?;
            self.last_frame = Some(frame);
        }

        let clocks = render_clocks(view);
        if self.last_clocks.as_deref() != Some(clocks.as_str()) {
            writeln!(self.out, "{}", clocks)?;
            self.last_clocks = Some(clocks);
        }

        for alert in view.take_alerts() {
            writeln!(self.out, "*** {} ***", alert)?;
        }
        if let Some(notice) = view.take_notice() {
            writeln!(self.out, "({})", notice)?;
        }

        self.out.flush()
    }

    fn invalidate(&mut self) {
        self.last_frame = None;
        self.last_clocks = None;
    }
}
