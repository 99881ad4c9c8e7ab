// SPDX-License-Identifier: MIT OR Apache-2.0

// Drives the controller against an in-memory server: commands in, network
// events pumped by hand, view inspected after each step.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use gomoku_cli::poller::PollState;
use gomoku_cli::reconciler::{ReconcilerState, MOVE_FAILED_MESSAGE};
use gomoku_cli::{Command, Controller, NetEvent};
use gomoku_core::evaluation::BarWidths;
use gomoku_core::{Cell, ClockSnapshot, GameSnapshot, Move, MoveReply};
use gomoku_network::{ClientConfig, GameServer, NetError};
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Default)]
struct MockServer {
    move_replies: Mutex<VecDeque<Result<MoveReply, String>>>,
    clock: Mutex<Option<ClockSnapshot>>,
    moves: AtomicUsize,
    polls: AtomicUsize,
    restarts: AtomicUsize,
}

impl MockServer {
    fn reply_with(&self, reply: Result<MoveReply, String>) {
        self.move_replies.lock().unwrap().push_back(reply);
    }
}

#[async_trait]
impl GameServer for MockServer {
    async fn game_state(&self) -> Result<ClockSnapshot, NetError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        self.clock
            .lock()
            .unwrap()
            .ok_or_else(|| NetError::Protocol("no clock".to_string()))
    }

    async fn make_move(&self, _mv: Move) -> Result<MoveReply, NetError> {
        self.moves.fetch_add(1, Ordering::SeqCst);
        self.move_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no reply queued".to_string()))
            .map_err(NetError::Protocol)
    }

    async fn restart(&self) -> Result<GameSnapshot, NetError> {
        self.restarts.fetch_add(1, Ordering::SeqCst);
        Ok(GameSnapshot::new_game())
    }
}

fn mv(row: u8, col: u8) -> Move {
    Move::new(row, col).unwrap()
}

fn setup() -> (Arc<MockServer>, Controller, UnboundedReceiver<NetEvent>) {
    let server = Arc::new(MockServer::default());
    let (controller, events) = Controller::new(server.clone(), &ClientConfig::default());
    (server, controller, events)
}

/// Deliver the next network event to the controller
async fn pump(controller: &mut Controller, events: &mut UnboundedReceiver<NetEvent>) {
    let event = events.recv().await.unwrap();
    controller.handle_event(event);
}

fn snapshot_json(value: serde_json::Value) -> MoveReply {
    serde_json::from_value(value).unwrap()
}

fn board_with(stones: &[(usize, usize, u8)]) -> Vec<Vec<u8>> {
    let mut rows = vec![vec![0u8; 15]; 15];
    for (r, c, v) in stones {
        rows[*r][*c] = *v;
    }
    rows
}

#[tokio::test]
async fn rejected_move_is_rolled_back() {
    let (server, mut controller, mut events) = setup();
    server.reply_with(Ok(snapshot_json(json!({ "error": "Not your turn" }))));

    controller.handle_command(Command::Place(mv(7, 7)));
    assert_eq!(controller.view().board.board().get(mv(7, 7)), Cell::Black);
    assert!(!controller.view().board.input_enabled());

    pump(&mut controller, &mut events).await;

    let view = controller.view();
    assert_eq!(view.board.board().get(mv(7, 7)), Cell::Empty);
    assert_eq!(view.alerts(), ["Not your turn".to_string()]);
    assert!(view.board.input_enabled());
    assert_eq!(controller.reconciler().state(), ReconcilerState::Ready);
}

#[tokio::test]
async fn failed_request_uses_generic_message() {
    let (server, mut controller, mut events) = setup();
    server.reply_with(Err("connection refused".to_string()));

    controller.handle_command(Command::Place(mv(0, 0)));
    pump(&mut controller, &mut events).await;

    assert_eq!(controller.view().alerts(), [MOVE_FAILED_MESSAGE.to_string()]);
    assert_eq!(controller.view().board.board().get(mv(0, 0)), Cell::Empty);
}

#[tokio::test]
async fn double_submit_sends_one_request() {
    let (server, mut controller, mut events) = setup();
    server.reply_with(Ok(snapshot_json(json!({
        "board": board_with(&[(7, 7, 1), (7, 8, 2)]),
        "current_player": 1,
        "last_move": [7, 8],
        "ai_score": 40.0
    }))));

    controller.handle_command(Command::Place(mv(7, 7)));
    controller.handle_command(Command::Place(mv(3, 3)));
    assert_eq!(
        controller.view_mut().take_notice().as_deref(),
        Some("Still waiting for the server")
    );
    assert_eq!(controller.view().board.board().get(mv(3, 3)), Cell::Empty);

    pump(&mut controller, &mut events).await;
    assert_eq!(server.moves.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn committed_move_shows_server_board() {
    let (server, mut controller, mut events) = setup();
    server.reply_with(Ok(snapshot_json(json!({
        "board": board_with(&[(7, 7, 1), (6, 6, 2)]),
        "current_player": 1,
        "game_over": false,
        "winner": null,
        "ai_score": -120.0,
        "last_move": [6, 6],
        "time_remaining": { "black": 290, "white": 295 }
    }))));

    controller.handle_command(Command::Place(mv(7, 7)));
    pump(&mut controller, &mut events).await;

    let view = controller.view();
    assert_eq!(view.board.board().get(mv(7, 7)), Cell::Black);
    assert_eq!(view.board.board().get(mv(6, 6)), Cell::White);
    assert_eq!(view.board.highlight(), Some(mv(6, 6)));
    assert_eq!(view.board.marker_count(), 1);
    assert_eq!(view.status.text, "Your turn (Black)");
    assert!(view.evaluation.bar.black > view.evaluation.bar.white);
    assert!(view.board.input_enabled());
    assert!(view.alerts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn game_over_announces_after_delay() {
    let (server, mut controller, mut events) = setup();
    server.reply_with(Ok(snapshot_json(json!({
        "board": board_with(&[(7, 3, 2), (7, 4, 2), (7, 5, 2), (7, 6, 2), (7, 7, 2)]),
        "current_player": 1,
        "game_over": true,
        "winner": "W",
        "ai_score": 9000.0,
        "last_move": [7, 7]
    }))));

    controller.handle_command(Command::Place(mv(0, 0)));
    pump(&mut controller, &mut events).await;

    // Final board and status are up before the announcement
    let view = controller.view();
    assert_eq!(view.status.text, "Game Over - AI won!");
    assert!(view.status.game_over);
    assert!(view.evaluation.text.is_empty());
    assert_eq!(view.evaluation.bar, BarWidths::neutral());
    assert!(view.alerts().is_empty());
    assert!(!view.board.input_enabled());

    let before = tokio::time::Instant::now();
    pump(&mut controller, &mut events).await;
    assert!(before.elapsed() >= Duration::from_millis(100));
    assert_eq!(controller.view().alerts(), ["AI won!".to_string()]);

    controller.handle_command(Command::Place(mv(1, 1)));
    assert_eq!(server.moves.load(Ordering::SeqCst), 1);
    assert_eq!(controller.reconciler().state(), ReconcilerState::GameOver);
}

#[tokio::test]
async fn restart_unlocks_finished_game() {
    let (server, mut controller, mut events) = setup();
    server.reply_with(Ok(snapshot_json(json!({
        "board": board_with(&[(0, 0, 1)]),
        "current_player": 1,
        "game_over": true,
        "winner": "B",
        "last_move": [0, 0]
    }))));

    controller.handle_command(Command::Place(mv(0, 0)));
    pump(&mut controller, &mut events).await;
    assert_eq!(controller.reconciler().state(), ReconcilerState::GameOver);

    controller.handle_command(Command::Restart);
    // The announcement timer and the restart reply race; drain both
    while controller.reconciler().state() != ReconcilerState::Ready {
        pump(&mut controller, &mut events).await;
    }

    let view = controller.view();
    assert_eq!(server.restarts.load(Ordering::SeqCst), 1);
    assert_eq!(view.board.board().get(mv(0, 0)), Cell::Empty);
    assert_eq!(view.board.highlight(), None);
    assert!(view.board.input_enabled());
    assert!(!view.status.game_over);
}

#[tokio::test]
async fn poll_updates_clocks_and_skips_overlap() {
    let (server, mut controller, mut events) = setup();
    *server.clock.lock().unwrap() = Some(ClockSnapshot {
        current_player: gomoku_core::Player::White,
        last_move: Some(mv(4, 4)),
        time_remaining: gomoku_core::TimeRemaining {
            black: 25.0,
            white: 300.0,
        },
    });

    controller.poll_tick();
    controller.poll_tick();
    assert_eq!(controller.poller().state(), PollState::Fetching);
    pump(&mut controller, &mut events).await;

    assert_eq!(server.polls.load(Ordering::SeqCst), 1);
    assert_eq!(controller.poller().state(), PollState::Idle);

    let view = controller.view();
    assert_eq!(view.clocks.black.text, "0:25");
    assert!(view.clocks.black.low);
    assert_eq!(view.clocks.white.text, "5:00");
    assert!(view.clocks.white.active);
    assert_eq!(view.last_move.text, "Last move: (5, 5)");
    assert_eq!(view.board.highlight(), None);
}

#[tokio::test]
async fn failed_poll_keeps_clocks() {
    let (server, mut controller, mut events) = setup();
    controller.poll_tick();
    pump(&mut controller, &mut events).await;

    assert_eq!(server.polls.load(Ordering::SeqCst), 1);
    assert!(controller.view().clocks.black.text.is_empty());
    assert_eq!(controller.poller().state(), PollState::Idle);
}

#[tokio::test]
async fn fractional_clock_in_reply_still_commits() {
    let (server, mut controller, mut events) = setup();
    server.reply_with(Ok(snapshot_json(json!({
        "board": board_with(&[(7, 7, 1), (8, 8, 2)]),
        "current_player": 1,
        "last_move": [8, 8],
        "time_remaining": { "black": 299.5, "white": 300 }
    }))));

    controller.handle_command(Command::Place(mv(7, 7)));
    pump(&mut controller, &mut events).await;

    let view = controller.view();
    assert_eq!(view.board.board().get(mv(7, 7)), Cell::Black);
    assert_eq!(view.board.board().get(mv(8, 8)), Cell::White);
    assert!(view.alerts().is_empty());
    assert_eq!(controller.reconciler().state(), ReconcilerState::Ready);
}
