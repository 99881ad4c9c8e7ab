// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event loop tying the components together.
//!
//! Network calls run as spawned tasks and report back over an unbounded
//! channel, so the view is only ever touched from the loop itself.

use std::sync::Arc;
use std::time::Duration;

use gomoku_core::EvaluationMapper;
use gomoku_network::{ClientConfig, GameServer};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::MissedTickBehavior;

use crate::msg::{Command, NetEvent};
use crate::poller::ClockPoller;
use crate::reconciler::{MoveReconciler, ReconcilerState, Resolution};
use crate::render::Presenter;
use crate::status::StatusRenderer;
use crate::view::{BoardLayout, GameView};

pub struct Controller {
    server: Arc<dyn GameServer>,
    view: GameView,
    status: StatusRenderer,
    poller: ClockPoller,
    reconciler: MoveReconciler,
    events_tx: UnboundedSender<NetEvent>,
    poll_interval: Duration,
    announce_delay: Duration,
}

impl Controller {
    /// Build a controller and the receiving end of its event channel
    pub fn new(
        server: Arc<dyn GameServer>,
        config: &ClientConfig,
    ) -> (Self, UnboundedReceiver<NetEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let controller = Self {
            server,
            view: GameView::new(&BoardLayout::full()),
            status: StatusRenderer::new(EvaluationMapper::with_scale(config.evaluation_scale)),
            poller: ClockPoller::new(config.low_time_threshold),
            reconciler: MoveReconciler::new(),
            events_tx,
            poll_interval: config.poll_interval(),
            announce_delay: config.announce_delay(),
        };
        (controller, events_rx)
    }

    pub fn view(&self) -> &GameView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut GameView {
        &mut self.view
    }

    pub fn reconciler(&self) -> &MoveReconciler {
        &self.reconciler
    }

    pub fn poller(&self) -> &ClockPoller {
        &self.poller
    }

    /// Act on a user command. `Redraw` and `Quit` belong to [`run`](Self::run).
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Place(mv) => match self.reconciler.submit(&mut self.view, mv) {
                Ok(()) => {
                    let server = Arc::clone(&self.server);
                    let tx = self.events_tx.clone();
                    tokio::spawn(async move {
                        let result = server.make_move(mv).await;
                        let _ = tx.send(NetEvent::MoveResolved(result));
                    });
                }
                Err(e) => {
                    tracing::warn!("Ignoring move {}: {}", mv, e);
                    self.view.set_notice(e.to_string());
                }
            },
            Command::Restart => match self.reconciler.begin_restart(&mut self.view) {
                Ok(()) => {
                    let server = Arc::clone(&self.server);
                    let tx = self.events_tx.clone();
                    tokio::spawn(async move {
                        let result = server.restart().await;
                        let _ = tx.send(NetEvent::Restarted(result));
                    });
                }
                Err(e) => {
                    tracing::warn!("Ignoring restart: {}", e);
                    self.view.set_notice(e.to_string());
                }
            },
            Command::Redraw | Command::Quit => {}
        }
    }

    /// Timer tick: start a clock fetch unless one is still outstanding
    pub fn poll_tick(&mut self) {
        if !self.poller.begin_tick() {
            return;
        }
        let server = Arc::clone(&self.server);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = server.game_state().await;
            let _ = tx.send(NetEvent::ClockFetched(result));
        });
    }

    pub fn handle_event(&mut self, event: NetEvent) {
        match event {
            NetEvent::ClockFetched(result) => self.poller.complete(&mut self.view, result),
            NetEvent::MoveResolved(result) => {
                let resolution = self
                    .reconciler
                    .resolve(&mut self.view, &mut self.status, result);
                if let Some(Resolution::Committed {
                    announcement: Some(message),
                    ..
                }) = resolution
                {
                    // Let the final board reach the screen before the announcement
                    let delay = self.announce_delay;
                    let tx = self.events_tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = tx.send(NetEvent::Announce(message));
                    });
                }
            }
            NetEvent::Restarted(result) => {
                self.reconciler
                    .finish_restart(&mut self.view, &mut self.status, result);
            }
            NetEvent::Announce(message) => match self.reconciler.state() {
                ReconcilerState::GameOver | ReconcilerState::Restarting { was_over: true } => {
                    self.view.alert(message)
                }
                _ => tracing::debug!("Dropping stale announcement: {}", message),
            },
        }
    }

    /// Drive the game until `Quit`, end of input or Ctrl+C
    pub async fn run<P: Presenter>(
        mut self,
        mut events: UnboundedReceiver<NetEvent>,
        mut commands: UnboundedReceiver<Command>,
        presenter: &mut P,
    ) -> anyhow::Result<()> {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        presenter.present(&mut self.view)?;

        loop {
            tokio::select! {
                _ = ticker.tick() => self.poll_tick(),
                Some(event) = events.recv() => self.handle_event(event),
                command = commands.recv() => match command {
                    None | Some(Command::Quit) => {
                        tracing::info!("Leaving game");
                        break;
                    }
                    Some(Command::Redraw) => presenter.invalidate(),
                    Some(command) => self.handle_command(command),
                },
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received Ctrl+C, shutting down");
                    break;
                }
            }

            presenter.present(&mut self.view)?;
        }

        Ok(())
    }
}
