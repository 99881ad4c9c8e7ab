// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game server client
//!
//! The server exposes three JSON endpoints:
//! - `GET /game_state` returns a clock-only snapshot
//! - `POST /make_move` with `{row, col}` returns `{error}` or a full snapshot
//! - `POST /restart` returns a full snapshot of a fresh game

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use gomoku_core::{ClockSnapshot, GameSnapshot, Move, MoveReply};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::NetError;

/// Common interface to the game server
#[async_trait]
pub trait GameServer: Send + Sync {
    /// Poll the clock, active player and last move
    async fn game_state(&self) -> Result<ClockSnapshot, NetError>;

    /// Submit the human move at `mv`
    async fn make_move(&self, mv: Move) -> Result<MoveReply, NetError>;

    /// Start a fresh game
    async fn restart(&self) -> Result<GameSnapshot, NetError>;
}

#[derive(Debug, Serialize)]
struct MoveRequest {
    row: u8,
    col: u8,
}

impl From<Move> for MoveRequest {
    fn from(mv: Move) -> Self {
        Self {
            row: mv.row(),
            col: mv.col(),
        }
    }
}

/// reqwest implementation of [`GameServer`]
#[derive(Debug, Clone)]
pub struct HttpGameServer {
    client: reqwest::Client,
    game_state_url: Url,
    make_move_url: Url,
    restart_url: Url,
}

impl HttpGameServer {
    /// Create a client for the server rooted at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .with_context(|| format!("Invalid server URL: {}", base_url))?;

        // Url::join replaces the last segment unless the path ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            game_state_url: base.join("game_state")?,
            make_move_url: base.join("make_move")?,
            restart_url: base.join("restart")?,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.server_url, config.request_timeout())
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, NetError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NetError::Status { status, body });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl GameServer for HttpGameServer {
    async fn game_state(&self) -> Result<ClockSnapshot, NetError> {
        let response = self.client.get(self.game_state_url.clone()).send().await?;
        Self::read_json(response).await
    }

    async fn make_move(&self, mv: Move) -> Result<MoveReply, NetError> {
        tracing::debug!("POST {} {}", self.make_move_url, mv);
        let response = self
            .client
            .post(self.make_move_url.clone())
            .json(&MoveRequest::from(mv))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn restart(&self) -> Result<GameSnapshot, NetError> {
        let response = self.client.post(self.restart_url.clone()).send().await?;
        let snapshot: GameSnapshot = Self::read_json(response).await?;
        if snapshot.board.is_none() {
            return Err(NetError::Protocol("restart response has no board".into()));
        }
        Ok(snapshot)
    }
}
