// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client configuration file

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use gomoku_core::clock::DEFAULT_LOW_TIME_THRESHOLD;
use gomoku_core::evaluation::DEFAULT_SCALE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root URL of the game server
    pub server_url: String,
    /// Clock poll cadence
    pub poll_interval_ms: u64,
    /// Pause between the final board and the winner announcement
    pub announce_delay_ms: u64,
    /// Seconds below which a clock is flagged as low
    pub low_time_threshold: u64,
    /// Logistic scale of the evaluation bar
    pub evaluation_scale: f64,
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            poll_interval_ms: 1000,
            announce_delay_ms: 100,
            low_time_threshold: DEFAULT_LOW_TIME_THRESHOLD,
            evaluation_scale: DEFAULT_SCALE,
            request_timeout_secs: 10,
        }
    }
}

impl ClientConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn announce_delay(&self) -> Duration {
        Duration::from_millis(self.announce_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Reject values the client cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            bail!("poll_interval_ms must be greater than zero");
        }
        if !(self.evaluation_scale.is_finite() && self.evaluation_scale > 0.0) {
            bail!("evaluation_scale must be a positive number");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        reqwest::Url::parse(&self.server_url)
            .with_context(|| format!("Invalid server_url: {}", self.server_url))?;
        Ok(())
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("io", "gomoku", "gomoku")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Load the config from the platform config directory, creating it with
/// defaults on first run
pub fn load_config() -> Result<ClientConfig> {
    let config_path = get_config_path().context("Failed to determine config path")?;

    if !config_path.exists() {
        tracing::info!("Config file not found, creating default at: {}", config_path.display());

        let default_config = ClientConfig::default();
        if let Err(e) = save_config_to(&config_path, &default_config) {
            // A read-only home should not stop the client from starting
            tracing::warn!("Could not write default config: {:#}", e);
        }
        return Ok(default_config);
    }

    load_config_from(&config_path)
}

/// Load and validate the config at `path`
pub fn load_config_from(path: &Path) -> Result<ClientConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = toml::from_str::<ClientConfig>(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    Ok(config)
}

pub fn save_config_to(path: &Path, config: &ClientConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let toml_content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, toml_content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    tracing::info!("Saved config to: {}", path.display());
    Ok(())
}
