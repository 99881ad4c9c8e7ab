// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gomoku CLI
//!
//! Plays against the game server's AI from the terminal. Moves are typed as
//! `<row> <col>`; the board, status, evaluation bar and clocks are printed as
//! they change.

use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use gomoku_cli::msg::HELP;
use gomoku_cli::{Command, Controller, TerminalPresenter};
use gomoku_network::config::{load_config, load_config_from};
use gomoku_network::HttpGameServer;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(
    name = "gomoku",
    about = "Play Gomoku against the server's AI",
    version
)]
struct Args {
    /// Game server URL, overrides the config file
    #[clap(short, long)]
    server: Option<String>,

    /// Config file to use instead of the platform default
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Ask the server for a fresh game before playing
    #[clap(long)]
    new_game: bool,

    /// Enable debug logging
    #[clap(long)]
    debug: bool,

    /// Write logs to this file instead of stderr
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(args: &Args) -> Result<()> {
    let default_level = if args.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Forward parsed stdin lines to the controller until EOF
async fn read_commands(tx: UnboundedSender<Command>) {
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Error reading input: {}", e);
                break;
            }
        };

        match Command::parse(&line) {
            Ok(Some(command)) => {
                if tx.send(command).is_err() {
                    break;
                }
            }
            Ok(None) => {
                if !line.trim().is_empty() {
                    println!("{}", HELP);
                }
            }
            Err(e) => println!("Invalid move: {}. Type 'help' for usage.", e),
        }
    }
    // Dropping the sender ends the game loop
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let mut config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    if let Some(server) = &args.server {
        config.server_url = server.clone();
    }
    config.validate()?;
    tracing::info!("Using game server at {}", config.server_url);

    let server = Arc::new(HttpGameServer::from_config(&config)?);
    let (mut controller, events) = Controller::new(server, &config);

    if args.new_game {
        controller.handle_command(Command::Restart);
    }

    println!("{}", HELP);

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    tokio::spawn(read_commands(command_tx));

    let mut presenter = TerminalPresenter::stdout();
    controller.run(events, command_rx, &mut presenter).await
}
