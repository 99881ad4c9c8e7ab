// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gomoku Network - HTTP transport for the Gomoku client
//!
//! This crate provides:
//! - The [`GameServer`] trait the controller talks to
//! - A reqwest-backed implementation for the game server's JSON endpoints
//! - The client configuration file
//! - The transport error taxonomy

#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;

pub use client::{GameServer, HttpGameServer};
pub use config::ClientConfig;
pub use error::NetError;
pub use reqwest::StatusCode;
