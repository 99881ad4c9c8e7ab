// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gomoku CLI - terminal client for playing against the server's AI
//!
//! The view model lives in [`view`]; [`reconciler`], [`poller`] and
//! [`status`] write into it, and [`controller`] runs the event loop that
//! drives them and hands the result to a [`render::Presenter`].

#![deny(unsafe_code)]

pub mod controller;
pub mod msg;
pub mod poller;
pub mod reconciler;
pub mod render;
pub mod status;
pub mod view;

pub use controller::Controller;
pub use msg::{Command, NetEvent};
pub use render::{Presenter, TerminalPresenter};
pub use view::GameView;
