// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport errors

use thiserror::Error;

/// Failure of a request to the game server
#[derive(Debug, Error)]
pub enum NetError {
    /// Connection refused, timeout, broken body...
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("Server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body was JSON but not the shape we expect
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A decodable response missing a required field
    #[error("Protocol violation: {0}")]
    Protocol(String),
}

impl NetError {
    /// Whether the server answered, but with a payload we cannot use
    pub fn is_protocol(&self) -> bool {
        matches!(self, NetError::Decode(_) | NetError::Protocol(_))
    }
}
