//! Crate-wide error type for the leaderboard core.
//!
//! Mirrors the three failure kinds from the service contract: bad
//! input, missing participant, and an internal-invariant catch-all
//! that should be unreachable in correct use.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LeaderboardError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, LeaderboardError>;

impl LeaderboardError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
