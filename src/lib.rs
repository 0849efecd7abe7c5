//! Concurrent in-memory leaderboard: a rank-indexed skip list backing a
//! service that tracks customer scores and answers rank queries in
//! O(log n).

pub mod api;
pub mod concurrent;
pub mod config;
pub mod error;
pub mod service;

pub use config::Config;
pub use error::{LeaderboardError, Result};
pub use service::{LeaderboardEntry, LeaderboardService};
