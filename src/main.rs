//! Process entry point: initialize logging, load configuration, and
//! serve the leaderboard over HTTP.
//!
//! Grounded on the teacher's `main.rs`: the same `tracing_subscriber`
//! builder chain, a startup banner, and a config-then-serve sequence.

use leaderboard::api::rest::RestApiServer;
use leaderboard::{Config, LeaderboardService};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    println!("leaderboard service starting");

    let config = Config::from_env();
    tracing::info!(environment = ?config.environment, addr = %config.socket_addr(), "configuration loaded");

    let service = LeaderboardService::new();
    let server = RestApiServer::new(config, service);
    server.run().await
}
