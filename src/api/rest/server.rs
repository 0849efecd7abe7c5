//! Router assembly and the listener loop.
//!
//! Grounded on the teacher's `RestApiServer` (`src/api/rest/server.rs`):
//! a struct holding config + shared state, a `build_router` that layers
//! middleware around the route table, and a `run` that binds a
//! `TcpListener` and hands it to `axum::serve`.

use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::types::ApiState;
use crate::config::Config;
use crate::service::LeaderboardService;

pub struct RestApiServer {
    config: Arc<Config>,
    state: ApiState,
}

impl RestApiServer {
    pub fn new(config: Config, service: LeaderboardService) -> Self {
        let config = Arc::new(config);
        let state = ApiState {
            service: Arc::new(service),
            config: Arc::clone(&config),
        };
        Self { config, state }
    }

    pub fn build_router(&self) -> Router {
        let mut router = Router::new()
            .route("/customer/{id}/score/{delta}", post(handlers::update_score))
            .route("/leaderboard", get(handlers::get_leaderboard))
            .route("/leaderboard/{id}", get(handlers::get_customer_with_neighbors))
            .route("/leaderboard/clear", delete(handlers::clear_leaderboard))
            .route("/health", get(handlers::health))
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.request_timeout_secs,
            )))
            .layer(RequestBodyLimitLayer::new(self.config.max_body_size))
            .with_state(self.state.clone());

        if self.config.enable_cors {
            router = router.layer(CorsLayer::permissive());
        }

        router
    }

    pub async fn run(&self) -> std::io::Result<()> {
        let addr = self.config.socket_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!(%addr, "leaderboard server listening");
        axum::serve(listener, self.build_router()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_builds_router() {
        let server = RestApiServer::new(Config::default(), LeaderboardService::new());
        let _router = server.build_router();
    }

    #[tokio::test]
    async fn health_route_responds() {
        use tower::ServiceExt;
        let server = RestApiServer::new(Config::default(), LeaderboardService::new());
        let router = server.build_router();

        let response = router
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }
}
