//! Request/response DTOs and the shared state handlers run against.
//!
//! Grounded on the teacher's `ApiError`/`ApiState` (`src/api/rest/types.rs`):
//! a typed error with an `IntoResponse` impl that maps domain error kinds
//! to status codes, and a small `Arc`-wrapped state struct threaded
//! through every handler via axum's `State` extractor.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Config;
use crate::error::LeaderboardError;
use crate::service::{LeaderboardEntry, LeaderboardService};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<LeaderboardService>,
    pub config: Arc<Config>,
}

/// Wire representation of a ranked entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryDto {
    pub customer_id: i64,
    pub score: Decimal,
    pub rank: i32,
}

impl From<LeaderboardEntry> for LeaderboardEntryDto {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            customer_id: entry.customer_id,
            score: entry.score,
            rank: entry.rank as i32,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardRangeQuery {
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Deserialize)]
pub struct NeighborsQuery {
    #[serde(default)]
    pub high: i64,
    #[serde(default)]
    pub low: i64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// HTTP-shaped failure. `code` follows the three kinds the core can
/// produce plus axum's own extractor failures surfaced as `bad-request`.
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn not_found_route() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "not-found",
            message: "resource not found".to_string(),
        }
    }
}

impl From<LeaderboardError> for ApiError {
    fn from(err: LeaderboardError) -> Self {
        match err {
            LeaderboardError::InvalidArgument(msg) => Self {
                status: StatusCode::BAD_REQUEST,
                code: "invalid-argument",
                message: msg,
            },
            LeaderboardError::NotFound(msg) => Self {
                status: StatusCode::NOT_FOUND,
                code: "not-found",
                message: msg,
            },
            LeaderboardError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error crossing the HTTP boundary");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: "internal",
                    message: "the leaderboard service is busy, try again".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "code": self.code,
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}
