//! Route handlers. Each one is a thin translation layer: parse/validate
//! the HTTP-level arguments, call into [`crate::service::LeaderboardService`],
//! and shape the result as JSON.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::types::{
    ApiError, ApiState, HealthResponse, LeaderboardEntryDto, LeaderboardRangeQuery,
    NeighborsQuery,
};
use crate::error::LeaderboardError;

pub async fn update_score(
    State(state): State<ApiState>,
    Path((customer_id, delta)): Path<(i64, String)>,
) -> Result<Json<Decimal>, ApiError> {
    let delta = Decimal::from_str(&delta).map_err(|_| {
        ApiError::from(LeaderboardError::invalid_argument(format!(
            "score delta {delta:?} is not a number"
        )))
    })?;
    let entry = state.service.update_score(customer_id, delta)?;
    Ok(Json(entry.score))
}

pub async fn get_leaderboard(
    State(state): State<ApiState>,
    Query(range): Query<LeaderboardRangeQuery>,
) -> Result<Json<Vec<LeaderboardEntryDto>>, ApiError> {
    let entries = state.service.get_leaderboard(range.start, range.end)?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

pub async fn get_customer_with_neighbors(
    State(state): State<ApiState>,
    Path(customer_id): Path<i64>,
    Query(neighbors): Query<NeighborsQuery>,
) -> Result<Json<Vec<LeaderboardEntryDto>>, ApiError> {
    let entries = state
        .service
        .get_customer_with_neighbors(customer_id, neighbors.high, neighbors.low)?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

pub async fn clear_leaderboard(State(state): State<ApiState>) -> Result<StatusCode, ApiError> {
    if !state.config.environment.allows_clear() {
        return Err(ApiError::not_found_route());
    }
    state.service.clear();
    Ok(StatusCode::OK)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
