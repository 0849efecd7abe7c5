//! Black-box HTTP surface tests, driving the router directly via
//! `tower::ServiceExt::oneshot` rather than binding a real socket.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use leaderboard::api::rest::RestApiServer;
use leaderboard::service::LeaderboardService;
use leaderboard::Config;
use serde_json::Value;
use tower::ServiceExt;

fn router() -> axum::Router {
    RestApiServer::new(Config::default(), LeaderboardService::new()).build_router()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn update_score_then_appears_on_leaderboard() {
    let app = router();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/customer/1/score/100")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let new_score = body_json(response).await;
    assert_eq!(new_score, "100");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/leaderboard?start=1&end=10")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let board = body_json(response).await;
    assert_eq!(board.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn negative_delta_driving_score_non_positive_drops_off_board() {
    let app = router();

    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/customer/2/score/50")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/customer/2/score/-50")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let new_score = body_json(response).await;
    assert_eq!(new_score, "0");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/leaderboard/2?high=0&low=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn out_of_range_delta_is_rejected() {
    let app = router();
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/customer/3/score/5000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn neighbors_around_a_tied_customer() {
    let app = router();
    for (id, score) in [(1, 100), (2, 200), (3, 100)] {
        app.clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(format!("/customer/{id}/score/{score}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/leaderboard/1?high=1&low=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let neighbors = body_json(response).await;
    let ids: Vec<i64> = neighbors
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["customerId"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 1, 3]);
}

#[tokio::test]
async fn clear_is_available_in_default_dev_config() {
    let app = router();
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/customer/1/score/10")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri("/leaderboard/clear")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/leaderboard?start=1&end=10")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let board = body_json(response).await;
    assert!(board.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn health_check_reports_healthy() {
    let app = router();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}
