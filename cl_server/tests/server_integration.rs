//! HTTP surface tests driven through `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use card_lobby::{net::Connection, room::RoomRegistry};
use cl_server::{
    api::{AppState, create_router},
    config::RateLimitConfig,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::ServiceExt;

fn app(registry: Arc<RoomRegistry>) -> axum::Router {
    create_router(AppState {
        registry,
        limits: RateLimitConfig::default(),
    })
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_health_check() {
    let registry = Arc::new(RoomRegistry::default());
    let (status, body) = get(app(registry), "/health").await;
    assert_eq!(status, StatusCode::OK);

    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(health["rooms"], 0);
    assert!(health["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_counts_rooms() {
    let registry = Arc::new(RoomRegistry::default());
    let (tx, _rx) = mpsc::channel(8);
    registry.create(Some("Alice"), Connection::new(&tx)).await;
    registry.create(Some("Bob"), Connection::new(&tx)).await;

    let (_, body) = get(app(registry), "/health").await;
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["rooms"], 2);
}

#[tokio::test]
async fn test_ws_requires_upgrade() {
    let (status, _) = get(app(Arc::new(RoomRegistry::default())), "/ws").await;
    assert!(
        status.is_client_error(),
        "plain GET /ws should be refused, got {status}"
    );
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, _) = get(app(Arc::new(RoomRegistry::default())), "/api/tables").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
