//! HTTP/WebSocket API for the lobby server.
//!
//! # Modules
//!
//! - [`websocket`]: Socket lifecycle and frame routing into lobby sessions
//! - [`rate_limiter`]: Per-connection sliding-window limits
//!
//! # Endpoints Overview
//!
//! - `GET /ws` - Establish a lobby WebSocket connection
//! - `GET /health` - Server health status
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use card_lobby::room::RoomRegistry;
//! use cl_server::api::{AppState, create_router};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState {
//!     registry: Arc::new(RoomRegistry::default()),
//!     limits: Default::default(),
//! };
//!
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively for development. In production, configure
//! appropriate origins, methods, and headers.

pub mod rate_limiter;
pub mod websocket;

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
};
use card_lobby::room::RoomRegistry;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::RateLimitConfig;

/// Application state shared across all HTTP handlers and WebSocket connections.
#[derive(Clone)]
pub struct AppState {
    /// Registry of live rooms
    pub registry: Arc<RoomRegistry>,
    /// Limits applied to each connection's inbound frames
    pub limits: RateLimitConfig,
}

/// Create the API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(websocket::websocket_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8080/health
/// # {"status":"healthy","version":"0.1.0","rooms":2,"timestamp":"2026-10-16T10:30:00+00:00"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "rooms": state.registry.room_count().await,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
