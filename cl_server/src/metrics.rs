//! Prometheus metrics for monitoring lobby health.
//!
//! Recording is always safe: until [`init_metrics`] installs an exporter
//! every call below is a no-op.
//!
//! # Metrics Categories
//!
//! - **WebSocket Metrics**: connections opened, currently open, frames received
//! - **Rate Limiting**: frames refused per window
//! - **Room Metrics**: rooms created, live rooms, games started

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize the Prometheus exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// WebSocket Metrics
// ============================================================================

/// A WebSocket connection was accepted.
pub fn websocket_connection_opened() {
    metrics::counter!("websocket_connections_total").increment(1);
    metrics::gauge!("websocket_connections_active").increment(1.0);
}

/// A WebSocket connection ended.
pub fn websocket_connection_closed() {
    metrics::gauge!("websocket_connections_active").decrement(1.0);
}

pub fn websocket_messages_received() {
    metrics::counter!("websocket_messages_received").increment(1);
}

// ============================================================================
// Rate Limiting
// ============================================================================

/// Record a refused frame, labelled by the window that refused it.
pub fn rate_limit_hit(window: &'static str) {
    metrics::counter!("websocket_rate_limit_hits_total", "window" => window).increment(1);
}

// ============================================================================
// Room Metrics
// ============================================================================

pub fn rooms_created() {
    metrics::counter!("rooms_created_total").increment(1);
}

/// Set the number of live rooms.
pub fn active_rooms(count: usize) {
    metrics::gauge!("active_rooms").set(count as f64);
}

pub fn games_started() {
    metrics::counter!("games_started_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_exporter() {
        websocket_connection_opened();
        websocket_messages_received();
        rate_limit_hit("burst");
        rooms_created();
        games_started();
        active_rooms(3);
        websocket_connection_closed();
    }
}
