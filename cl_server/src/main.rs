//! Card lobby server.
//!
//! Serves the lobby WebSocket at `/ws` and a health check at `/health`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use card_lobby::room::RoomRegistry;
use cl_server::{
    api::{self, AppState},
    config::ServerConfig,
    logging, metrics,
};
use pico_args::Arguments;
use tracing::{error, info, warn};

const HELP: &str = "\
Run a realtime card lobby server

USAGE:
  cl_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:8080]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  METRICS_BIND             Prometheus exporter address (disabled when unset)
  WS_BURST_LIMIT           Messages per second per connection [default: 10]
  WS_SUSTAINED_LIMIT       Messages per minute per connection [default: 100]
  ROOM_MAX_PLAYERS         Players per room [default: 4]
  ROOM_MIN_PLAYERS         Players needed to start [default: 2]
  PLAYER_NAME_MAX_LEN      Display name length cap [default: 20]
  RUST_LOG                 Log filter [default: info,tower_http=warn]
";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let bind_override: Option<SocketAddr> = pargs
        .opt_value_from_str("--bind")
        .context("Invalid --bind address")?;

    logging::init();

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        warn!("Ignoring unrecognized arguments: {:?}", remaining);
    }

    let config = ServerConfig::from_env(bind_override)?;
    config.validate()?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(anyhow::Error::msg)?;
        info!("Prometheus metrics exported at http://{}/metrics", addr);
    }

    let room_config = config.room_config();
    info!(
        "Rooms seat {}-{} players, {} cards each",
        room_config.min_players, room_config.max_players, room_config.hand_size
    );

    let state = AppState {
        registry: Arc::new(RoomRegistry::new(room_config)),
        limits: config.rate_limits.clone(),
    };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
}
