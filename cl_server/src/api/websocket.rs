//! WebSocket handler bridging sockets to lobby sessions.
//!
//! # Connection Flow
//!
//! 1. Client connects via `GET /ws`
//! 2. Server opens a [`Session`] and sends `hello`
//! 3. A send task drains the session's outbound queue into the socket while
//!    the receive loop feeds text frames to the session
//! 4. On disconnect the session leaves its room and the send task is stopped
//!
//! # Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8080/ws');
//!
//! ws.onmessage = (event) => {
//!   const { type, data } = JSON.parse(event.data);
//!   if (type === 'your_hand') showHand(data.hand);
//! };
//!
//! ws.send(JSON.stringify({ type: 'create_room', data: { name: 'Alice' } }));
//! ```

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use card_lobby::net::{Outcome, ServerMessage, Session};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::{AppState, rate_limiter::MessageLimiter};
use crate::metrics;

/// Events queued for one client before further deliveries are dropped.
const OUTBOUND_CAPACITY: usize = 64;

/// Upgrade an HTTP request to a lobby WebSocket.
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::channel::<ServerMessage>(OUTBOUND_CAPACITY);

    let session = Session::open(state.registry.clone(), outbound_tx);
    let connection_id = session.connection_id();
    metrics::websocket_connection_opened();
    info!(%connection_id, "WebSocket connected");

    let send_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize {}: {}", message.kind(), e);
                    continue;
                }
            };

            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let mut limiter = MessageLimiter::new(&state.limits);

    while let Some(frame) = receiver.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text.as_str().to_owned(),
            Ok(Message::Binary(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                warn!(%connection_id, "WebSocket error: {}", e);
                break;
            }
        };

        metrics::websocket_messages_received();

        if let Err(throttle) = limiter.check() {
            warn!(%connection_id, window = throttle.window(), "Rate limit exceeded, dropping frame");
            metrics::rate_limit_hit(throttle.window());
            session.reply_error(throttle.to_string());
            continue;
        }

        match session.handle_text(&text).await {
            Outcome::Created(code) => {
                metrics::rooms_created();
                info!(%connection_id, room = %code, "Room created");
            }
            Outcome::Joined(code) => {
                debug!(%connection_id, room = %code, "Joined room");
            }
            Outcome::Started(code) => {
                metrics::games_started();
                info!(%connection_id, room = %code, "Game started");
            }
            Outcome::Rejected(reason) => {
                debug!(%connection_id, "Request rejected: {}", reason);
            }
        }
        metrics::active_rooms(state.registry.room_count().await);
    }

    if let Some((code, outcome)) = session.close().await {
        debug!(%connection_id, room = %code, ?outcome, "Left room on disconnect");
    }
    metrics::active_rooms(state.registry.room_count().await);
    metrics::websocket_connection_closed();

    send_task.abort();
    info!(%connection_id, "WebSocket disconnected");
}
