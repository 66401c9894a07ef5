//! Handle to a client connection's outbound queue.

use std::fmt;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::messages::ServerMessage;

/// Unique identifier of one client connection.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Connection handle held by rooms.
///
/// Only a weak sender is kept: the gateway owns the strong end and the
/// socket lifecycle. Once the gateway drops it every delivery through this
/// handle is silently discarded.
#[derive(Clone, Debug)]
pub struct Connection {
    id: ConnectionId,
    sender: mpsc::WeakSender<ServerMessage>,
}

impl Connection {
    pub fn new(sender: &mpsc::Sender<ServerMessage>) -> Self {
        Self {
            id: ConnectionId::generate(),
            sender: sender.downgrade(),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Best-effort delivery. Returns whether the message was queued.
    pub fn send(&self, message: ServerMessage) -> bool {
        let Some(sender) = self.sender.upgrade() else {
            log::debug!("Connection {} closed, dropping message", self.id);
            return false;
        };

        match sender.try_send(message) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                log::warn!("Connection {} outbound queue full, dropping message", self.id);
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                log::debug!("Connection {} closed, dropping message", self.id);
                false
            }
        }
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Connection {}
