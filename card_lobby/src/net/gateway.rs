//! Per-connection session: decodes inbound frames and routes them to rooms.

use std::sync::Arc;
use tokio::sync::mpsc;

use super::{
    connection::{Connection, ConnectionId},
    messages::{ClientAction, ServerMessage},
};
use crate::room::{LeaveOutcome, RoomCode, RoomRegistry};

/// What a handled frame did, for the transport's bookkeeping.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Created(RoomCode),
    Joined(RoomCode),
    Started(RoomCode),
    /// The sender was sent an `error` event with this message
    Rejected(String),
}

/// One client connection's view of the lobby.
///
/// The session owns the strong end of the outbound queue; rooms only ever
/// see a weak [`Connection`]. Dropping or closing the session therefore
/// cuts off every room's deliveries to this client.
pub struct Session {
    registry: Arc<RoomRegistry>,
    connection: Connection,
    outbound: mpsc::Sender<ServerMessage>,
}

impl Session {
    /// Open a session and greet the client with `hello`.
    pub fn open(registry: Arc<RoomRegistry>, outbound: mpsc::Sender<ServerMessage>) -> Self {
        let connection = Connection::new(&outbound);
        log::debug!("Connection {} opened", connection.id());
        connection.send(ServerMessage::hello());

        Self {
            registry,
            connection,
            outbound,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection.id()
    }

    /// Decode and dispatch one text frame. Every failure is reported to
    /// this client only and never ends the session.
    pub async fn handle_text(&self, text: &str) -> Outcome {
        let action = match ClientAction::decode(text) {
            Ok(action) => action,
            Err(error) => return self.reject(error.to_string()),
        };

        log::debug!("Connection {}: {}", self.connection.id(), action);

        match action {
            ClientAction::CreateRoom(data) => {
                let (code, _) = self
                    .registry
                    .create(data.name.as_deref(), self.connection.clone())
                    .await;
                Outcome::Created(code)
            }

            ClientAction::JoinRoom(data) => {
                let room_code = data.room_code.unwrap_or_default();
                match self
                    .registry
                    .join(&room_code, data.name.as_deref(), self.connection.clone())
                    .await
                {
                    Ok((code, _)) => Outcome::Joined(code),
                    Err(error) => self.reject(error.to_string()),
                }
            }

            ClientAction::StartGame(data) => {
                let room_code = data.room_code.unwrap_or_default();
                match self
                    .registry
                    .start_game(&room_code, self.connection.id())
                    .await
                {
                    Ok(_) => Outcome::Started(RoomCode::normalize(&room_code)),
                    Err(error) => self.reject(error.to_string()),
                }
            }
        }
    }

    /// Send an `error` event to this client.
    pub fn reply_error(&self, message: impl Into<String>) {
        if self
            .outbound
            .try_send(ServerMessage::error(message))
            .is_err()
        {
            log::warn!("Connection {}: dropped error reply", self.connection.id());
        }
    }

    /// Treat the end of the connection as leaving its room.
    pub async fn close(self) -> Option<(RoomCode, LeaveOutcome)> {
        log::debug!("Connection {} closed", self.connection.id());
        self.registry.leave(self.connection.id()).await
    }

    fn reject(&self, message: String) -> Outcome {
        log::debug!("Connection {}: rejected: {}", self.connection.id(), message);
        self.reply_error(message.clone());
        Outcome::Rejected(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> (Session, mpsc::Receiver<ServerMessage>) {
        let (tx, rx) = mpsc::channel(32);
        (Session::open(Arc::new(RoomRegistry::default()), tx), rx)
    }

    #[tokio::test]
    async fn test_open_sends_hello() {
        let (_session, mut rx) = session();
        assert_eq!(rx.try_recv().unwrap(), ServerMessage::hello());
    }

    #[tokio::test]
    async fn test_bad_frames_reply_to_sender() {
        let (session, mut rx) = session();
        rx.try_recv().unwrap();

        let cases = [
            ("{oops", "Invalid JSON"),
            (r#"{"data":{}}"#, "Missing type"),
            (r#"{"type":"deal"}"#, "Unknown event: deal"),
        ];
        for (frame, expected) in cases {
            assert_eq!(
                session.handle_text(frame).await,
                Outcome::Rejected(expected.to_string())
            );
            assert_eq!(rx.try_recv().unwrap(), ServerMessage::error(expected));
        }
    }

    #[tokio::test]
    async fn test_create_then_close_removes_room() {
        let registry = Arc::new(RoomRegistry::default());
        let (tx, mut rx) = mpsc::channel(32);
        let session = Session::open(registry.clone(), tx);

        let outcome = session
            .handle_text(r#"{"type":"create_room","data":{"name":"Alice"}}"#)
            .await;
        let Outcome::Created(code) = outcome else {
            panic!("unexpected outcome {outcome:?}");
        };
        registry.snapshot(code.as_str()).await.unwrap();

        rx.try_recv().unwrap(); // hello
        assert_eq!(rx.try_recv().unwrap().kind(), "created_room");
        assert_eq!(rx.try_recv().unwrap().kind(), "room_state");

        assert_eq!(
            session.close().await,
            Some((code, LeaveOutcome::Emptied))
        );
        assert_eq!(registry.room_count().await, 0);
    }

    #[tokio::test]
    async fn test_join_missing_code_is_not_found() {
        let (session, mut rx) = session();
        rx.try_recv().unwrap();

        assert_eq!(
            session.handle_text(r#"{"type":"join_room","data":{}}"#).await,
            Outcome::Rejected("Room not found".to_string())
        );
    }
}
