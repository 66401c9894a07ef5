//! Room actor implementation with async message handling.

use rand::{SeedableRng, rngs::StdRng};
use tokio::sync::{mpsc, oneshot};

use super::{
    entities::{Room, RoomCode},
    errors::{RoomError, RoomResult},
    messages::{LeaveOutcome, RoomMessage},
};
use crate::{
    game::PlayerId,
    net::{
        connection::{Connection, ConnectionId},
        messages::{GameStarted, GameStateView, HandView, RoomStateView, Seated, ServerMessage},
    },
};

/// Room actor handle for sending messages
#[derive(Clone, Debug)]
pub struct RoomHandle {
    sender: mpsc::Sender<RoomMessage>,
    code: RoomCode,
}

impl RoomHandle {
    pub fn new(sender: mpsc::Sender<RoomMessage>, code: RoomCode) -> Self {
        Self { sender, code }
    }

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    /// Whether the actor has stopped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Send a message to the room. A room whose actor has stopped is
    /// indistinguishable from one that never existed.
    pub async fn send(&self, message: RoomMessage) -> RoomResult<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| RoomError::RoomNotFound)
    }

    /// Send a message and wait for the actor's reply.
    pub async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> RoomMessage,
    ) -> RoomResult<T> {
        let (tx, rx) = oneshot::channel();
        self.send(message(tx)).await?;
        rx.await.map_err(|_| RoomError::RoomNotFound)
    }

    pub async fn join(&self, name: String, connection: Connection) -> RoomResult<PlayerId> {
        self.request(|response| RoomMessage::Join {
            name,
            connection,
            response,
        })
        .await?
    }

    pub async fn leave(&self, connection: ConnectionId) -> RoomResult<LeaveOutcome> {
        self.request(|response| RoomMessage::Leave {
            connection,
            response,
        })
        .await
    }

    pub async fn start_game(&self, connection: ConnectionId) -> RoomResult<PlayerId> {
        self.request(|response| RoomMessage::StartGame {
            connection,
            response,
        })
        .await?
    }

    pub async fn locate(&self, connection: ConnectionId) -> RoomResult<Option<usize>> {
        self.request(|response| RoomMessage::Locate {
            connection,
            response,
        })
        .await
    }

    pub async fn snapshot(&self) -> RoomResult<Room> {
        self.request(|response| RoomMessage::Snapshot { response })
            .await
    }
}

/// Room actor owning a single room.
///
/// Every transition runs to completion, including its event delivery,
/// before the next message is taken from the inbox, so no client can see
/// a half-applied change.
pub struct RoomActor {
    room: Room,
    inbox: mpsc::Receiver<RoomMessage>,
    rng: StdRng,

    /// Set once the last player leaves
    is_closed: bool,
}

impl RoomActor {
    /// Create an actor for a freshly created room.
    ///
    /// # Returns
    ///
    /// * `(RoomActor, RoomHandle)` - Actor and handle for sending messages
    pub fn new(room: Room) -> (Self, RoomHandle) {
        Self::with_rng(room, StdRng::from_os_rng())
    }

    /// Create an actor with a caller-supplied random source for the deal.
    pub fn with_rng(room: Room, rng: StdRng) -> (Self, RoomHandle) {
        let (sender, inbox) = mpsc::channel(room.config().inbox_capacity);
        let handle = RoomHandle::new(sender, room.code().clone());

        let actor = Self {
            room,
            inbox,
            rng,
            is_closed: false,
        };

        (actor, handle)
    }

    /// Run the room actor event loop
    pub async fn run(mut self) {
        log::info!("Room {} opened", self.room.code());
        self.announce_created();

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);

            if self.is_closed {
                break;
            }
        }

        log::info!("Room {} closed", self.room.code());
    }

    fn handle_message(&mut self, message: RoomMessage) {
        match message {
            RoomMessage::Join {
                name,
                connection,
                response,
            } => {
                let result = self.handle_join(name, connection);
                let _ = response.send(result);
            }

            RoomMessage::Leave {
                connection,
                response,
            } => {
                let outcome = self.handle_leave(connection);
                let _ = response.send(outcome);
            }

            RoomMessage::StartGame {
                connection,
                response,
            } => {
                let result = self.handle_start_game(connection);
                let _ = response.send(result);
            }

            RoomMessage::Locate {
                connection,
                response,
            } => {
                let _ = response.send(self.room.position_of(connection));
            }

            RoomMessage::Snapshot { response } => {
                let _ = response.send(self.room.clone());
            }
        }
    }

    fn handle_join(&mut self, name: String, connection: Connection) -> RoomResult<PlayerId> {
        let player_id = self.room.join(name, connection.clone())?;

        log::debug!("Room {}: player {} joined", self.room.code(), player_id);
        connection.send(ServerMessage::JoinedRoom(Seated {
            room_code: self.room.code().clone(),
            player_id: player_id.clone(),
        }));
        self.broadcast_room_state();

        Ok(player_id)
    }

    fn handle_leave(&mut self, connection: ConnectionId) -> LeaveOutcome {
        let Some(player) = self.room.remove_connection(connection) else {
            return LeaveOutcome::NotPresent;
        };

        log::debug!("Room {}: player {} left", self.room.code(), player.id);

        if self.room.is_empty() {
            self.is_closed = true;
            return LeaveOutcome::Emptied;
        }

        self.broadcast_room_state();
        LeaveOutcome::Left {
            remaining: self.room.players().len(),
        }
    }

    fn handle_start_game(&mut self, connection: ConnectionId) -> RoomResult<PlayerId> {
        let turn_player_id = self.room.start_game(connection, &mut self.rng)?;

        log::info!(
            "Room {}: game started with {} players, {} opens",
            self.room.code(),
            self.room.players().len(),
            turn_player_id
        );
        self.announce_game();

        Ok(turn_player_id)
    }

    /// Creator learns its seat before anyone sees the roster.
    fn announce_created(&self) {
        if let Some(creator) = self.room.players().first() {
            creator.connection.send(ServerMessage::CreatedRoom(Seated {
                room_code: self.room.code().clone(),
                player_id: creator.id.clone(),
            }));
        }
        self.broadcast_room_state();
    }

    /// Private hands first, then the shared views.
    fn announce_game(&self) {
        let Some(game) = self.room.game() else {
            return;
        };

        for player in self.room.players() {
            player.connection.send(ServerMessage::YourHand(HandView {
                room_code: self.room.code().clone(),
                hand: game.hand(&player.id).map(<[_]>::to_vec).unwrap_or_default(),
            }));
        }

        self.broadcast(&ServerMessage::GameState(GameStateView::new(&self.room, game)));
        self.broadcast_room_state();
        self.broadcast(&ServerMessage::GameStarted(GameStarted {
            room_code: self.room.code().clone(),
        }));
    }

    fn broadcast_room_state(&self) {
        self.broadcast(&ServerMessage::RoomState(RoomStateView::from(&self.room)));
    }

    /// Best-effort delivery to every seated connection.
    fn broadcast(&self, message: &ServerMessage) {
        for player in self.room.players() {
            player.connection.send(message.clone());
        }
    }
}
