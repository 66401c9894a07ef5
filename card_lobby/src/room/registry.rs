//! Process-wide room registry.

use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{
    actor::{RoomActor, RoomHandle},
    config::RoomConfig,
    entities::{Player, Room, RoomCode},
    errors::{RoomError, RoomResult},
    messages::LeaveOutcome,
};
use crate::{
    game::PlayerId,
    net::connection::{Connection, ConnectionId},
};

/// Registry of live rooms, keyed by code.
///
/// Each room is owned by its own actor task; the registry only holds the
/// handles plus an index from connection to the room it is seated in. A
/// connection is seated in at most one room at a time.
pub struct RoomRegistry {
    /// Shared configuration for every room
    config: RoomConfig,

    /// Active room handles
    rooms: RwLock<HashMap<RoomCode, RoomHandle>>,

    /// Room each connection is currently seated in
    connections: RwLock<HashMap<ConnectionId, RoomCode>>,
}

impl RoomRegistry {
    pub fn new(config: RoomConfig) -> Self {
        Self {
            config,
            rooms: RwLock::new(HashMap::new()),
            connections: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    /// Create a room with the caller as its only player and host.
    ///
    /// The creator receives `created_room` followed by `room_state`. A
    /// connection already seated elsewhere leaves that room afterwards.
    pub async fn create(&self, name: Option<&str>, connection: Connection) -> (RoomCode, PlayerId) {
        let connection_id = connection.id();
        let player_id = PlayerId::generate();
        let player = Player::new(player_id.clone(), self.config.player_name(name), connection);

        let mut rooms = self.rooms.write().await;
        let code = unused_code(&rooms);
        let room = Room::new(code.clone(), player, self.config.clone());
        let (actor, handle) = RoomActor::new(room);
        rooms.insert(code.clone(), handle);
        drop(rooms);

        tokio::spawn(actor.run());
        log::info!("Room {} created by {}", code, player_id);

        self.seat(connection_id, code.clone()).await;
        (code, player_id)
    }

    /// Join the room with the given code.
    ///
    /// The code is trimmed and uppercased first. Failures are checked in
    /// order: unknown room, game already started, room full.
    pub async fn join(
        &self,
        room_code: &str,
        name: Option<&str>,
        connection: Connection,
    ) -> RoomResult<(RoomCode, PlayerId)> {
        let code = RoomCode::normalize(room_code);
        let handle = self.get_room(&code).await.ok_or(RoomError::RoomNotFound)?;

        let connection_id = connection.id();
        let player_id = handle
            .join(self.config.player_name(name), connection)
            .await?;

        self.seat(connection_id, code.clone()).await;
        Ok((code, player_id))
    }

    /// Remove the connection from whichever room it is seated in.
    ///
    /// A connection that is not seated anywhere is a no-op. Removing the
    /// last player deletes the room.
    pub async fn leave(&self, connection: ConnectionId) -> Option<(RoomCode, LeaveOutcome)> {
        let code = self.connections.write().await.remove(&connection)?;
        let outcome = self.leave_room(&code, connection).await;
        Some((code, outcome))
    }

    /// Room and roster index of the player bound to this connection.
    pub async fn find_by_connection(&self, connection: ConnectionId) -> Option<(RoomCode, usize)> {
        let code = self.connections.read().await.get(&connection).cloned()?;
        let handle = self.get_room(&code).await?;
        let index = handle.locate(connection).await.ok()??;
        Some((code, index))
    }

    /// Deal the game in the given room. Returns the opening player.
    pub async fn start_game(
        &self,
        room_code: &str,
        connection: ConnectionId,
    ) -> RoomResult<PlayerId> {
        let code = RoomCode::normalize(room_code);
        let handle = self.get_room(&code).await.ok_or(RoomError::RoomNotFound)?;
        handle.start_game(connection).await
    }

    /// Copy of a room's current state.
    pub async fn snapshot(&self, room_code: &str) -> Option<Room> {
        let handle = self.get_room(&RoomCode::normalize(room_code)).await?;
        handle.snapshot().await.ok()
    }

    pub async fn get_room(&self, code: &RoomCode) -> Option<RoomHandle> {
        self.rooms.read().await.get(code).cloned()
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Record the connection's new room and leave the previous one, if any.
    async fn seat(&self, connection: ConnectionId, code: RoomCode) {
        let previous = self
            .connections
            .write()
            .await
            .insert(connection, code.clone());

        if let Some(previous) = previous
            && previous != code
        {
            log::debug!("Connection {} moved from room {} to {}", connection, previous, code);
            self.leave_room(&previous, connection).await;
        }
    }

    async fn leave_room(&self, code: &RoomCode, connection: ConnectionId) -> LeaveOutcome {
        let Some(handle) = self.get_room(code).await else {
            return LeaveOutcome::NotPresent;
        };

        let outcome = handle
            .leave(connection)
            .await
            .unwrap_or(LeaveOutcome::NotPresent);

        if outcome == LeaveOutcome::Emptied {
            self.rooms.write().await.remove(code);
            log::info!("Room {} removed", code);
        }

        outcome
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(RoomConfig::default())
    }
}

/// Draw codes until one is free. Called with the write lock held so two
/// concurrent creations can never pick the same code.
fn unused_code(rooms: &HashMap<RoomCode, RoomHandle>) -> RoomCode {
    let mut rng = rand::rng();
    loop {
        let code = RoomCode::generate(&mut rng);
        if !rooms.contains_key(&code) {
            return code;
        }
    }
}
