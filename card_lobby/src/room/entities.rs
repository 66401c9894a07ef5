//! Room state machine.
//!
//! A `Room` is plain data plus the transitions that mutate it. It performs
//! no I/O: the owning actor delivers events after each transition.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    config::{ROOM_CODE_LEN, RoomConfig},
    errors::{RoomError, RoomResult},
};
use crate::{
    game::{Game, PlayerId},
    net::connection::{Connection, ConnectionId},
};

const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Six uppercase alphanumeric characters identifying a room.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..ROOM_CODE_LEN)
            .map(|_| char::from(ROOM_CODE_ALPHABET[rng.random_range(0..ROOM_CODE_ALPHABET.len())]))
            .collect();
        Self(code)
    }

    /// Normalize a client-supplied code (surrounding whitespace removed,
    /// uppercased). No validation: unknown codes simply miss the registry.
    pub fn normalize(input: &str) -> Self {
        Self(input.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Room status as reported to clients
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomPhase {
    Lobby,
    Playing,
}

impl fmt::Display for RoomPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomPhase::Lobby => write!(f, "lobby"),
            RoomPhase::Playing => write!(f, "playing"),
        }
    }
}

/// A room either waits in the lobby or carries the dealt game.
#[derive(Clone, Debug, Default)]
pub enum RoomStatus {
    #[default]
    Lobby,
    Playing(Game),
}

impl RoomStatus {
    pub fn phase(&self) -> RoomPhase {
        match self {
            RoomStatus::Lobby => RoomPhase::Lobby,
            RoomStatus::Playing(_) => RoomPhase::Playing,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub connection: Connection,
}

impl Player {
    pub fn new(id: PlayerId, name: String, connection: Connection) -> Self {
        Self {
            id,
            name,
            connection,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Room {
    code: RoomCode,
    status: RoomStatus,
    host_id: PlayerId,
    players: Vec<Player>,
    config: RoomConfig,
}

impl Room {
    /// New lobby with the creator as its only player and host.
    pub fn new(code: RoomCode, creator: Player, config: RoomConfig) -> Self {
        Self {
            code,
            status: RoomStatus::Lobby,
            host_id: creator.id.clone(),
            players: vec![creator],
            config,
        }
    }

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn status(&self) -> &RoomStatus {
        &self.status
    }

    pub fn host_id(&self) -> &PlayerId {
        &self.host_id
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn game(&self) -> Option<&Game> {
        match &self.status {
            RoomStatus::Playing(game) => Some(game),
            RoomStatus::Lobby => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Roster index of the player bound to `connection`.
    pub fn position_of(&self, connection: ConnectionId) -> Option<usize> {
        self.players
            .iter()
            .position(|p| p.connection.id() == connection)
    }

    /// Add a player to the lobby.
    ///
    /// A connection that already has a player here gets that player's id
    /// back instead of a second seat.
    pub fn join(&mut self, name: String, connection: Connection) -> RoomResult<PlayerId> {
        if matches!(self.status, RoomStatus::Playing(_)) {
            return Err(RoomError::GameAlreadyStarted);
        }

        if self.players.len() >= self.config.max_players {
            return Err(RoomError::RoomFull);
        }

        if let Some(index) = self.position_of(connection.id()) {
            return Ok(self.players[index].id.clone());
        }

        let player_id = PlayerId::generate();
        self.players
            .push(Player::new(player_id.clone(), name, connection));
        Ok(player_id)
    }

    /// Remove the player bound to `connection`.
    ///
    /// When the host leaves, the earliest remaining joiner becomes host.
    /// Hands of a running game are left untouched.
    pub fn remove_connection(&mut self, connection: ConnectionId) -> Option<Player> {
        let index = self.position_of(connection)?;
        let leaving = self.players.remove(index);

        if leaving.id == self.host_id
            && let Some(next) = self.players.first()
        {
            self.host_id = next.id.clone();
        }

        Some(leaving)
    }

    /// Deal a game and move the room to `Playing`, returning the opening
    /// player.
    ///
    /// Preconditions are checked in order: membership, host, player count,
    /// then status. Nothing is mutated on failure.
    pub fn start_game<R: Rng + ?Sized>(
        &mut self,
        connection: ConnectionId,
        rng: &mut R,
    ) -> RoomResult<PlayerId> {
        let index = self.position_of(connection).ok_or(RoomError::NotInRoom)?;

        if self.players[index].id != self.host_id {
            return Err(RoomError::NotHost);
        }

        if self.players.len() < self.config.min_players {
            return Err(RoomError::NotEnoughPlayers(self.config.min_players));
        }

        if matches!(self.status, RoomStatus::Playing(_)) {
            return Err(RoomError::AlreadyStarted);
        }

        let roster: Vec<PlayerId> = self.players.iter().map(|p| p.id.clone()).collect();
        let game = Game::deal(&roster, self.config.hand_size, rng)
            .ok_or(RoomError::NotEnoughPlayers(self.config.min_players))?;
        let turn_player_id = game.turn_player_id.clone();
        self.status = RoomStatus::Playing(game);

        Ok(turn_player_id)
    }
}
