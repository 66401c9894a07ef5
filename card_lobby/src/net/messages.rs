use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::fmt;

use super::errors::{ProtocolError, Result};
use crate::{
    game::{Card, Game, PlayerId},
    room::entities::{Room, RoomCode, RoomPhase},
};

/// Payload of `create_room`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomData {
    #[serde(default)]
    pub name: Option<String>,
}

/// Payload of `join_room`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomData {
    #[serde(default)]
    pub room_code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Payload of `start_game`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StartGameData {
    #[serde(default)]
    pub room_code: Option<String>,
}

/// An action requested by a client.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClientAction {
    CreateRoom(CreateRoomData),
    JoinRoom(JoinRoomData),
    StartGame(StartGameData),
}

impl ClientAction {
    /// Decode a `{ "type": ..., "data": ... }` text frame.
    ///
    /// A frame that is not JSON is `InvalidMessage`. A frame whose `type` is
    /// absent, null, false, zero or empty is `MissingActionKind`. Any other
    /// `type` that is not a known action is `UnknownAction`. A missing or
    /// null `data` decodes as an empty payload.
    pub fn decode(text: &str) -> Result<Self> {
        let frame: Value = serde_json::from_str(text).map_err(|_| ProtocolError::InvalidMessage)?;

        let kind = match frame.get("type") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => {
                return Err(ProtocolError::MissingActionKind);
            }
            Some(Value::String(kind)) if kind.is_empty() => {
                return Err(ProtocolError::MissingActionKind);
            }
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => {
                return Err(ProtocolError::MissingActionKind);
            }
            Some(Value::String(kind)) => kind.clone(),
            Some(other) => return Err(ProtocolError::UnknownAction(other.to_string())),
        };

        let data = frame.get("data").cloned().unwrap_or(Value::Null);

        match kind.as_str() {
            "create_room" => Ok(Self::CreateRoom(payload(data)?)),
            "join_room" => Ok(Self::JoinRoom(payload(data)?)),
            "start_game" => Ok(Self::StartGame(payload(data)?)),
            _ => Err(ProtocolError::UnknownAction(kind)),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateRoom(_) => "create_room",
            Self::JoinRoom(_) => "join_room",
            Self::StartGame(_) => "start_game",
        }
    }
}

impl fmt::Display for ClientAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

fn payload<T: DeserializeOwned + Default>(data: Value) -> Result<T> {
    serde_json::from_value::<Option<T>>(data)
        .map(Option::unwrap_or_default)
        .map_err(|_| ProtocolError::InvalidMessage)
}

/// `{ message }` payload of `hello` and `error`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Notice {
    pub message: String,
}

/// Payload of `created_room` and `joined_room`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Seated {
    pub room_code: RoomCode,
    pub player_id: PlayerId,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
}

/// Roster view broadcast as `room_state`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStateView {
    pub code: RoomCode,
    pub status: RoomPhase,
    pub host_id: PlayerId,
    pub players: Vec<PlayerSummary>,
}

impl From<&Room> for RoomStateView {
    fn from(room: &Room) -> Self {
        Self {
            code: room.code().clone(),
            status: room.status().phase(),
            host_id: room.host_id().clone(),
            players: room
                .players()
                .iter()
                .map(|p| PlayerSummary {
                    id: p.id.clone(),
                    name: p.name.clone(),
                })
                .collect(),
        }
    }
}

/// A player's own cards, sent only to that player.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandView {
    pub room_code: RoomCode,
    pub hand: Vec<Card>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCardCount {
    pub id: PlayerId,
    pub name: String,
    pub cards_count: usize,
}

/// Shared game summary. Card counts only, never other players' cards.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateView {
    pub room_code: RoomCode,
    pub turn_player_id: PlayerId,
    pub players: Vec<PlayerCardCount>,
}

impl GameStateView {
    pub fn new(room: &Room, game: &Game) -> Self {
        Self {
            room_code: room.code().clone(),
            turn_player_id: game.turn_player_id.clone(),
            players: room
                .players()
                .iter()
                .map(|p| PlayerCardCount {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    cards_count: game.cards_count(&p.id),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStarted {
    pub room_code: RoomCode,
}

/// A message from the server to a client, framed as
/// `{ "type": <snake_case variant>, "data": <payload> }`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Greeting sent when a connection opens.
    Hello(Notice),
    /// Reply to the creator of a room.
    CreatedRoom(Seated),
    /// Reply to a player who joined a room.
    JoinedRoom(Seated),
    /// Current roster, sent to everyone in the room.
    RoomState(RoomStateView),
    /// A player's dealt hand.
    YourHand(HandView),
    /// Opening player and card counts.
    GameState(GameStateView),
    /// The deal is complete.
    GameStarted(GameStarted),
    /// A request from this client failed.
    Error(Notice),
}

impl ServerMessage {
    pub fn hello() -> Self {
        Self::Hello(Notice {
            message: "connected".to_string(),
        })
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(Notice {
            message: message.into(),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Hello(_) => "hello",
            Self::CreatedRoom(_) => "created_room",
            Self::JoinedRoom(_) => "joined_room",
            Self::RoomState(_) => "room_state",
            Self::YourHand(_) => "your_hand",
            Self::GameState(_) => "game_state",
            Self::GameStarted(_) => "game_started",
            Self::Error(_) => "error",
        }
    }
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Error(notice) => write!(f, "error: {}", notice.message),
            other => f.write_str(other.kind()),
        }
    }
}
