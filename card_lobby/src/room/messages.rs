//! Room actor message types.

use tokio::sync::oneshot;

use super::{entities::Room, errors::RoomResult};
use crate::{
    game::PlayerId,
    net::connection::{Connection, ConnectionId},
};

/// Messages that can be sent to a RoomActor
#[derive(Debug)]
pub enum RoomMessage {
    /// Seat a new player
    Join {
        name: String,
        connection: Connection,
        response: oneshot::Sender<RoomResult<PlayerId>>,
    },

    /// Remove the player bound to a connection
    Leave {
        connection: ConnectionId,
        response: oneshot::Sender<LeaveOutcome>,
    },

    /// Deal the game (host only)
    StartGame {
        connection: ConnectionId,
        response: oneshot::Sender<RoomResult<PlayerId>>,
    },

    /// Roster index of a connection, if it is seated here
    Locate {
        connection: ConnectionId,
        response: oneshot::Sender<Option<usize>>,
    },

    /// Copy of the current room state
    Snapshot { response: oneshot::Sender<Room> },
}

/// Result of a leave request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LeaveOutcome {
    /// Connection was not seated in the room
    NotPresent,

    /// Player removed; others remain
    Left { remaining: usize },

    /// Last player removed; the actor has stopped
    Emptied,
}
