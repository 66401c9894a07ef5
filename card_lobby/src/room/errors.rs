//! Room error types.
//!
//! The `Display` text of each variant is the message sent to the client in
//! an `error` event.

use thiserror::Error;

/// Errors returned by room operations
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RoomError {
    /// No live room has this code
    #[error("Room not found")]
    RoomNotFound,

    /// Joining a room whose game has already been dealt
    #[error("Game already started")]
    GameAlreadyStarted,

    /// Room is at capacity
    #[error("Room is full")]
    RoomFull,

    /// Requesting connection has no player in the room
    #[error("Not in this room")]
    NotInRoom,

    /// Only the host may start the game
    #[error("Only host can start")]
    NotHost,

    /// Too few players to deal
    #[error("Need at least {0} players")]
    NotEnoughPlayers(usize),

    /// Starting a room that is already playing
    #[error("Game already started")]
    AlreadyStarted,
}

/// Result type for room operations
pub type RoomResult<T> = Result<T, RoomError>;
