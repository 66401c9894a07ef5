//! Networking layer between client connections and rooms.
//!
//! Frames are JSON objects of the form `{ "type": ..., "data": ... }`. The
//! transport itself (sockets, framing, disconnect detection) lives in the
//! server crate; everything here works on decoded text and in-process
//! channels.

/// Weak handle to a client's outbound queue.
pub mod connection;

/// Protocol decoding errors.
pub mod errors;

/// Per-connection session routing actions to the room registry.
pub mod gateway;

/// Inbound actions and outbound events.
pub mod messages;

pub use connection::{Connection, ConnectionId};
pub use errors::ProtocolError;
pub use gateway::{Outcome, Session};
pub use messages::{ClientAction, ServerMessage};
