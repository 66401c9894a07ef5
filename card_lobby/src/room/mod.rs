//! Rooms: lobby membership, hosting and the start-game transition.
//!
//! This module implements:
//! - Room: plain state plus the join, leave and start transitions
//! - RoomActor: async actor owning one room and delivering its events
//! - RoomRegistry: code-keyed registry of live rooms
//!
//! ## Architecture
//!
//! Each room runs in its own Tokio task with an mpsc message inbox, so all
//! mutations of one room are serialized while different rooms proceed in
//! parallel. The registry spawns an actor per created room and drops the
//! handle once the last player leaves.
//!
//! ## Example
//!
//! ```ignore
//! use card_lobby::room::RoomRegistry;
//! use card_lobby::net::Connection;
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = RoomRegistry::default();
//!     let (tx, mut rx) = mpsc::channel(64);
//!
//!     let (code, player_id) = registry.create(Some("Alice"), Connection::new(&tx)).await;
//!
//!     // created_room, then room_state
//!     while let Some(message) = rx.recv().await {
//!         println!("{message}");
//!     }
//! }
//! ```

pub mod actor;
pub mod config;
pub mod entities;
pub mod errors;
pub mod messages;
pub mod registry;

pub use actor::{RoomActor, RoomHandle};
pub use config::RoomConfig;
pub use entities::{Player, Room, RoomCode, RoomPhase, RoomStatus};
pub use errors::{RoomError, RoomResult};
pub use messages::{LeaveOutcome, RoomMessage};
pub use registry::RoomRegistry;
