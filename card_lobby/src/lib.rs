//! # Card Lobby
//!
//! Room management and game setup for a trick-based card game for two to four players.
//!
//! Clients gather in rooms identified by six-character codes. The first
//! player to create a room is its host; once at least two players are
//! seated the host starts the game, which shuffles a 52-card deck, deals
//! thirteen cards to each player and names the holder of the three of
//! spades as the opening player.
//!
//! ## Core Modules
//!
//! - [`game`]: Cards, deck construction, shuffling and the deal
//! - [`room`]: Room state machine, per-room actors and the room registry
//! - [`net`]: Wire messages and the per-connection session
//!
//! ## Example
//!
//! ```
//! use card_lobby::game::{Game, PlayerId};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let players = [PlayerId::from("alice"), PlayerId::from("bob")];
//! let game = Game::deal(&players, 13, &mut StdRng::seed_from_u64(7)).unwrap();
//! assert_eq!(game.cards_count(&players[0]), 13);
//! ```

/// Cards, deck and the initial deal.
pub mod game;
pub use game::{Card, Deck, Game, PlayerId, Rank, Suit};

/// Networking components for client sessions.
pub mod net;
pub use net::{Connection, ConnectionId, ServerMessage, Session};

/// Rooms, room actors and the registry.
pub mod room;
pub use room::{RoomCode, RoomConfig, RoomError, RoomRegistry};
