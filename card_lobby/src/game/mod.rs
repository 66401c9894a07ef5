//! Card game engine - deck, deal and the dealt game record.
//!
//! This module provides the pieces the room state machine needs when a
//! game starts:
//! - Ranks in game order, suits, cards and the 52-card deck
//! - An unbiased Fisher-Yates shuffle over any `rand::Rng`
//! - The `Game` record produced by dealing hands to a roster

pub mod constants;
pub mod entities;
pub mod state;

pub use entities::{Card, CardParseError, Deck, PlayerId, Rank, Suit, build_deck, shuffle};
pub use state::Game;
