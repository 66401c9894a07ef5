//! Fixed parameters of the deck and the deal.

use super::entities::{Card, Rank, Suit};

/// Cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Cards dealt to each player when a game starts.
pub const HAND_SIZE: usize = 13;

/// Whoever is dealt this card leads the first trick.
pub const OPENING_CARD: Card = Card(Rank::Three, Suit::Spade);
