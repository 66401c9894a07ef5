use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;
use uuid::Uuid;

use super::constants;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Suit {
    Spade,
    Club,
    Diamond,
    Heart,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Spade, Self::Club, Self::Diamond, Self::Heart];

    pub fn symbol(self) -> char {
        match self {
            Self::Spade => '♠',
            Self::Club => '♣',
            Self::Diamond => '♦',
            Self::Heart => '♥',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|suit| suit.symbol() == c)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card ranks in the game's own order: three is lowest, two is highest.
/// The derived ordering follows declaration order, so `Rank::Two` beats
/// `Rank::Ace`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Rank {
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Two,
}

impl Rank {
    pub const ALL: [Self; 13] = [
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
        Self::Two,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            Self::Ace => "A",
            Self::Two => "2",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A card is a rank and a suit. On the wire it is the rank followed by the
/// suit symbol, e.g. `3♠` or `10♥`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card(pub Rank, pub Suit);

impl Card {
    pub fn rank(&self) -> Rank {
        self.0
    }

    pub fn suit(&self) -> Suit {
        self.1
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
#[error("invalid card: {0:?}")]
pub struct CardParseError(pub String);

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CardParseError(s.to_string());
        let mut chars = s.chars();
        let suit = chars.next_back().and_then(Suit::from_symbol).ok_or_else(invalid)?;
        let rank_repr = chars.as_str();
        let rank = Rank::ALL
            .into_iter()
            .find(|rank| rank.as_str() == rank_repr)
            .ok_or_else(invalid)?;
        Ok(Self(rank, suit))
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = String::deserialize(deserializer)?;
        repr.parse().map_err(serde::de::Error::custom)
    }
}

/// All 52 cards, rank-major: every suit of the three, then every suit of
/// the four, and so on up to the two.
pub fn build_deck() -> Vec<Card> {
    Rank::ALL
        .into_iter()
        .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| Card(rank, suit)))
        .collect()
}

/// Fisher-Yates shuffle. Walks from the last index down to 1 and swaps each
/// element with one drawn uniformly from `[0, i]`, so every permutation is
/// equally likely given a uniform source.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// An ordered deck, as produced by [`build_deck`].
    pub fn build() -> Self {
        Self {
            cards: build_deck(),
        }
    }

    /// A freshly built deck that has already been shuffled.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::build();
        deck.shuffle(rng);
        deck
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        shuffle(&mut self.cards, rng);
    }

    /// Removes up to `n` cards from the top of the deck.
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        let n = n.min(self.cards.len());
        self.cards.drain(..n).collect()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether the deck still holds the card that decides the opening lead.
    pub fn contains_opening_card(&self) -> bool {
        self.cards.contains(&constants::OPENING_CARD)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::build()
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

/// Opaque player identifier. Generated by the server on join and never
/// derived from anything the client sends.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    // === Card Tests ===

    #[test]
    fn test_card_display() {
        assert_eq!(Card(Rank::Three, Suit::Spade).to_string(), "3♠");
        assert_eq!(Card(Rank::Ten, Suit::Heart).to_string(), "10♥");
        assert_eq!(Card(Rank::Queen, Suit::Diamond).to_string(), "Q♦");
        assert_eq!(Card(Rank::Two, Suit::Club).to_string(), "2♣");
    }

    #[test]
    fn test_card_parse() {
        assert_eq!("10♥".parse::<Card>(), Ok(Card(Rank::Ten, Suit::Heart)));
        assert_eq!("A♣".parse::<Card>(), Ok(Card(Rank::Ace, Suit::Club)));
        assert!("1♠".parse::<Card>().is_err());
        assert!("3S".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn test_card_serializes_as_string() {
        let json = serde_json::to_string(&Card(Rank::Three, Suit::Spade)).unwrap();
        assert_eq!(json, "\"3♠\"");

        let card: Card = serde_json::from_str("\"K♦\"").unwrap();
        assert_eq!(card, Card(Rank::King, Suit::Diamond));
    }

    #[test]
    fn test_rank_game_order() {
        assert!(Rank::Three < Rank::Four);
        assert!(Rank::King < Rank::Ace);
        assert!(Rank::Ace < Rank::Two);
        assert_eq!(Rank::ALL.first(), Some(&Rank::Three));
        assert_eq!(Rank::ALL.last(), Some(&Rank::Two));
    }

    // === Deck Tests ===

    #[test]
    fn test_build_deck_is_complete() {
        let deck = build_deck();
        assert_eq!(deck.len(), constants::DECK_SIZE);

        let unique: HashSet<Card> = deck.iter().copied().collect();
        assert_eq!(unique.len(), constants::DECK_SIZE);
    }

    #[test]
    fn test_build_deck_is_rank_major() {
        let deck = build_deck();
        assert_eq!(
            &deck[..4],
            &[
                Card(Rank::Three, Suit::Spade),
                Card(Rank::Three, Suit::Club),
                Card(Rank::Three, Suit::Diamond),
                Card(Rank::Three, Suit::Heart),
            ]
        );
        assert_eq!(deck[4], Card(Rank::Four, Suit::Spade));
        assert_eq!(deck[51], Card(Rank::Two, Suit::Heart));
        assert_eq!(build_deck(), deck);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let deck = Deck::shuffled(&mut rng);
        assert_eq!(deck.len(), constants::DECK_SIZE);

        let mut sorted = deck.cards().to_vec();
        sorted.sort();
        let mut expected = build_deck();
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_shuffle_is_reproducible_with_seed() {
        let a = Deck::shuffled(&mut StdRng::seed_from_u64(42));
        let b = Deck::shuffled(&mut StdRng::seed_from_u64(42));
        let c = Deck::shuffled(&mut StdRng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_shuffle_handles_short_slices() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut rng);

        let mut single = [9];
        shuffle(&mut single, &mut rng);
        assert_eq!(single, [9]);
    }

    #[test]
    fn test_deck_deal_takes_from_front() {
        let mut deck = Deck::build();
        let hand = deck.deal(5);
        assert_eq!(hand, build_deck()[..5].to_vec());
        assert_eq!(deck.len(), 47);
        assert_eq!(deck.cards()[0], Card(Rank::Four, Suit::Club));
    }

    #[test]
    fn test_deck_deal_past_end() {
        let mut deck = Deck::default();
        assert_eq!(deck.deal(60).len(), 52);
        assert!(deck.is_empty());
        assert!(deck.deal(1).is_empty());
        assert!(!deck.contains_opening_card());
    }

    // === PlayerId Tests ===

    #[test]
    fn test_player_ids_are_unique() {
        let ids: HashSet<PlayerId> = (0..1000).map(|_| PlayerId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
