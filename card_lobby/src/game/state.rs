//! The dealt game record.

use rand::Rng;
use std::collections::HashMap;

use super::{
    constants::OPENING_CARD,
    entities::{Card, Deck, PlayerId},
};

/// State created by the start-game transition. Only the deal and the
/// opening player are tracked; trick play is not modelled.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    /// Player expected to lead the first trick
    pub turn_player_id: PlayerId,

    /// Each player's hand, in the order it was dealt
    pub hands: HashMap<PlayerId, Vec<Card>>,

    /// Last cards played to the table. Always `None` until trick play exists.
    pub last_play: Option<Vec<Card>>,
}

impl Game {
    /// Shuffle a fresh deck and deal `hand_size` cards to each player.
    ///
    /// Returns `None` for an empty roster.
    pub fn deal<R: Rng + ?Sized>(
        players: &[PlayerId],
        hand_size: usize,
        rng: &mut R,
    ) -> Option<Self> {
        Self::deal_from(Deck::shuffled(rng), players, hand_size)
    }

    /// Deal from a prepared deck. Hands are taken from the top of the deck
    /// in roster order, so the first player receives the first `hand_size`
    /// cards. The opening player is the first in roster order holding the
    /// three of spades, falling back to the first player.
    pub fn deal_from(mut deck: Deck, players: &[PlayerId], hand_size: usize) -> Option<Self> {
        let first = players.first()?;

        let dealt: Vec<(PlayerId, Vec<Card>)> = players
            .iter()
            .map(|id| (id.clone(), deck.deal(hand_size)))
            .collect();

        let turn_player_id = dealt
            .iter()
            .find(|(_, hand)| hand.contains(&OPENING_CARD))
            .map(|(id, _)| id.clone())
            .unwrap_or_else(|| first.clone());

        Some(Self {
            turn_player_id,
            hands: dealt.into_iter().collect(),
            last_play: None,
        })
    }

    pub fn hand(&self, player_id: &PlayerId) -> Option<&[Card]> {
        self.hands.get(player_id).map(Vec::as_slice)
    }

    pub fn cards_count(&self, player_id: &PlayerId) -> usize {
        self.hands.get(player_id).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        constants::{DECK_SIZE, HAND_SIZE},
        entities::build_deck,
    };
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    fn roster(n: usize) -> Vec<PlayerId> {
        (0..n).map(|i| PlayerId::from(format!("p{i}").as_str())).collect()
    }

    #[test]
    fn test_deal_in_roster_order() {
        let players = roster(2);
        let game = Game::deal_from(Deck::build(), &players, HAND_SIZE).unwrap();

        let deck = build_deck();
        assert_eq!(game.hand(&players[0]).unwrap(), &deck[..13]);
        assert_eq!(game.hand(&players[1]).unwrap(), &deck[13..26]);
        assert!(game.last_play.is_none());
    }

    #[test]
    fn test_opening_player_holds_three_of_spades() {
        let players = roster(3);
        let mut cards = build_deck();
        // Put the three of spades in the middle of the second hand.
        cards.swap(0, 20);
        let game = Game::deal_from(Deck::from(cards), &players, HAND_SIZE).unwrap();

        assert_eq!(game.turn_player_id, players[1]);
        assert!(game.hand(&players[1]).unwrap().contains(&OPENING_CARD));
    }

    #[test]
    fn test_opening_player_fallback_when_card_undealt() {
        let players = roster(2);
        let mut cards = build_deck();
        cards.rotate_left(1);
        // Only 26 cards are dealt; the three of spades now sits at the bottom.
        let game = Game::deal_from(Deck::from(cards), &players, HAND_SIZE).unwrap();

        assert_eq!(game.turn_player_id, players[0]);
        assert!(
            game.hands
                .values()
                .all(|hand| !hand.contains(&OPENING_CARD))
        );
    }

    #[test]
    fn test_four_players_partition_the_deck() {
        let players = roster(4);
        let game = Game::deal(&players, HAND_SIZE, &mut StdRng::seed_from_u64(9)).unwrap();

        let dealt: Vec<Card> = game.hands.values().flatten().copied().collect();
        let unique: HashSet<Card> = dealt.iter().copied().collect();
        assert_eq!(dealt.len(), DECK_SIZE);
        assert_eq!(unique.len(), DECK_SIZE);
        assert!(players.iter().all(|p| game.cards_count(p) == HAND_SIZE));
    }

    #[test]
    fn test_empty_roster_deals_nothing() {
        assert!(Game::deal(&[], HAND_SIZE, &mut StdRng::seed_from_u64(0)).is_none());
    }

    #[test]
    fn test_cards_count_for_unknown_player() {
        let players = roster(2);
        let game = Game::deal_from(Deck::default(), &players, HAND_SIZE).unwrap();
        assert_eq!(game.cards_count(&PlayerId::from("ghost")), 0);
        assert!(game.hand(&PlayerId::from("ghost")).is_none());
    }
}
