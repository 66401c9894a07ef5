/// Statistical checks that the shuffle is unbiased.
///
/// Seeds are fixed so the outcome is reproducible; the bounds sit several
/// standard deviations away from the expected values.
use card_lobby::game::{Deck, build_deck, constants::DECK_SIZE, shuffle};
use rand::{SeedableRng, rngs::StdRng};
use std::collections::HashMap;

#[test]
fn test_all_permutations_of_three_equally_likely() {
    const TRIALS: usize = 60_000;
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut counts: HashMap<[u8; 3], usize> = HashMap::new();

    for _ in 0..TRIALS {
        let mut items = [0u8, 1, 2];
        shuffle(&mut items, &mut rng);
        *counts.entry(items).or_default() += 1;
    }

    assert_eq!(counts.len(), 6);
    let expected = TRIALS / 6;
    for (permutation, count) in counts {
        assert!(
            count.abs_diff(expected) < 500,
            "{permutation:?} seen {count} times, expected about {expected}"
        );
    }
}

#[test]
fn test_card_positions_chi_square() {
    const TRIALS: usize = 20_000;
    let deck = build_deck();
    let mut rng = StdRng::seed_from_u64(1234);
    let mut counts = vec![[0usize; DECK_SIZE]; DECK_SIZE];

    for _ in 0..TRIALS {
        let shuffled = Deck::shuffled(&mut rng);
        for (position, card) in shuffled.cards().iter().enumerate() {
            let index = deck.iter().position(|c| c == card).unwrap();
            counts[index][position] += 1;
        }
    }

    let expected = TRIALS as f64 / DECK_SIZE as f64;
    let chi_square: f64 = counts
        .iter()
        .flatten()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum();

    // 52 rows of 51 degrees of freedom each: mean 2652, standard deviation about 73.
    assert!(chi_square < 3000.0, "chi-square {chi_square} too large");
    assert!(chi_square > 2200.0, "chi-square {chi_square} suspiciously small");
}

#[test]
fn test_three_of_spades_lands_everywhere() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut seen = [false; DECK_SIZE];

    for _ in 0..5_000 {
        let shuffled = Deck::shuffled(&mut rng);
        let position = shuffled
            .cards()
            .iter()
            .position(|c| c.to_string() == "3♠")
            .unwrap();
        seen[position] = true;
    }

    assert!(seen.iter().all(|&s| s));
}
