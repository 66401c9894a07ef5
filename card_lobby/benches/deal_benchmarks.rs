use card_lobby::game::{Deck, Game, PlayerId, build_deck, constants::HAND_SIZE, shuffle};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::StdRng};
use std::hint::black_box;

/// Benchmark building an ordered deck
fn bench_build_deck(c: &mut Criterion) {
    c.bench_function("build_deck", |b| b.iter(|| black_box(build_deck())));
}

/// Benchmark the Fisher-Yates shuffle on a full deck
fn bench_shuffle(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut cards = build_deck();
    c.bench_function("shuffle_52", |b| {
        b.iter(|| {
            shuffle(&mut cards, &mut rng);
            black_box(&cards);
        })
    });
}

/// Benchmark a full deal for each supported roster size
fn bench_deal(c: &mut Criterion) {
    let mut group = c.benchmark_group("deal");
    for n in 2..=4 {
        let players: Vec<PlayerId> = (0..n)
            .map(|i| PlayerId::from(format!("player{i}").as_str()))
            .collect();
        let mut rng = StdRng::seed_from_u64(2);
        group.bench_with_input(BenchmarkId::from_parameter(n), &players, |b, players| {
            b.iter(|| black_box(Game::deal(players, HAND_SIZE, &mut rng)))
        });
    }
    group.finish();
}

/// Benchmark dealing from a prepared deck, without the shuffle
fn bench_deal_from_sorted(c: &mut Criterion) {
    let players: Vec<PlayerId> = (0..4)
        .map(|i| PlayerId::from(format!("player{i}").as_str()))
        .collect();
    c.bench_function("deal_from_sorted_4", |b| {
        b.iter(|| black_box(Game::deal_from(Deck::build(), &players, HAND_SIZE)))
    });
}

criterion_group!(
    benches,
    bench_build_deck,
    bench_shuffle,
    bench_deal,
    bench_deal_from_sorted
);
criterion_main!(benches);
