use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use golf_rs::deck::{Deck, RngShuffler};
use golf_rs::game::{Match, MatchConfig};
use golf_rs::hand::SlotView;
use golf_rs::round::{Phase, Round};

/// Play a round to the end, flipping the first hidden card every turn.
fn play_round(players: usize, seed: u64) -> Vec<u32> {
    let mut shuffler = RngShuffler::seeded(seed);
    let mut r = Round::new(Deck::shuffled(&mut shuffler).unwrap());
    r.deal(players).unwrap();
    for p in 0..players {
        r.reveal_initial(p, &[0, 4]).unwrap();
    }
    while r.phase() == Phase::Playing {
        let p = r.current_player();
        let slot = r.visible_hand(p).unwrap().iter().position(|v| *v == SlotView::Hidden).unwrap();
        r.draw_from_deck(&mut shuffler).unwrap();
        r.discard_drawn().unwrap();
        r.flip(slot).unwrap();
    }
    r.scores().unwrap().to_vec()
}

fn bench_round(c: &mut Criterion) {
    let mut g = c.benchmark_group("round");
    for players in [2usize, 4, 8] {
        g.bench_with_input(BenchmarkId::new("flip_policy", players), &players, |b, &n| {
            b.iter(|| play_round(black_box(n), black_box(7)))
        });
    }
    g.finish();
}

fn bench_shuffle(c: &mut Criterion) {
    let mut shuffler = RngShuffler::seeded(1);
    c.bench_function("deck_shuffle", |b| b.iter(|| Deck::shuffled(black_box(&mut shuffler))));
}

fn bench_match_start(c: &mut Criterion) {
    c.bench_function("match_start", |b| {
        b.iter(|| Match::start(black_box(MatchConfig::new(4, 9)), RngShuffler::seeded(3)))
    });
}

criterion_group!(benches, bench_round, bench_shuffle, bench_match_start);
criterion_main!(benches);
