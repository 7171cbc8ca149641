//! Criterion benchmarks for full EV calculations

use banco_engine::{calculate_ev, tally, PayoutTable, Rank, ShoeState};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_full_shoe(c: &mut Criterion) {
    let shoe = ShoeState::full(8);
    let payouts = PayoutTable::default();
    c.bench_function("calculate_ev_eight_decks", |b| {
        b.iter(|| calculate_ev(black_box(&shoe), black_box(&payouts), 0.0))
    });
}

fn benchmark_late_shoe(c: &mut Criterion) {
    // Late in the shoe with two ranks gone: fewer branches
    let shoe = ShoeState::from_counts([6, 4, 5, 7, 3, 6, 5, 2, 4, 9, 8, 7, 6])
        .without_rank(Rank::new(5))
        .without_rank(Rank::new(8));
    c.bench_function("tally_late_shoe", |b| b.iter(|| tally(black_box(&shoe))));
}

fn benchmark_reprice(c: &mut Criterion) {
    let counts = tally(&ShoeState::full(8));
    let payouts = PayoutTable::default();
    c.bench_function("price_existing_tally", |b| {
        b.iter(|| black_box(&counts).price(416, black_box(&payouts), 0.014))
    });
}

criterion_group!(benches, benchmark_full_shoe, benchmark_late_shoe, benchmark_reprice);
criterion_main!(benches);
