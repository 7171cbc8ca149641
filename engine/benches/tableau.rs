//! Benchmark harness for the drawing rules and outcome classifier
//!
//! These run once per enumerated path, so their throughput bounds the
//! enumerator.

use banco_engine::rules::{banker_draws_after, tableau};
use banco_engine::{Deal, Hand, Outcome, Rank};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_tableau(c: &mut Criterion) {
    c.bench_function("tableau_all_totals", |b| {
        b.iter(|| {
            let mut draws = 0u32;
            for player in 0..10u8 {
                for banker in 0..10u8 {
                    let _ = black_box(tableau(player, banker));
                    for third in 0..10u8 {
                        draws += banker_draws_after(black_box(banker), third) as u32;
                    }
                }
            }
            black_box(draws)
        })
    });
}

fn benchmark_classify(c: &mut Criterion) {
    let deals: Vec<Deal> = Rank::ALL
        .iter()
        .flat_map(|&a| {
            Rank::ALL.iter().map(move |&b| Deal {
                player: Hand::from_ranks(&[a, b]),
                banker: Hand::from_ranks(&[b, a, Rank::new(6)]),
            })
        })
        .collect();

    c.bench_function("classify_169_deals", |b| {
        b.iter(|| {
            let mut ties = 0u32;
            for deal in black_box(&deals) {
                ties += Outcome::classify(deal).is_tiger_tie() as u32;
            }
            black_box(ties)
        })
    });
}

criterion_group!(benches, benchmark_tableau, benchmark_classify);
criterion_main!(benches);
