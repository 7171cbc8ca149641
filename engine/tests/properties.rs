//! Property tests over randomly depleted shoes

use banco_engine::{calculate_ev, PayoutTable, Rank, ShoeState};
use proptest::prelude::*;

const TOL: f64 = 1e-9;

/// Small shoes keep each case cheap; at least six cards so every deal can
/// be completed.
fn shoe_strategy() -> impl Strategy<Value = ShoeState> {
    prop::array::uniform13(0u32..=4)
        .prop_filter("at least six cards", |counts| counts.iter().sum::<u32>() >= 6)
        .prop_map(ShoeState::from_counts)
}

/// Four or five cards: enough to deal, but some rounds cannot be finished.
fn short_shoe_strategy() -> impl Strategy<Value = ShoeState> {
    prop::collection::vec(1u8..=13, 4..=5).prop_map(|ranks| {
        let mut shoe = ShoeState::empty();
        for value in ranks {
            shoe.add(Rank::new(value));
        }
        shoe
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn winner_probabilities_sum_to_one(shoe in shoe_strategy()) {
        let r = calculate_ev(&shoe, &PayoutTable::default(), 0.0).unwrap();
        let sum = r.player.probability + r.banker.probability + r.tie.probability;
        prop_assert!((sum - 1.0).abs() < TOL, "sum = {}", sum);
        prop_assert_eq!(r.unresolved, 0.0);
    }

    #[test]
    fn tie_bonuses_partition_tie(shoe in shoe_strategy()) {
        let r = calculate_ev(&shoe, &PayoutTable::default(), 0.0).unwrap();
        let sum: f64 = r.tie_bonuses.iter().map(|b| b.probability).sum();
        prop_assert!((sum - r.tie.probability).abs() < TOL);
    }

    #[test]
    fn probabilities_are_bounded(shoe in shoe_strategy(), rebate in 0.0f64..0.05) {
        let r = calculate_ev(&shoe, &PayoutTable::default(), rebate).unwrap();
        for bet in r.bets() {
            prop_assert!(bet.probability >= 0.0 && bet.probability <= 1.0 + TOL, "{}", bet.label);
            prop_assert!(bet.ev.is_finite(), "{}", bet.label);
        }
    }

    #[test]
    fn repeated_calls_are_bit_identical(shoe in shoe_strategy()) {
        let payouts = PayoutTable::default();
        let a = calculate_ev(&shoe, &payouts, 0.012).unwrap();
        let b = calculate_ev(&shoe, &payouts, 0.012).unwrap();
        for (x, y) in a.bets().iter().zip(b.bets().iter()) {
            prop_assert_eq!(x.ev.to_bits(), y.ev.to_bits());
        }
    }

    #[test]
    fn too_few_cards_is_an_error(counts in prop::array::uniform13(0u32..=1)) {
        let shoe = ShoeState::from_counts(counts);
        let result = calculate_ev(&shoe, &PayoutTable::default(), 0.0);
        prop_assert_eq!(result.is_err(), shoe.total() < 4);
    }

    #[test]
    fn short_shoe_mass_is_conserved(shoe in short_shoe_strategy()) {
        let r = calculate_ev(&shoe, &PayoutTable::default(), 0.0).unwrap();
        let sum = r.player.probability + r.banker.probability + r.tie.probability;
        prop_assert!((sum + r.unresolved - 1.0).abs() < TOL, "sum = {}", sum);
        let bonuses: f64 = r.tie_bonuses.iter().map(|b| b.probability).sum();
        prop_assert!((bonuses - r.tie.probability).abs() < TOL);
    }

    #[test]
    fn short_shoe_rebate_only_on_resolved(shoe in short_shoe_strategy(), rebate in 0.0f64..0.05) {
        let r = calculate_ev(&shoe, &PayoutTable::default(), rebate).unwrap();
        let resolved = 1.0 - r.unresolved;
        for bet in r.bets() {
            let ceiling = bet.probability * bet.payout + rebate * resolved;
            prop_assert!(bet.ev <= ceiling + TOL, "{}: {} > {}", bet.label, bet.ev, ceiling);
            prop_assert!(bet.ev >= -resolved - TOL, "{}", bet.label);
        }
    }
}
