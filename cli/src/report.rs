//! Text and JSON rendering of calculation results

use banco_engine::{CalculationResult, EvResult};
use banco_session::{KellySizer, Recommendation};
use serde_json::json;

pub fn to_json(
    result: &CalculationResult,
    picks: &[Recommendation],
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&json!({
        "result": result,
        "recommendations": picks,
    }))
}

pub fn print_table(result: &CalculationResult, sizer: &KellySizer) {
    println!("Remaining cards: {}", result.total_cards);
    if result.unresolved > 0.0 {
        println!(
            "Unresolved: {:.4}% of deals cannot be completed from this shoe",
            result.unresolved * 100.0
        );
    }
    println!();
    println!("{:<16} {:>10} {:>9} {:>10} {:>12}", "Bet", "Prob", "Payout", "EV", "Stake");
    for bet in result.bets() {
        print_row(bet, sizer);
    }
}

fn print_row(bet: &EvResult, sizer: &KellySizer) {
    println!(
        "{:<16} {:>9.4}% {:>9.2} {:>9.4}% {:>12}",
        bet.label,
        bet.probability * 100.0,
        bet.payout,
        bet.ev * 100.0,
        sizer.stake(bet)
    );
}

pub fn print_recommendations(picks: &[Recommendation]) {
    println!();
    if picks.is_empty() {
        println!("No positive-EV bets: wait for the count to move.");
        return;
    }
    println!("Recommendations:");
    for pick in picks {
        println!("  {:<16} stake {:>12}  EV {:.4}%", pick.label, pick.stake, pick.ev * 100.0);
    }
}
