//! Third-card drawing tableau
//!
//! Both functions are pure and sit on the enumerator's hot path. Totals are
//! hand totals (0-9) and the player's third card is passed as its point
//! value, not its rank.

/// What happens once both sides hold two cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tableau {
    /// Either side has a natural 8 or 9; nobody draws.
    Natural,
    /// Player stands on 6-7; Banker draws on 0-5.
    PlayerStands { banker_draws: bool },
    /// Player draws on 0-5; Banker's decision waits for the third card
    /// (see [`banker_draws_after`]).
    PlayerDraws,
}

/// Two-card total of 8 or 9.
#[inline(always)]
pub fn is_natural(total: u8) -> bool {
    total >= 8
}

/// Player draws on 0-5, stands on 6-7.
#[inline(always)]
pub fn player_draws(player_total: u8) -> bool {
    player_total <= 5
}

/// Decide the deal from both two-card totals.
#[inline]
pub fn tableau(player_total: u8, banker_total: u8) -> Tableau {
    if is_natural(player_total) || is_natural(banker_total) {
        Tableau::Natural
    } else if player_draws(player_total) {
        Tableau::PlayerDraws
    } else {
        Tableau::PlayerStands {
            banker_draws: banker_total <= 5,
        }
    }
}

/// Banker's decision after Player drew a third card worth `third_point`.
#[inline]
pub fn banker_draws_after(banker_total: u8, third_point: u8) -> bool {
    match banker_total {
        0..=2 => true,
        3 => third_point != 8,
        4 => (2..=7).contains(&third_point),
        5 => (4..=7).contains(&third_point),
        6 => (6..=7).contains(&third_point),
        _ => false,
    }
}
