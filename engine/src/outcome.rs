//! Outcome classification for a resolved deal

use crate::deal::Deal;

/// Total that triggers the tiger bet family.
pub const TIGER_POINT: u8 = 6;

/// Result of the main game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Player,
    Banker,
    Tie { point: u8 },
}

/// Banker won with a total of six, split by hand length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SixWin {
    /// Two-card six ("small tiger").
    TwoCards,
    /// Three-card six ("big tiger").
    ThreeCards,
}

/// Tiger Pair side bet tiers, by which sides are paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TigerPair {
    None,
    /// Exactly one side paired.
    Single,
    /// Both sides paired on different ranks.
    Dual,
    /// Both sides paired on the same rank.
    Same,
}

/// Every bet-relevant fact about one deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub winner: Winner,
    pub player_pair: bool,
    pub banker_pair: bool,
    pub banker_six: Option<SixWin>,
    pub tiger_pair: TigerPair,
}

impl Outcome {
    /// Classify a resolved deal
    #[inline]
    pub fn classify(deal: &Deal) -> Self {
        let player_total = deal.player.total();
        let banker_total = deal.banker.total();
        let winner = if player_total > banker_total {
            Winner::Player
        } else if player_total < banker_total {
            Winner::Banker
        } else {
            Winner::Tie {
                point: player_total,
            }
        };

        let banker_six = match winner {
            Winner::Banker if banker_total == TIGER_POINT => Some(if deal.banker.len() == 2 {
                SixWin::TwoCards
            } else {
                SixWin::ThreeCards
            }),
            _ => None,
        };

        let player_pair = deal.player.pair_rank();
        let banker_pair = deal.banker.pair_rank();
        let tiger_pair = match (player_pair, banker_pair) {
            (Some(p), Some(b)) if p == b => TigerPair::Same,
            (Some(_), Some(_)) => TigerPair::Dual,
            (Some(_), None) | (None, Some(_)) => TigerPair::Single,
            (None, None) => TigerPair::None,
        };

        Outcome {
            winner,
            player_pair: player_pair.is_some(),
            banker_pair: banker_pair.is_some(),
            banker_six,
            tiger_pair,
        }
    }

    /// Tie on exactly six.
    pub fn is_tiger_tie(&self) -> bool {
        self.winner == Winner::Tie { point: TIGER_POINT }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Rank;
    use crate::deal::Hand;

    fn deal(player: &[u8], banker: &[u8]) -> Deal {
        let ranks = |v: &[u8]| v.iter().map(|&r| Rank::new(r)).collect::<Vec<_>>();
        Deal {
            player: Hand::from_ranks(&ranks(player)),
            banker: Hand::from_ranks(&ranks(banker)),
        }
    }

    #[test]
    fn test_winner() {
        assert_eq!(Outcome::classify(&deal(&[4, 5], &[2, 3])).winner, Winner::Player);
        assert_eq!(Outcome::classify(&deal(&[10, 2, 3], &[13, 7])).winner, Winner::Banker);
        assert_eq!(
            Outcome::classify(&deal(&[9, 9], &[4, 4])).winner,
            Winner::Tie { point: 8 }
        );
    }

    #[test]
    fn test_banker_six_tiers() {
        let two = Outcome::classify(&deal(&[2, 3], &[1, 5]));
        assert_eq!(two.banker_six, Some(SixWin::TwoCards));
        let three = Outcome::classify(&deal(&[10, 12, 4], &[1, 1, 4]));
        assert_eq!(three.banker_six, Some(SixWin::ThreeCards));
        // Banker six that loses to a seven is not a tiger
        let lost = Outcome::classify(&deal(&[3, 4], &[2, 4]));
        assert_eq!(lost.banker_six, None);
        // Player winning on six is not a tiger either
        let player_six = Outcome::classify(&deal(&[2, 4], &[10, 5, 10]));
        assert_eq!(player_six.banker_six, None);
    }

    #[test]
    fn test_tiger_tie() {
        assert!(Outcome::classify(&deal(&[3, 3], &[1, 5])).is_tiger_tie());
        assert!(!Outcome::classify(&deal(&[3, 4], &[1, 6])).is_tiger_tie());
    }

    #[test]
    fn test_pairs_use_first_two_cards() {
        let o = Outcome::classify(&deal(&[5, 5, 2], &[3, 2, 3]));
        assert!(o.player_pair);
        assert!(!o.banker_pair);
        assert_eq!(o.tiger_pair, TigerPair::Single);
    }

    #[test]
    fn test_tiger_pair_tiers() {
        assert_eq!(Outcome::classify(&deal(&[5, 5], &[5, 5])).tiger_pair, TigerPair::Same);
        assert_eq!(Outcome::classify(&deal(&[5, 5], &[12, 12])).tiger_pair, TigerPair::Dual);
        assert_eq!(Outcome::classify(&deal(&[11, 12], &[10, 13])).tiger_pair, TigerPair::None);
        // Ten and king share a point value but are not a pair
        assert!(!Outcome::classify(&deal(&[10, 13], &[1, 2])).player_pair);
    }
}
