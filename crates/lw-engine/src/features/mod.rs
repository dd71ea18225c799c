//! Bonus features — enhancement passes and side games
//!
//! Each feature lives in its own module:
//!
//! - `free_spins` — per-spin enhancements while free spins run (expanding
//!   wilds, sticky-wild odds, late-stage multipliers, Lucky Wood roll)
//! - `lucky_wood` — rare grid transformation feature
//! - `pick_bonus` — pick-style bonus mini-game
//! - `gamble` — double-or-nothing card game

pub mod free_spins;
pub mod gamble;
pub mod lucky_wood;
pub mod pick_bonus;

pub use free_spins::{SpecialFeatures, enhance_free_spin};
pub use gamble::{
    Card, CardColor, GambleChoice, GambleRound, GambleSession, Suit, draw_card,
    play_gamble_round, resolve_choice,
};
pub use lucky_wood::{LuckyWoodOutcome, LuckyWoodTransform, roll_lucky_wood, upgrade_symbol};
pub use pick_bonus::{PickBonusOutcome, PickPrize, PickRound, play_pick_bonus};

/// A feature that can be bought directly instead of waiting for a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusBuy {
    FreeSpins,
    BonusGame,
}

impl BonusBuy {
    /// Price in multiples of the total bet
    pub fn cost_multiplier(&self) -> f64 {
        match self {
            Self::FreeSpins => 80.0,
            Self::BonusGame => 120.0,
        }
    }
}

/// Price of buying a feature outright for a given total bet
pub fn bonus_buy_cost(total_bet: f64, feature: BonusBuy) -> f64 {
    total_bet * feature.cost_multiplier()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonus_buy_pricing() {
        assert_eq!(bonus_buy_cost(1.0, BonusBuy::FreeSpins), 80.0);
        assert_eq!(bonus_buy_cost(2.0, BonusBuy::BonusGame), 240.0);
    }
}
