//! Pick-style bonus mini-game
//!
//! Up to three pick rounds over a weighted prize pool; coin values scale
//! with the round, multiplier prizes compound, and the game may stop early
//! after the first round.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum pick rounds
const MAX_ROUNDS: u32 = 3;
/// Chance to stop after the first round
const EARLY_STOP_CHANCE: f64 = 0.30;

/// One prize in the pick pool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PickPrize {
    /// Plain coin value
    Coins { amount: f64 },
    /// Multiplier prize with partial coin value
    Multiplier { amount: f64, factor: u32 },
    /// Extra pick marker with a small coin value
    ExtraPick { amount: f64 },
}

impl PickPrize {
    /// Coin value contributed by this prize
    pub fn coin_value(&self) -> f64 {
        match self {
            Self::Coins { amount } | Self::Multiplier { amount, .. } | Self::ExtraPick { amount } => {
                *amount
            }
        }
    }
}

/// One revealed pick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickRound {
    /// Which option was picked
    pub choice: usize,
    /// What it revealed
    pub prize: PickPrize,
}

/// Full bonus-game outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickBonusOutcome {
    pub rounds: Vec<PickRound>,
    /// Accumulated coin value before the multiplier
    pub coin_total: f64,
    /// Product of all multiplier prizes
    pub multiplier: f64,
    /// Final award: coin total × multiplier
    pub total_win: f64,
}

/// Build the prize pool for one round (1-based).
///
/// Six coin options, three multiplier options, and one extra-pick option on
/// the first two rounds, a 60/30/10 split.
fn generate_options<R: Rng + ?Sized>(base_win: f64, round: u32, rng: &mut R) -> Vec<PickPrize> {
    let round_multiplier = round as f64 * 0.5 + 1.0;
    let mut options = Vec::with_capacity(10);

    for _ in 0..6 {
        let spread = 0.5 + rng.gen_range(0.0..2.0);
        options.push(PickPrize::Coins {
            amount: (base_win * spread * round_multiplier).floor(),
        });
    }

    for _ in 0..3 {
        let factor = 2 + rng.gen_range(0..3u32);
        options.push(PickPrize::Multiplier {
            amount: (base_win * 0.5).floor(),
            factor,
        });
    }

    if round < MAX_ROUNDS {
        options.push(PickPrize::ExtraPick {
            amount: (base_win * 0.3).floor(),
        });
    }

    options
}

/// Play the full pick bonus for a base win
pub fn play_pick_bonus<R: Rng + ?Sized>(base_win: f64, rng: &mut R) -> PickBonusOutcome {
    let mut rounds = Vec::new();
    let mut coin_total = 0.0;
    let mut multiplier = 1.0;

    for round in 1..=MAX_ROUNDS {
        let options = generate_options(base_win, round, rng);
        let choice = rng.gen_range(0..options.len());
        let prize = options[choice].clone();

        coin_total += prize.coin_value();
        if let PickPrize::Multiplier { factor, .. } = &prize {
            multiplier *= *factor as f64;
        }

        rounds.push(PickRound { choice, prize });

        if round == 1 && rng.gen_bool(EARLY_STOP_CHANCE) {
            break;
        }
    }

    PickBonusOutcome {
        rounds,
        coin_total,
        multiplier,
        total_win: coin_total * multiplier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn plays_one_to_three_rounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut saw_short = false;
        let mut saw_full = false;

        for _ in 0..200 {
            let outcome = play_pick_bonus(100.0, &mut rng);
            assert!((1..=3).contains(&outcome.rounds.len()));
            match outcome.rounds.len() {
                1 => saw_short = true,
                3 => saw_full = true,
                _ => {}
            }
        }
        assert!(saw_short && saw_full);
    }

    #[test]
    fn total_is_coins_times_multiplier() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..100 {
            let outcome = play_pick_bonus(50.0, &mut rng);
            assert!(
                (outcome.total_win - outcome.coin_total * outcome.multiplier).abs() < 1e-9
            );
            assert!(outcome.multiplier >= 1.0);
            assert!(outcome.coin_total >= 0.0);
        }
    }

    #[test]
    fn multiplier_factors_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(21);
        for round in 1..=MAX_ROUNDS {
            let options = generate_options(100.0, round, &mut rng);
            let expected = if round < MAX_ROUNDS { 10 } else { 9 };
            assert_eq!(options.len(), expected);

            for prize in &options {
                if let PickPrize::Multiplier { factor, .. } = prize {
                    assert!((2..=4).contains(factor));
                }
            }
        }
    }

    #[test]
    fn coin_values_scale_with_round() {
        // Round scaling: 1.5× / 2.0× / 2.5× of the drawn spread.
        let mut rng = StdRng::seed_from_u64(4);
        let base = 100.0;
        let options = generate_options(base, 3, &mut rng);
        for prize in options {
            if let PickPrize::Coins { amount } = prize {
                // spread ∈ [0.5, 2.5), round multiplier 2.5
                assert!(amount >= (base * 0.5 * 2.5).floor() - 1.0);
                assert!(amount <= base * 2.5 * 2.5);
            }
        }
    }
}
