//! Free-spin enhancement pass
//!
//! Runs over an already-evaluated [`SpinResult`] whenever free spins were
//! active at spin start. Enhancements rewrite the displayed grid and may
//! scale the payout, but never re-run payline evaluation: the payout the
//! evaluator produced stands unless a late-stage multiplier applies.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::features::lucky_wood::{LuckyWoodOutcome, roll_lucky_wood};
use crate::grid::REELS;
use crate::spin::SpinResult;
use crate::symbols::{SymbolCatalog, WILD};

/// Chance that wilds expand to fill their reels
const EXPANDING_WILD_CHANCE: f64 = 0.20;
/// Base sticky-wild chance; grows as the feature runs out
const STICKY_WILD_BASE_CHANCE: f64 = 0.15;
const STICKY_WILD_CHANCE_STEP: f64 = 0.02;
/// Spins-remaining threshold for the late-stage multiplier
const LATE_MULTIPLIER_THRESHOLD: u32 = 3;

/// Enhancements applied to one free spin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecialFeatures {
    /// Wild-bearing reels were rewritten to all-wild
    pub expanding_wilds: bool,
    /// Sticky wilds rolled (flag only; no state persists across spins)
    pub sticky_wilds: bool,
    /// Extra multiplier applied in the final spins (1 when inactive)
    pub extra_multiplier: u32,
    /// Lucky Wood transformation, if it fired on this spin
    pub lucky_wood: Option<LuckyWoodOutcome>,
}

/// Apply free-spin enhancements to an evaluated result.
///
/// Expanding wilds rewrite every wild-bearing reel to all wild on the
/// returned grid; the payout already computed is not recomputed. When three
/// or fewer spins remain, an extra 2–4× multiplier stacks on top of the
/// step multiplier the evaluator applied.
pub fn enhance_free_spin<R: Rng + ?Sized>(
    spins_remaining: u32,
    mut result: SpinResult,
    catalog: &SymbolCatalog,
    rng: &mut R,
) -> (SpinResult, SpecialFeatures) {
    let mut features = SpecialFeatures {
        extra_multiplier: 1,
        ..SpecialFeatures::default()
    };

    if rng.gen_bool(EXPANDING_WILD_CHANCE) {
        let mut expanded = false;
        for reel in 0..REELS {
            if result.grid.reel_contains(reel, WILD) {
                result.grid.fill_reel(reel, WILD);
                expanded = true;
            }
        }
        features.expanding_wilds = expanded;
    }

    let sticky_chance = STICKY_WILD_BASE_CHANCE
        + STICKY_WILD_CHANCE_STEP * (10 - spins_remaining.min(10)) as f64;
    if rng.gen_bool(sticky_chance) {
        features.sticky_wilds = true;
    }

    if spins_remaining <= LATE_MULTIPLIER_THRESHOLD {
        let extra = rng.gen_range(2..=4u32);
        features.extra_multiplier = extra;
        result.total_payout *= extra as f64;
    }

    if let Some(outcome) = roll_lucky_wood(&result.grid, catalog, rng) {
        log::debug!("lucky wood fired: {:?}", outcome.transform);
        features.lucky_wood = Some(outcome);
    }

    (result, features)
}
