//! Lucky Wood grid transformation feature
//!
//! A rare per-spin roll that transforms the displayed grid: a mystery
//! symbol, a whole wild reel, or an upgrade of every symbol along the
//! promotion chains. The transformed grid and the reported multiplier are
//! informational — payline payouts are not recomputed from them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::{Grid, POSITIONS, REELS};
use crate::symbols::{
    ACE, GOLDEN_ACORN, JACK, KING, OAK_LEAVES, PINE_CONE, QUEEN, SymbolCatalog, SymbolId, TEN,
    WILD, WOODEN_LOG,
};

/// Trigger chance per spin
const TRIGGER_CHANCE: f64 = 0.05;

/// Which transformation fired
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LuckyWoodTransform {
    /// Random cells rewritten to one mystery symbol
    MysterySymbol { symbol: SymbolId, cells: u8 },
    /// One whole reel turned wild
    WildReel { reel: u8 },
    /// Every symbol promoted along the upgrade chains
    SymbolUpgrade,
}

/// Outcome of a Lucky Wood trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LuckyWoodOutcome {
    pub transform: LuckyWoodTransform,
    /// The transformed grid (display only)
    pub grid: Grid,
    /// Nominal multiplier for presentation (not wired into payouts)
    pub multiplier: f64,
}

/// One step up the promotion chains; symbols off the chains are unchanged
pub fn upgrade_symbol(id: SymbolId) -> SymbolId {
    match id {
        TEN => JACK,
        JACK => QUEEN,
        QUEEN => KING,
        KING => ACE,
        ACE => OAK_LEAVES,
        WOODEN_LOG => PINE_CONE,
        PINE_CONE => OAK_LEAVES,
        OAK_LEAVES => GOLDEN_ACORN,
        other => other,
    }
}

/// Roll the Lucky Wood feature for a landed grid (5% trigger chance)
pub fn roll_lucky_wood<R: Rng + ?Sized>(
    grid: &Grid,
    catalog: &SymbolCatalog,
    rng: &mut R,
) -> Option<LuckyWoodOutcome> {
    if !rng.gen_bool(TRIGGER_CHANCE) {
        return None;
    }

    let mut transformed = grid.clone();
    let (transform, multiplier) = match rng.gen_range(0..3u8) {
        0 => {
            let symbol = catalog.draw(rng);
            let cells = 2 + rng.gen_range(0..4u8);
            transform_random_cells(&mut transformed, symbol, cells as usize, rng);
            (LuckyWoodTransform::MysterySymbol { symbol, cells }, 2.0)
        }
        1 => {
            let reel = rng.gen_range(0..REELS) as u8;
            transformed.fill_reel(reel as usize, WILD);
            (LuckyWoodTransform::WildReel { reel }, 3.0)
        }
        _ => {
            transformed.map_cells(upgrade_symbol);
            (LuckyWoodTransform::SymbolUpgrade, 1.5)
        }
    };

    Some(LuckyWoodOutcome {
        transform,
        grid: transformed,
        multiplier,
    })
}

/// Rewrite `count` distinct random cells to the target symbol
fn transform_random_cells<R: Rng + ?Sized>(
    grid: &mut Grid,
    target: SymbolId,
    count: usize,
    rng: &mut R,
) {
    let mut positions: Vec<usize> = (0..POSITIONS).collect();
    for _ in 0..count.min(POSITIONS) {
        let idx = rng.gen_range(0..positions.len());
        let position = positions.swap_remove(idx);
        grid.set_position(position, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn upgrade_chains() {
        assert_eq!(upgrade_symbol(TEN), JACK);
        assert_eq!(upgrade_symbol(JACK), QUEEN);
        assert_eq!(upgrade_symbol(QUEEN), KING);
        assert_eq!(upgrade_symbol(KING), ACE);
        assert_eq!(upgrade_symbol(ACE), OAK_LEAVES);
        assert_eq!(upgrade_symbol(WOODEN_LOG), PINE_CONE);
        assert_eq!(upgrade_symbol(PINE_CONE), OAK_LEAVES);
        assert_eq!(upgrade_symbol(OAK_LEAVES), GOLDEN_ACORN);
        // Off-chain symbols stay put.
        assert_eq!(upgrade_symbol(WILD), WILD);
        assert_eq!(upgrade_symbol(GOLDEN_ACORN), GOLDEN_ACORN);
    }

    #[test]
    fn trigger_rate_is_rare() {
        let catalog = SymbolCatalog::standard();
        let grid = Grid::from_reels([[TEN; 3]; 5]);
        let mut rng = StdRng::seed_from_u64(31);

        let triggers = (0..10_000)
            .filter(|_| roll_lucky_wood(&grid, &catalog, &mut rng).is_some())
            .count();
        // ~5%; allow wide slack for the fixed seed.
        assert!((200..800).contains(&triggers), "triggers={triggers}");
    }

    #[test]
    fn transforms_leave_input_grid_untouched() {
        let catalog = SymbolCatalog::standard();
        let grid = Grid::from_reels([[TEN; 3]; 5]);
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..5_000 {
            if let Some(outcome) = roll_lucky_wood(&grid, &catalog, &mut rng) {
                assert_eq!(grid, Grid::from_reels([[TEN; 3]; 5]));
                match outcome.transform {
                    LuckyWoodTransform::MysterySymbol { symbol, cells } => {
                        assert!((2..=5).contains(&cells));
                        assert_eq!(outcome.multiplier, 2.0);
                        let rewritten = outcome
                            .grid
                            .cells()
                            .iter()
                            .filter(|&&c| c != TEN)
                            .count();
                        // Every rewritten cell holds the mystery symbol
                        // (unless it drew TEN, in which case nothing changes).
                        if symbol != TEN {
                            assert_eq!(rewritten, cells as usize);
                        }
                    }
                    LuckyWoodTransform::WildReel { reel } => {
                        assert_eq!(outcome.multiplier, 3.0);
                        assert_eq!(outcome.grid.reel(reel as usize), &[WILD; 3]);
                    }
                    LuckyWoodTransform::SymbolUpgrade => {
                        assert_eq!(outcome.multiplier, 1.5);
                        assert!(outcome.grid.cells().iter().all(|&c| c == JACK));
                    }
                }
            }
        }
    }
}
