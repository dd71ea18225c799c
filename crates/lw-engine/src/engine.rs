//! Slot engine — grid generation and spin evaluation

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::features::free_spins::{SpecialFeatures, enhance_free_spin};
use crate::features::gamble::{GambleChoice, GambleRound, GambleSession, play_gamble_round};
use crate::features::pick_bonus::{PickBonusOutcome, play_pick_bonus};
use crate::grid::Grid;
use crate::paylines::{MIN_SCATTER_COUNT, PaylineCatalog, check_scatter_win};
use crate::spin::{BonusTriggers, ScatterWin, SpinResult};
use crate::symbols::{SCATTER, SymbolCatalog};

/// Per-spin inputs from the owning session
#[derive(Debug, Clone, Copy)]
pub struct SpinContext {
    /// Bet per active payline
    pub bet_per_line: f64,
    /// Total bet (bet per line × active paylines)
    pub total_bet: f64,
    /// Active paylines (always the first N by ID)
    pub active_paylines: u8,
    /// Free spins remaining at spin start
    pub free_spins_remaining: u32,
    /// Multiplier carried by the session
    pub bonus_multiplier: f64,
}

/// Escalating multiplier applied while free spins are running.
/// Grows as the feature nears its end.
pub fn free_spin_step_multiplier(spins_remaining: u32) -> f64 {
    if spins_remaining > 15 {
        2.0
    } else if spins_remaining > 10 {
        3.0
    } else if spins_remaining > 5 {
        4.0
    } else {
        5.0
    }
}

/// Flat RTP haircut, applied once after all multipliers.
/// Floors to whole credits, matching the long-run payout model.
pub fn adjust_for_rtp(payout: f64, rtp: f64) -> f64 {
    (payout * rtp / 100.0).floor()
}

/// Scan a grid for bonus triggers: 3+ scatters award free spins
/// (10/15/20 for exactly 3/4/5, 10 for any other count ≥ 3) and 3+ bonus
/// symbols trigger the bonus game.
pub fn check_bonus_features(grid: &Grid, catalog: &SymbolCatalog) -> BonusTriggers {
    let mut scatter_count = 0u8;
    let mut bonus_count = 0u8;

    for &cell in grid.cells() {
        if catalog.is_scatter(cell) {
            scatter_count += 1;
        }
        if catalog.is_bonus(cell) {
            bonus_count += 1;
        }
    }

    let free_spins_triggered = scatter_count >= 3;
    let free_spins_awarded = if free_spins_triggered {
        match scatter_count {
            3 => 10,
            4 => 15,
            5 => 20,
            _ => 10,
        }
    } else {
        0
    };

    BonusTriggers {
        free_spins_triggered,
        bonus_game_triggered: bonus_count >= 3,
        free_spins_awarded,
    }
}

/// Draw a lucky multiplier from the weighted table
/// (2×/3×/5×/10× at 40/30/20/10 percent).
pub fn random_lucky_multiplier<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    const TABLE: [(u32, f64); 4] = [(2, 40.0), (3, 30.0), (5, 20.0), (10, 10.0)];

    let roll = rng.gen_range(0.0..100.0);
    let mut cumulative = 0.0;
    for (value, weight) in TABLE {
        cumulative += weight;
        if roll <= cumulative {
            return value;
        }
    }
    TABLE[0].0
}

/// Running session statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub total_bet: f64,
    pub total_win: f64,
    pub wins: u64,
    pub losses: u64,
    pub free_spin_triggers: u64,
    pub bonus_triggers: u64,
    pub max_win: f64,
}

impl SessionStats {
    /// Measured RTP (%)
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0.0 {
            (self.total_win / self.total_bet) * 100.0
        } else {
            0.0
        }
    }

    /// Measured hit rate (%)
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Lucky Wood slot engine.
///
/// Owns the catalogs and a seeded RNG; evaluation itself is split into a
/// pure layer (`evaluate_grid`) so tests can drive it with constructed
/// grids.
pub struct SlotEngine {
    config: GameConfig,
    catalog: SymbolCatalog,
    paylines: PaylineCatalog,
    rng: StdRng,
    stats: SessionStats,
    spin_count: u64,
}

impl SlotEngine {
    /// Create with the standard configuration
    pub fn new() -> Self {
        Self::with_config(GameConfig::standard())
    }

    /// Create with a specific configuration
    pub fn with_config(config: GameConfig) -> Self {
        Self {
            config,
            catalog: SymbolCatalog::standard(),
            paylines: PaylineCatalog::standard(),
            rng: StdRng::from_entropy(),
            stats: SessionStats::default(),
            spin_count: 0,
        }
    }

    /// Seed the RNG for reproducible results
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    pub fn paylines(&self) -> &PaylineCatalog {
        &self.paylines
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SessionStats::default();
        self.spin_count = 0;
    }

    /// Draw a fresh grid: 15 independent weighted draws, reel by reel.
    /// No reel strips, no de-duplication, no near-miss shaping.
    pub fn generate_grid(&mut self) -> Grid {
        let catalog = &self.catalog;
        let rng = &mut self.rng;
        Grid::generate(|| catalog.draw(rng))
    }

    /// Evaluate a landed grid against the session's bet configuration.
    ///
    /// Deterministic: line wins on paylines 1..N, scatter payout on the
    /// total bet, trigger scan, free-spin escalation multiplier, then the
    /// RTP haircut, in that order.
    pub fn evaluate_grid(&self, grid: &Grid, ctx: &SpinContext) -> SpinResult {
        let active: Vec<u8> = (1..=ctx.active_paylines).collect();
        let line_wins =
            self.paylines
                .winning_paylines(grid, &active, ctx.bet_per_line, &self.catalog);

        let scatter_scan = check_scatter_win(grid, &self.catalog, MIN_SCATTER_COUNT);
        let scatter_win = scatter_scan.is_win.then(|| ScatterWin {
            count: scatter_scan.count,
            positions: scatter_scan.positions.clone(),
            payout: self.catalog.pay(SCATTER, scatter_scan.count) * ctx.total_bet,
        });

        let triggers = check_bonus_features(grid, &self.catalog);

        let mut total_payout: f64 = line_wins.iter().map(|w| w.payout).sum();
        if let Some(ref sw) = scatter_win {
            total_payout += sw.payout;
        }

        let multiplier = if ctx.free_spins_remaining > 0 {
            let m = free_spin_step_multiplier(ctx.free_spins_remaining);
            total_payout *= m;
            m
        } else {
            ctx.bonus_multiplier
        };

        total_payout = adjust_for_rtp(total_payout, self.config.rtp);

        SpinResult {
            grid: grid.clone(),
            line_wins,
            scatter_win,
            bonus_triggered: triggers.bonus_game_triggered,
            free_spins_triggered: triggers.free_spins_triggered,
            total_payout,
            multiplier,
        }
    }

    /// Execute a full spin: draw a grid and evaluate it
    pub fn execute_spin(&mut self, ctx: &SpinContext) -> SpinResult {
        self.spin_count += 1;
        let grid = self.generate_grid();
        let result = self.evaluate_grid(&grid, ctx);

        if result.free_spins_triggered || result.bonus_triggered {
            log::debug!(
                "spin {}: feature trigger (free_spins={}, bonus={})",
                self.spin_count,
                result.free_spins_triggered,
                result.bonus_triggered
            );
        }

        self.update_stats(&result, ctx.total_bet, ctx.free_spins_remaining > 0);
        result
    }

    /// Free-spin enhancement pass over an evaluated result
    pub fn enhance_free_spin(
        &mut self,
        spins_remaining: u32,
        result: SpinResult,
    ) -> (SpinResult, SpecialFeatures) {
        enhance_free_spin(spins_remaining, result, &self.catalog, &mut self.rng)
    }

    /// Play the pick-style bonus game for a base win
    pub fn play_pick_bonus(&mut self, base_win: f64) -> PickBonusOutcome {
        play_pick_bonus(base_win, &mut self.rng)
    }

    /// Play one gamble round against the engine's RNG
    pub fn play_gamble_round(
        &mut self,
        session: &mut GambleSession,
        choice: GambleChoice,
    ) -> GambleRound {
        play_gamble_round(session, choice, &mut self.rng)
    }

    fn update_stats(&mut self, result: &SpinResult, total_bet: f64, was_free_spin: bool) {
        self.stats.total_spins += 1;
        if !was_free_spin {
            self.stats.total_bet += total_bet;
        }
        self.stats.total_win += result.total_payout;

        if result.is_win() {
            self.stats.wins += 1;
        } else {
            self.stats.losses += 1;
        }

        if result.free_spins_triggered {
            self.stats.free_spin_triggers += 1;
        }
        if result.bonus_triggered {
            self.stats.bonus_triggers += 1;
        }
        if result.total_payout > self.stats.max_win {
            self.stats.max_win = result.total_payout;
        }
    }
}

impl Default for SlotEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{BONUS, KING, OAK_LEAVES, QUEEN, SCATTER, TEN};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn base_ctx() -> SpinContext {
        SpinContext {
            bet_per_line: 0.05,
            total_bet: 1.0,
            active_paylines: 20,
            free_spins_remaining: 0,
            bonus_multiplier: 1.0,
        }
    }

    // A grid with no line runs, no scatters, no bonus symbols.
    fn losing_grid() -> Grid {
        // Reels 0-2 carry pairwise different symbols, so no line can
        // reach a 3-run from the left.
        Grid::from_reels([
            [TEN; 3],
            [KING; 3],
            [QUEEN; 3],
            [TEN; 3],
            [KING; 3],
        ])
    }

    #[test]
    fn free_spin_step_multiplier_thresholds() {
        assert_eq!(free_spin_step_multiplier(20), 2.0);
        assert_eq!(free_spin_step_multiplier(16), 2.0);
        assert_eq!(free_spin_step_multiplier(15), 3.0);
        assert_eq!(free_spin_step_multiplier(11), 3.0);
        assert_eq!(free_spin_step_multiplier(10), 4.0);
        assert_eq!(free_spin_step_multiplier(6), 4.0);
        assert_eq!(free_spin_step_multiplier(5), 5.0);
        assert_eq!(free_spin_step_multiplier(1), 5.0);
    }

    #[test]
    fn rtp_adjustment_floors() {
        assert_eq!(adjust_for_rtp(100.0, 96.5), 96.0);
        assert_eq!(adjust_for_rtp(0.5, 96.5), 0.0);
        assert_eq!(adjust_for_rtp(0.0, 96.5), 0.0);
    }

    #[test]
    fn bonus_feature_award_table() {
        let catalog = SymbolCatalog::standard();

        for (scatters, expected) in [(3u8, 10u32), (4, 15), (5, 20), (6, 10), (2, 0)] {
            let mut grid = losing_grid();
            for i in 0..scatters {
                grid.set_position(i as usize, SCATTER);
            }
            let triggers = check_bonus_features(&grid, &catalog);
            assert_eq!(triggers.free_spins_awarded, expected, "{scatters} scatters");
            assert_eq!(triggers.free_spins_triggered, scatters >= 3);
        }
    }

    #[test]
    fn bonus_game_trigger_threshold() {
        let catalog = SymbolCatalog::standard();
        let mut grid = losing_grid();
        grid.set_position(0, BONUS);
        grid.set_position(5, BONUS);
        assert!(!check_bonus_features(&grid, &catalog).bonus_game_triggered);

        grid.set_position(10, BONUS);
        assert!(check_bonus_features(&grid, &catalog).bonus_game_triggered);
    }

    #[test]
    fn losing_grid_pays_nothing() {
        let engine = SlotEngine::new();
        let result = engine.evaluate_grid(&losing_grid(), &base_ctx());

        assert!(!result.is_win());
        assert!(result.line_wins.is_empty());
        assert!(result.scatter_win.is_none());
        assert!(!result.free_spins_triggered);
        assert_eq!(result.total_payout, 0.0);
        assert_eq!(result.multiplier, 1.0);
    }

    #[test]
    fn scatter_pays_on_total_bet() {
        let engine = SlotEngine::new();
        let mut grid = losing_grid();
        // Exactly 4 scatters, spread so no payline carries a 3-run of them:
        // pay 20× total bet before the haircut.
        for pos in [2, 3, 10, 12] {
            grid.set_position(pos, SCATTER);
        }

        let ctx = SpinContext {
            total_bet: 2.0,
            bet_per_line: 0.1,
            ..base_ctx()
        };
        let result = engine.evaluate_grid(&grid, &ctx);
        let scatter = result.scatter_win.expect("scatter win");
        assert_eq!(scatter.count, 4);
        assert!((scatter.payout - 40.0).abs() < 1e-9);
        // floor(40 × 0.965) = 38
        assert_eq!(result.total_payout, 38.0);
        assert!(result.free_spins_triggered);
    }

    #[test]
    fn free_spin_multiplier_applies_before_rtp() {
        let engine = SlotEngine::new();

        // Middle line: five oak leaves pay 40× the 0.05 line bet = 2.0.
        let grid = Grid::from_reels([
            [TEN, OAK_LEAVES, QUEEN],
            [KING, OAK_LEAVES, TEN],
            [QUEEN, OAK_LEAVES, KING],
            [TEN, OAK_LEAVES, QUEEN],
            [KING, OAK_LEAVES, TEN],
        ]);

        let ctx = SpinContext {
            free_spins_remaining: 3,
            ..base_ctx()
        };
        let result = engine.evaluate_grid(&grid, &ctx);
        assert_eq!(result.multiplier, 5.0);
        // floor(2.0 × 5 × 0.965) = floor(9.65) = 9
        assert_eq!(result.total_payout, 9.0);
    }

    #[test]
    fn carried_multiplier_reported_outside_free_spins() {
        let engine = SlotEngine::new();
        let ctx = SpinContext {
            bonus_multiplier: 3.0,
            ..base_ctx()
        };
        let result = engine.evaluate_grid(&losing_grid(), &ctx);
        // The carried multiplier is reported but applies no extra scaling.
        assert_eq!(result.multiplier, 3.0);
        assert_eq!(result.total_payout, 0.0);
    }

    #[test]
    fn seeded_spins_are_reproducible() {
        let ctx = base_ctx();

        let mut a = SlotEngine::new();
        a.seed(1234);
        let mut b = SlotEngine::new();
        b.seed(1234);

        for _ in 0..20 {
            let ra = a.execute_spin(&ctx);
            let rb = b.execute_spin(&ctx);
            assert_eq!(ra.grid, rb.grid);
            assert_eq!(ra.total_payout, rb.total_payout);
        }
    }

    #[test]
    fn stats_accumulate() {
        let mut engine = SlotEngine::new();
        engine.seed(99);
        let ctx = base_ctx();

        for _ in 0..100 {
            engine.execute_spin(&ctx);
        }
        let stats = engine.stats();
        assert_eq!(stats.total_spins, 100);
        assert!((stats.total_bet - 100.0).abs() < 1e-9);
        assert_eq!(stats.wins + stats.losses, 100);
    }

    #[test]
    fn lucky_multiplier_stays_in_table() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let m = random_lucky_multiplier(&mut rng);
            assert!(matches!(m, 2 | 3 | 5 | 10));
        }
    }
}
