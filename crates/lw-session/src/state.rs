//! Session state and the spin reducer

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use lw_engine::{GameConfig, Grid, SpinContext, SpinResult, SymbolCatalog, check_bonus_features};

use crate::error::BetError;

/// Spin history cap (most-recent-first)
pub const HISTORY_CAP: usize = 100;

/// Starting balance
pub const DEFAULT_BALANCE: f64 = 1000.0;
/// Starting bet per line
pub const DEFAULT_BET_PER_LINE: f64 = 0.05;
/// Starting payline count
pub const DEFAULT_PAYLINES: u8 = 20;

/// Autoplay sub-state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AutoPlayState {
    pub enabled: bool,
    pub spins_remaining: u32,
    pub stop_on_win: bool,
    /// Stop once balance reaches this target (0 disables the check)
    pub stop_on_balance: f64,
}

/// The whole session: balance, bet configuration, free-spin counters,
/// bounded result history, autoplay.
///
/// Mutated only by the pure [`SessionState::apply_spin`] reducer and the
/// explicit configuration actions; the driving loop owns the single live
/// instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub balance: f64,
    pub total_bet: f64,
    pub bet_per_line: f64,
    pub active_paylines: u8,
    /// Last spin's grid (empty before the first spin)
    pub current_grid: Grid,
    pub is_spinning: bool,
    pub last_win: f64,
    pub free_spins_remaining: u32,
    pub bonus_multiplier: f64,
    /// Past results, most recent first, capped at [`HISTORY_CAP`]
    pub history: VecDeque<SpinResult>,
    pub auto_play: AutoPlayState,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            balance: DEFAULT_BALANCE,
            total_bet: calculate_total_bet(DEFAULT_BET_PER_LINE, DEFAULT_PAYLINES),
            bet_per_line: DEFAULT_BET_PER_LINE,
            active_paylines: DEFAULT_PAYLINES,
            current_grid: Grid::empty(),
            is_spinning: false,
            last_win: 0.0,
            free_spins_remaining: 0,
            bonus_multiplier: 1.0,
            history: VecDeque::new(),
            auto_play: AutoPlayState::default(),
        }
    }
}

/// Total bet for a bet-per-line and payline count
pub fn calculate_total_bet(bet_per_line: f64, active_paylines: u8) -> f64 {
    bet_per_line * active_paylines as f64
}

/// Validate a bet configuration against limits and balance.
///
/// Checked in order: per-line minimum, total-bet maximum, balance cover,
/// payline range.
pub fn validate_bet(
    bet_per_line: f64,
    active_paylines: u8,
    balance: f64,
    config: &GameConfig,
) -> Result<(), BetError> {
    let total_bet = calculate_total_bet(bet_per_line, active_paylines);

    if bet_per_line < config.min_bet {
        return Err(BetError::BelowMinimum {
            min: config.min_bet,
        });
    }
    if total_bet > config.max_bet {
        return Err(BetError::AboveMaximum {
            max: config.max_bet,
        });
    }
    if total_bet > balance {
        return Err(BetError::InsufficientBalance);
    }
    if active_paylines < 1 || active_paylines > config.max_paylines {
        return Err(BetError::InvalidPaylineCount {
            max: config.max_paylines,
        });
    }

    Ok(())
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The spin inputs the engine needs from this state
    pub fn spin_context(&self) -> SpinContext {
        SpinContext {
            bet_per_line: self.bet_per_line,
            total_bet: self.total_bet,
            active_paylines: self.active_paylines,
            free_spins_remaining: self.free_spins_remaining,
            bonus_multiplier: self.bonus_multiplier,
        }
    }

    /// Spin cannot start: already running, or the bet is not covered
    pub fn is_spin_disabled(&self) -> bool {
        self.is_spinning || self.balance < self.total_bet || self.total_bet <= 0.0
    }

    /// Fold a spin result into the session: the state transition of one
    /// settled spin.
    ///
    /// Order matters: grid, balance (bet deducted only outside free spins,
    /// payout always credited), last win, free-spin award/decrement,
    /// multiplier, history, autoplay stop conditions.
    pub fn apply_spin(&self, result: &SpinResult, catalog: &SymbolCatalog) -> SessionState {
        let mut next = self.clone();

        next.current_grid = result.grid.clone();

        if self.free_spins_remaining == 0 {
            next.balance -= self.total_bet;
        }
        next.balance += result.total_payout;
        next.last_win = result.total_payout;

        if result.free_spins_triggered {
            // Re-scan the landed grid; awards chain additively and a
            // triggering spin never consumes a free spin in the same step.
            let triggers = check_bonus_features(&result.grid, catalog);
            next.free_spins_remaining += triggers.free_spins_awarded;
            log::debug!(
                "free spins: +{} (now {})",
                triggers.free_spins_awarded,
                next.free_spins_remaining
            );
        } else if next.free_spins_remaining > 0 {
            next.free_spins_remaining -= 1;
        }

        next.bonus_multiplier = result.multiplier;

        next.history.push_front(result.clone());
        next.history.truncate(HISTORY_CAP);

        if next.auto_play.enabled {
            next.auto_play.spins_remaining = next.auto_play.spins_remaining.saturating_sub(1);

            let exhausted = next.auto_play.spins_remaining == 0;
            let stop_on_win = next.auto_play.stop_on_win && result.total_payout > 0.0;
            let balance_reached =
                next.auto_play.stop_on_balance > 0.0 && next.balance >= next.auto_play.stop_on_balance;

            if exhausted || stop_on_win || balance_reached {
                next.auto_play.enabled = false;
                next.auto_play.spins_remaining = 0;
            }
        }

        next
    }

    /// Change the bet per line (clamped to the configured limits) and
    /// recompute the total bet
    pub fn with_bet(&self, bet_per_line: f64, config: &GameConfig) -> SessionState {
        let clamped = bet_per_line.clamp(config.min_bet, config.max_bet);
        let mut next = self.clone();
        next.bet_per_line = clamped;
        next.total_bet = calculate_total_bet(clamped, self.active_paylines);
        next
    }

    /// Change the active payline count (clamped to 1..=max) and recompute
    /// the total bet
    pub fn with_paylines(&self, count: u8, config: &GameConfig) -> SessionState {
        let clamped = count.clamp(1, config.max_paylines);
        let mut next = self.clone();
        next.active_paylines = clamped;
        next.total_bet = calculate_total_bet(self.bet_per_line, clamped);
        next
    }

    /// Raise the bet as high as limits and balance allow
    pub fn with_max_bet(&self, config: &GameConfig) -> SessionState {
        let lines = self.active_paylines.max(1) as f64;
        let max_per_line = (config.max_bet / lines).floor();
        let affordable = self.balance / lines;
        self.with_bet(max_per_line.min(affordable), config)
    }

    /// Flip autoplay: idle → active (seeding the counter) or active → idle
    pub fn with_auto_play_toggled(&self, spins: u32, stop_on_win: bool) -> SessionState {
        let mut next = self.clone();
        if next.auto_play.enabled {
            next.auto_play.enabled = false;
            next.auto_play.spins_remaining = 0;
        } else {
            next.auto_play.enabled = true;
            next.auto_play.spins_remaining = spins;
            next.auto_play.stop_on_win = stop_on_win;
            next.auto_play.stop_on_balance = 0.0;
        }
        next
    }
}
