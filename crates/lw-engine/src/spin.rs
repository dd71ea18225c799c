//! Spin result types

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::paylines::LineWin;

/// Scatter win record (only present when the scatter threshold was met)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterWin {
    /// Number of scatters on the grid
    pub count: u8,
    /// Their positions
    pub positions: Vec<u8>,
    /// Payout (scatter pay × total bet)
    pub payout: f64,
}

/// Bonus-trigger scan of a grid
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BonusTriggers {
    /// 3+ scatters landed
    pub free_spins_triggered: bool,
    /// 3+ bonus symbols landed
    pub bonus_game_triggered: bool,
    /// Free spins awarded (0 when not triggered)
    pub free_spins_awarded: u32,
}

/// Complete outcome of one spin.
///
/// Created once per spin and immutable afterwards; the session reducer and
/// the free-spin enhancement pass consume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    /// The landed grid
    pub grid: Grid,
    /// Winning paylines
    pub line_wins: Vec<LineWin>,
    /// Scatter win, if any
    pub scatter_win: Option<ScatterWin>,
    /// Bonus game triggered this spin
    pub bonus_triggered: bool,
    /// Free spins triggered this spin
    pub free_spins_triggered: bool,
    /// Final payout (all line + scatter wins, multiplied and RTP-adjusted)
    pub total_payout: f64,
    /// Multiplier applied to this spin
    pub multiplier: f64,
}

impl SpinResult {
    /// Did anything pay?
    pub fn is_win(&self) -> bool {
        self.total_payout > 0.0
    }

    /// Win-to-bet ratio
    pub fn win_ratio(&self, total_bet: f64) -> f64 {
        if total_bet > 0.0 {
            self.total_payout / total_bet
        } else {
            0.0
        }
    }
}
