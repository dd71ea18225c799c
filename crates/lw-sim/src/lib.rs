//! # lw-sim — batch spin simulator
//!
//! Runs many independent seeded sessions through the engine and the
//! session reducer, in parallel, and folds the outcomes into one report.
//! Used to sanity-check the math model: measured RTP, hit rate, feature
//! trigger frequency.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use lw_engine::{GameConfig, SlotEngine, SymbolCatalog};
use lw_session::{SessionState, validate_bet};

/// Simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Independent sessions to run
    pub sessions: u32,
    /// Spins attempted per session (a session stops early when broke)
    pub spins_per_session: u32,
    /// Base RNG seed; session `i` uses `seed + i`
    pub seed: u64,
    /// Bet per line for every session
    pub bet_per_line: f64,
    /// Active paylines for every session
    pub paylines: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sessions: 8,
            spins_per_session: 10_000,
            seed: 1,
            bet_per_line: 0.05,
            paylines: 20,
        }
    }
}

/// Outcome of one simulated session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub spins: u64,
    pub wagered: f64,
    pub won: f64,
    pub wins: u64,
    pub free_spin_triggers: u64,
    pub bonus_triggers: u64,
    pub pick_bonus_won: f64,
    pub max_single_win: f64,
    pub ending_balance: f64,
    /// Session stopped before its spin budget (bet no longer affordable)
    pub went_broke: bool,
}

/// Aggregated report over all sessions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimReport {
    pub sessions: u32,
    pub total_spins: u64,
    pub total_wagered: f64,
    pub total_won: f64,
    /// Measured RTP (%) over paid spins
    pub rtp: f64,
    /// Share of spins that paid anything (%)
    pub hit_rate: f64,
    pub free_spin_triggers: u64,
    pub bonus_triggers: u64,
    pub pick_bonus_won: f64,
    pub max_single_win: f64,
    pub sessions_broke: u32,
    pub mean_ending_balance: f64,
}

/// Run the full simulation, sessions in parallel
pub fn run(config: &SimConfig) -> SimReport {
    let game_config = GameConfig::standard();

    let outcomes: Vec<SessionOutcome> = (0..config.sessions)
        .into_par_iter()
        .map(|index| run_session(config, &game_config, index))
        .collect();

    let mut report = SimReport {
        sessions: config.sessions,
        ..SimReport::default()
    };

    for outcome in &outcomes {
        report.total_spins += outcome.spins;
        report.total_wagered += outcome.wagered;
        report.total_won += outcome.won;
        report.free_spin_triggers += outcome.free_spin_triggers;
        report.bonus_triggers += outcome.bonus_triggers;
        report.pick_bonus_won += outcome.pick_bonus_won;
        report.max_single_win = report.max_single_win.max(outcome.max_single_win);
        report.mean_ending_balance += outcome.ending_balance;
        if outcome.went_broke {
            report.sessions_broke += 1;
        }
    }

    if report.total_wagered > 0.0 {
        report.rtp = report.total_won / report.total_wagered * 100.0;
    }
    if report.total_spins > 0 {
        let wins: u64 = outcomes.iter().map(|o| o.wins).sum();
        report.hit_rate = wins as f64 / report.total_spins as f64 * 100.0;
    }
    if config.sessions > 0 {
        report.mean_ending_balance /= config.sessions as f64;
    }

    log::info!(
        "simulated {} spins across {} sessions: rtp {:.2}%, hit rate {:.2}%",
        report.total_spins,
        report.sessions,
        report.rtp,
        report.hit_rate
    );

    report
}

/// Run one session to its spin budget (or until the bet is unaffordable)
fn run_session(config: &SimConfig, game_config: &GameConfig, index: u32) -> SessionOutcome {
    let catalog = SymbolCatalog::standard();
    let mut engine = SlotEngine::with_config(game_config.clone());
    engine.seed(config.seed + index as u64);

    let mut state = SessionState::default()
        .with_paylines(config.paylines, game_config)
        .with_bet(config.bet_per_line, game_config);

    let mut outcome = SessionOutcome::default();

    for _ in 0..config.spins_per_session {
        if validate_bet(
            state.bet_per_line,
            state.active_paylines,
            state.balance,
            game_config,
        )
        .is_err()
        {
            outcome.went_broke = true;
            break;
        }

        let was_free = state.free_spins_remaining > 0;
        let result = engine.execute_spin(&state.spin_context());
        let result = if was_free {
            let (enhanced, _features) =
                engine.enhance_free_spin(state.free_spins_remaining, result);
            enhanced
        } else {
            result
        };

        outcome.spins += 1;
        if !was_free {
            outcome.wagered += state.total_bet;
        }
        outcome.won += result.total_payout;
        if result.is_win() {
            outcome.wins += 1;
        }
        if result.free_spins_triggered {
            outcome.free_spin_triggers += 1;
        }
        outcome.max_single_win = outcome.max_single_win.max(result.total_payout);

        state = state.apply_spin(&result, &catalog);

        // The bonus game is an external trigger in live play; the simulator
        // plays it immediately and credits the award.
        if result.bonus_triggered {
            outcome.bonus_triggers += 1;
            let base = result.total_payout.max(state.total_bet);
            let bonus = engine.play_pick_bonus(base);
            outcome.pick_bonus_won += bonus.total_win;
            outcome.won += bonus.total_win;
            state.balance += bonus.total_win;
        }
    }

    outcome.ending_balance = state.balance;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(seed: u64) -> SimConfig {
        SimConfig {
            sessions: 4,
            spins_per_session: 500,
            seed,
            ..SimConfig::default()
        }
    }

    #[test]
    fn report_is_reproducible_for_a_seed() {
        let config = small_config(77);
        let a = run(&config);
        let b = run(&config);
        assert_eq!(a.total_spins, b.total_spins);
        assert_eq!(a.total_won, b.total_won);
        assert_eq!(a.free_spin_triggers, b.free_spin_triggers);
    }

    #[test]
    fn report_totals_are_consistent() {
        let report = run(&small_config(5));
        assert_eq!(report.sessions, 4);
        assert!(report.total_spins > 0);
        assert!(report.total_wagered > 0.0);
        assert!(report.hit_rate >= 0.0 && report.hit_rate <= 100.0);
        assert!(report.max_single_win >= 0.0);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = run(&small_config(1));
        let b = run(&small_config(2));
        // Identical outcomes across disjoint seeds would mean the seed is
        // not reaching the engine.
        assert!(
            a.total_won != b.total_won || a.free_spin_triggers != b.free_spin_triggers,
            "seeded runs did not diverge"
        );
    }
}
