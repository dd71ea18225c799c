//! Session controller — spin phases, guard, autoplay driver
//!
//! One controller owns one live session. A spin runs as three ordered
//! phases (begin, compute-and-settle, end) behind an atomic guard: at most
//! one spin is ever in flight, and a request arriving mid-spin or with an
//! unaffordable bet is refused with no state change.
//!
//! Autoplay is a self-rescheduling background thread. It waits on a
//! cancellation channel between spins, so disabling autoplay or resetting
//! the session interrupts any pending re-spin immediately instead of
//! letting a stale spin fire afterwards.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use parking_lot::{Mutex, RwLock};

use lw_engine::features::gamble::{GambleChoice, GambleRound, GambleSession};
use lw_engine::features::pick_bonus::PickBonusOutcome;
use lw_engine::{GameConfig, SessionStats, SlotEngine, SpinResult, SymbolCatalog};

use crate::error::{SessionResult, SpinRejection};
use crate::state::{SessionState, validate_bet};
use crate::timing::PacingConfig;

/// Handle to the autoplay driver thread
struct AutoplayDriver {
    cancel: Sender<()>,
    handle: JoinHandle<()>,
}

impl AutoplayDriver {
    /// Cancel any pending re-spin and wait for the driver to exit
    fn stop(self) {
        let _ = self.cancel.send(());
        let _ = self.handle.join();
    }
}

struct ControllerInner {
    config: GameConfig,
    pacing: PacingConfig,
    catalog: SymbolCatalog,
    engine: Mutex<SlotEngine>,
    state: RwLock<SessionState>,
    last_result: RwLock<Option<SpinResult>>,
    spinning: AtomicBool,
    autoplay: Mutex<Option<AutoplayDriver>>,
}

/// Owns a session end to end: state snapshots for the presentation layer,
/// action entry points, and the pacing/guard rules around each spin.
pub struct SessionController {
    inner: Arc<ControllerInner>,
}

impl SessionController {
    /// Create with the standard config and pacing
    pub fn new() -> Self {
        Self::with_config(GameConfig::standard(), PacingConfig::normal())
    }

    /// Create with explicit config and pacing
    pub fn with_config(config: GameConfig, pacing: PacingConfig) -> Self {
        let engine = SlotEngine::with_config(config.clone());
        let catalog = engine.catalog().clone();

        Self {
            inner: Arc::new(ControllerInner {
                config,
                pacing,
                catalog,
                engine: Mutex::new(engine),
                state: RwLock::new(SessionState::default()),
                last_result: RwLock::new(None),
                spinning: AtomicBool::new(false),
                autoplay: Mutex::new(None),
            }),
        }
    }

    /// Seed the engine RNG for reproducible sessions
    pub fn seed(&self, seed: u64) {
        self.inner.engine.lock().seed(seed);
    }

    /// Read-only snapshot of the session
    pub fn state(&self) -> SessionState {
        self.inner.state.read().clone()
    }

    /// The most recent spin result, if any
    pub fn last_result(&self) -> Option<SpinResult> {
        self.inner.last_result.read().clone()
    }

    /// Engine statistics so far
    pub fn stats(&self) -> SessionStats {
        self.inner.engine.lock().stats().clone()
    }

    /// The fixed game configuration
    pub fn config(&self) -> &GameConfig {
        &self.inner.config
    }

    /// Is a spin currently in flight?
    pub fn is_spinning(&self) -> bool {
        self.inner.spinning.load(Ordering::SeqCst)
    }

    /// Run one paced spin (blocks through all three phases)
    pub fn spin(&self) -> SessionResult<SpinResult> {
        self.inner.spin()
    }

    /// Change the bet per line; refused while spinning
    pub fn update_bet(&self, bet_per_line: f64) -> SessionResult<()> {
        self.guarded(|inner| {
            let mut state = inner.state.write();
            let next = state.with_bet(bet_per_line, &inner.config);
            *state = next;
        })
    }

    /// Change the active payline count; refused while spinning
    pub fn update_paylines(&self, count: u8) -> SessionResult<()> {
        self.guarded(|inner| {
            let mut state = inner.state.write();
            let next = state.with_paylines(count, &inner.config);
            *state = next;
        })
    }

    /// Raise the bet to the configured/affordable maximum
    pub fn max_bet(&self) -> SessionResult<()> {
        self.guarded(|inner| {
            let mut state = inner.state.write();
            let next = state.with_max_bet(&inner.config);
            *state = next;
        })
    }

    /// Flip autoplay on or off. Turning it off cancels any pending re-spin.
    pub fn toggle_auto_play(&self, spins: u32, stop_on_win: bool) {
        let mut slot = self.inner.autoplay.lock();
        let enabled = self.inner.state.read().auto_play.enabled;

        if enabled {
            {
                let mut state = self.inner.state.write();
                let next = state.with_auto_play_toggled(spins, stop_on_win);
                *state = next;
            }
            if let Some(driver) = slot.take() {
                driver.stop();
            }
            log::info!("autoplay disabled");
        } else {
            // A driver whose run already ended may still be parked here.
            if let Some(stale) = slot.take() {
                stale.stop();
            }
            {
                let mut state = self.inner.state.write();
                let next = state.with_auto_play_toggled(spins, stop_on_win);
                *state = next;
            }

            let (cancel_tx, cancel_rx) = bounded(1);
            let inner = Arc::clone(&self.inner);
            let interval = self.inner.pacing.autoplay_interval_ms;

            match thread::Builder::new()
                .name("lw-autoplay".into())
                .spawn(move || autoplay_loop(inner, cancel_rx, interval))
            {
                Ok(handle) => {
                    *slot = Some(AutoplayDriver {
                        cancel: cancel_tx,
                        handle,
                    });
                    log::info!("autoplay enabled for {spins} spins");
                }
                Err(err) => {
                    log::error!("failed to start autoplay driver: {err}");
                    let mut state = self.inner.state.write();
                    state.auto_play.enabled = false;
                    state.auto_play.spins_remaining = 0;
                }
            }
        }
    }

    /// Reset the session to its defaults. Cancels autoplay (waiting out any
    /// in-flight autoplay spin) first; refused only if a manual spin is
    /// still running.
    pub fn reset(&self) -> SessionResult<()> {
        if let Some(driver) = self.inner.autoplay.lock().take() {
            driver.stop();
        }

        if self.is_spinning() {
            return Err(SpinRejection::AlreadySpinning);
        }

        *self.inner.state.write() = SessionState::default();
        *self.inner.last_result.write() = None;
        self.inner.engine.lock().reset_stats();
        log::info!("session reset");
        Ok(())
    }

    /// Play the pick-style bonus game for a base win and credit the result
    pub fn play_pick_bonus(&self, base_win: f64) -> PickBonusOutcome {
        self.inner.play_pick_bonus(base_win)
    }

    /// Play one gamble round against the session engine
    pub fn play_gamble_round(
        &self,
        session: &mut GambleSession,
        choice: GambleChoice,
    ) -> GambleRound {
        let round = self.inner.engine.lock().play_gamble_round(session, choice);
        if round.ended {
            let mut state = self.inner.state.write();
            // The staked win was already credited by the spin; settle the
            // difference between the gamble outcome and the stake.
            state.balance += round.new_win - state.last_win;
            state.last_win = round.new_win;
        }
        round
    }

    fn guarded(&self, action: impl FnOnce(&ControllerInner)) -> SessionResult<()> {
        if self.is_spinning() {
            return Err(SpinRejection::AlreadySpinning);
        }
        action(&self.inner);
        Ok(())
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(driver) = self.inner.autoplay.lock().take() {
            driver.stop();
        }
    }
}

impl ControllerInner {
    /// The three spin phases. The atomic guard is the single admission
    /// point; everything after it must clear the guard on every path.
    fn spin(&self) -> SessionResult<SpinResult> {
        if self
            .spinning
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SpinRejection::AlreadySpinning);
        }

        let snapshot = self.state.read().clone();
        if let Err(err) = validate_bet(
            snapshot.bet_per_line,
            snapshot.active_paylines,
            snapshot.balance,
            &self.config,
        ) {
            self.spinning.store(false, Ordering::SeqCst);
            log::warn!("spin rejected: {err}");
            return Err(err.into());
        }

        // Phase 1: begin.
        self.state.write().is_spinning = true;
        self.pause(self.pacing.spin_duration_ms);

        // Phase 2: compute and settle.
        let result = {
            let mut engine = self.engine.lock();
            let result = engine.execute_spin(&snapshot.spin_context());
            if snapshot.free_spins_remaining > 0 {
                let (enhanced, features) =
                    engine.enhance_free_spin(snapshot.free_spins_remaining, result);
                if features.expanding_wilds {
                    log::debug!("expanding wilds applied");
                }
                enhanced
            } else {
                result
            }
        };

        let settled = snapshot.apply_spin(&result, &self.catalog);
        {
            let mut state = self.state.write();
            *state = settled;
            // Still spinning until the result display pause elapses.
            state.is_spinning = true;
        }
        *self.last_result.write() = Some(result.clone());

        // Phase 3: end, after the result has been visible.
        self.pause(self.pacing.settle_display_ms);
        self.state.write().is_spinning = false;
        self.spinning.store(false, Ordering::SeqCst);

        Ok(result)
    }

    /// Play the pick bonus against the session engine, crediting the win
    pub fn play_pick_bonus(&self, base_win: f64) -> PickBonusOutcome {
        let outcome = self.engine.lock().play_pick_bonus(base_win);
        let mut state = self.state.write();
        state.balance += outcome.total_win;
        state.last_win = outcome.total_win;
        outcome
    }

    fn pause(&self, ms: u64) {
        if ms > 0 {
            thread::sleep(Duration::from_millis(ms));
        }
    }
}

/// Autoplay driver loop: wait out the pacing interval (or a cancellation),
/// then spin again while the session still wants it.
fn autoplay_loop(inner: Arc<ControllerInner>, cancel: Receiver<()>, interval_ms: u64) {
    loop {
        match cancel.recv_timeout(Duration::from_millis(interval_ms)) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        if !inner.state.read().auto_play.enabled {
            break;
        }

        match inner.spin() {
            Ok(_) => {}
            Err(SpinRejection::AlreadySpinning) => continue,
            Err(SpinRejection::Bet(err)) => {
                log::warn!("autoplay stopped: {err}");
                let mut state = inner.state.write();
                state.auto_play.enabled = false;
                state.auto_play.spins_remaining = 0;
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BetError;

    fn instant_controller(seed: u64) -> SessionController {
        let controller =
            SessionController::with_config(GameConfig::standard(), PacingConfig::instant());
        controller.seed(seed);
        controller
    }

    #[test]
    fn spin_settles_balance_and_result() {
        let controller = instant_controller(42);
        let before = controller.state().balance;

        let result = controller.spin().expect("spin");
        let state = controller.state();

        assert!(!state.is_spinning);
        assert_eq!(state.last_win, result.total_payout);
        assert_eq!(state.history.len(), 1);
        assert_eq!(controller.last_result().unwrap(), result);
        let expected = before - state.total_bet + result.total_payout;
        assert!((state.balance - expected).abs() < 1e-9);
    }

    #[test]
    fn config_actions_apply_and_validate() {
        let controller = instant_controller(1);

        controller.update_bet(0.5).unwrap();
        assert!((controller.state().total_bet - 10.0).abs() < 1e-9);

        controller.update_paylines(4).unwrap();
        assert!((controller.state().total_bet - 2.0).abs() < 1e-9);

        controller.max_bet().unwrap();
        let state = controller.state();
        assert_eq!(state.bet_per_line, 25.0);
        assert!((state.total_bet - 100.0).abs() < 1e-9);
    }

    #[test]
    fn unaffordable_bet_is_refused_without_state_change() {
        let controller = instant_controller(2);
        // Drain the balance below the bet.
        {
            let mut state = controller.inner.state.write();
            state.balance = 0.5;
        }
        let before = controller.state();

        let err = controller.spin().unwrap_err();
        assert_eq!(err, SpinRejection::Bet(BetError::InsufficientBalance));
        assert_eq!(controller.state(), before);
        assert!(controller.last_result().is_none());
        assert!(!controller.is_spinning());
    }

    #[test]
    fn reset_restores_defaults_idempotently() {
        let controller = instant_controller(3);
        controller.update_bet(1.0).unwrap();
        controller.spin().unwrap();

        controller.reset().unwrap();
        let first = controller.state();
        assert_eq!(first, SessionState::default());
        assert!(controller.last_result().is_none());

        controller.reset().unwrap();
        assert_eq!(controller.state(), first);
    }

    #[test]
    fn pick_bonus_credits_balance() {
        let controller = instant_controller(4);
        let before = controller.state().balance;

        let outcome = controller.play_pick_bonus(10.0);
        let state = controller.state();
        assert!((state.balance - (before + outcome.total_win)).abs() < 1e-9);
        assert_eq!(state.last_win, outcome.total_win);
    }
}
