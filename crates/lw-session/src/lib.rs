//! # lw-session — Lucky Wood session state machine
//!
//! Owns everything around the spin mathematics: balance and bet
//! configuration, the pure spin reducer, the spinning guard and pacing
//! phases, and the self-rescheduling autoplay driver.
//!
//! ```text
//! SessionController
//!     │
//!     ├── SessionState   (balance, bet, free spins, history, autoplay)
//!     ├── SlotEngine     (lw-engine)
//!     └── PacingConfig   (begin → settle → end delays)
//! ```

pub mod controller;
pub mod error;
pub mod state;
pub mod timing;

pub use controller::*;
pub use error::*;
pub use state::*;
pub use timing::*;

// The engine types a session consumer needs alongside the snapshots.
pub use lw_engine::{GameConfig, SpinResult};
