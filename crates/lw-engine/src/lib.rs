//! # lw-engine — Lucky Wood slot engine
//!
//! Deterministic spin evaluation for a 5×3, 20-line video slot: weighted
//! reel draws, payline and scatter matching, payout computation, and the
//! bonus feature passes.
//!
//! ## Architecture
//!
//! ```text
//! SlotEngine
//!     │
//!     ├── SymbolCatalog  (symbols, pays, draw weights)
//!     ├── PaylineCatalog (20 fixed patterns)
//!     └── GameConfig     (grid, bet limits, target RTP)
//!           │
//!           v
//!     SpinContext → SpinResult → features::enhance_free_spin
//! ```
//!
//! All randomness flows through the engine's seeded RNG (or an explicit
//! `Rng` parameter), so any outcome reproduces under a fixed seed.

pub mod config;
pub mod engine;
pub mod features;
pub mod grid;
pub mod paylines;
pub mod spin;
pub mod symbols;

pub use config::*;
pub use engine::*;
pub use grid::*;
pub use paylines::*;
pub use spin::*;
pub use symbols::*;
