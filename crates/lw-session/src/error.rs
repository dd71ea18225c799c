//! Session error types

use thiserror::Error;

/// Bet validation failure. A rejected bet never mutates session state.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BetError {
    #[error("minimum bet per line is {min}")]
    BelowMinimum { min: f64 },

    #[error("maximum total bet is {max}")]
    AboveMaximum { max: f64 },

    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("active paylines must be between 1 and {max}")]
    InvalidPaylineCount { max: u8 },
}

/// Why a spin request was refused. Refusals are not queued and leave the
/// session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SpinRejection {
    #[error("a spin is already in progress")]
    AlreadySpinning,

    #[error(transparent)]
    Bet(#[from] BetError),
}

/// Result alias for session actions
pub type SessionResult<T> = Result<T, SpinRejection>;
