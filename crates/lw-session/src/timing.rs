//! Spin pacing profiles
//!
//! The three spin phases (begin, settle, end) are separated by fixed
//! pacing delays so the presentation layer can follow along. The delays
//! are pacing only — phase ordering, not duration, is the contract — and
//! the instant profile zeroes them for tests and batch simulation.

use serde::{Deserialize, Serialize};

/// Pacing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PacingProfile {
    /// Normal gameplay timing
    #[default]
    Normal,
    /// Fast play
    Turbo,
    /// No delays (tests, simulation)
    Instant,
}

/// Pacing delays in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Reel-spin duration before the result settles
    pub spin_duration_ms: u64,
    /// How long the settled result stays displayed before the spin ends
    pub settle_display_ms: u64,
    /// Delay between autoplay spins
    pub autoplay_interval_ms: u64,
}

impl PacingConfig {
    /// Normal gameplay timing
    pub fn normal() -> Self {
        Self {
            spin_duration_ms: 2000,
            settle_display_ms: 1000,
            autoplay_interval_ms: 1500,
        }
    }

    /// Fast play
    pub fn turbo() -> Self {
        Self {
            spin_duration_ms: 600,
            settle_display_ms: 300,
            autoplay_interval_ms: 500,
        }
    }

    /// No delays
    pub fn instant() -> Self {
        Self {
            spin_duration_ms: 0,
            settle_display_ms: 0,
            autoplay_interval_ms: 0,
        }
    }

    pub fn from_profile(profile: PacingProfile) -> Self {
        match profile {
            PacingProfile::Normal => Self::normal(),
            PacingProfile::Turbo => Self::turbo(),
            PacingProfile::Instant => Self::instant(),
        }
    }

    pub fn is_instant(&self) -> bool {
        self.spin_duration_ms == 0 && self.settle_display_ms == 0
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_order_sensibly() {
        let normal = PacingConfig::normal();
        let turbo = PacingConfig::turbo();
        let instant = PacingConfig::instant();

        assert!(turbo.spin_duration_ms < normal.spin_duration_ms);
        assert!(instant.is_instant());
        assert!(!normal.is_instant());
        assert_eq!(PacingConfig::from_profile(PacingProfile::Turbo), turbo);
    }
}
