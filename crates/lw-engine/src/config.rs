//! Game configuration

use serde::{Deserialize, Serialize};

/// Fixed game configuration.
///
/// Read-only to the presentation layer; the engine and session validate
/// against it but never mutate it after start-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of reels (columns)
    pub reels: u8,
    /// Visible rows per reel
    pub rows: u8,
    /// Minimum bet per line
    pub min_bet: f64,
    /// Maximum total bet
    pub max_bet: f64,
    /// Maximum selectable paylines
    pub max_paylines: u8,
    /// Target return-to-player percentage
    pub rtp: f64,
}

impl GameConfig {
    /// The standard 5×3, 20-line Lucky Wood setup
    pub fn standard() -> Self {
        Self {
            reels: 5,
            rows: 3,
            min_bet: 0.01,
            max_bet: 100.0,
            max_paylines: 20,
            rtp: 96.5,
        }
    }

    /// Export as pretty-printed JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Import from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Configuration import error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid game config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip() {
        let config = GameConfig::standard();
        let json = config.to_json();
        let restored = GameConfig::from_json(&json).unwrap();
        assert_eq!(restored.reels, 5);
        assert_eq!(restored.max_paylines, 20);
        assert!((restored.rtp - 96.5).abs() < 1e-9);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(GameConfig::from_json("{not json").is_err());
    }
}
