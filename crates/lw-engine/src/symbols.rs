//! Symbol catalog and weighted reel draws

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Symbol identifier. `0` is reserved for an empty (not yet populated) cell.
pub type SymbolId = u32;

/// Empty grid cell (before the first spin)
pub const EMPTY: SymbolId = 0;

pub const WILD: SymbolId = 1;
pub const SCATTER: SymbolId = 2;
pub const BONUS: SymbolId = 3;
pub const LUCKY_CLOVER: SymbolId = 4;
pub const GOLDEN_ACORN: SymbolId = 5;
pub const MAGIC_TREE: SymbolId = 6;
pub const OAK_LEAVES: SymbolId = 7;
pub const PINE_CONE: SymbolId = 8;
pub const WOODEN_LOG: SymbolId = 9;
pub const ACE: SymbolId = 10;
pub const KING: SymbolId = 11;
pub const QUEEN: SymbolId = 12;
pub const JACK: SymbolId = 13;
pub const TEN: SymbolId = 14;

/// Symbol rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Low,
    Medium,
    High,
    Special,
}

/// Symbol role classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolRole {
    /// Regular paying symbol
    Regular,
    /// Wild - substitutes for any regular symbol on a payline
    Wild,
    /// Scatter - pays anywhere on the grid, triggers free spins
    Scatter,
    /// Bonus - triggers the bonus game, never pays on lines
    Bonus,
}

/// A symbol definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    /// Unique symbol ID
    pub id: SymbolId,
    /// Display name (e.g., "Magical Tree Wild")
    pub name: String,
    /// Pay multipliers for 1..5 consecutive matches (index 0 is always 0)
    pub pays: [f64; 5],
    /// Rarity tier
    pub rarity: Rarity,
    /// Symbol role
    pub role: SymbolRole,
}

impl Symbol {
    /// Create a regular symbol
    pub fn regular(id: SymbolId, name: impl Into<String>, rarity: Rarity, pays: [f64; 5]) -> Self {
        Self {
            id,
            name: name.into(),
            pays,
            rarity,
            role: SymbolRole::Regular,
        }
    }

    /// Create a wild symbol
    pub fn wild(id: SymbolId, name: impl Into<String>, pays: [f64; 5]) -> Self {
        Self {
            id,
            name: name.into(),
            pays,
            rarity: Rarity::Special,
            role: SymbolRole::Wild,
        }
    }

    /// Create a scatter symbol
    pub fn scatter(id: SymbolId, name: impl Into<String>, pays: [f64; 5]) -> Self {
        Self {
            id,
            name: name.into(),
            pays,
            rarity: Rarity::Special,
            role: SymbolRole::Scatter,
        }
    }

    /// Create a bonus symbol (never pays on lines)
    pub fn bonus(id: SymbolId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            pays: [0.0; 5],
            rarity: Rarity::Special,
            role: SymbolRole::Bonus,
        }
    }

    /// Get the pay multiplier for a match count (zero outside [1, 5])
    pub fn pay(&self, match_count: u8) -> f64 {
        if match_count < 1 || match_count > 5 {
            return 0.0;
        }
        self.pays[match_count as usize - 1]
    }
}

/// The Lucky Wood symbol catalog plus its draw weight table.
///
/// The weight table is kept as an ordered list: the cumulative-weight draw
/// walks it front to back, so a fixed seed reproduces identical grids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolCatalog {
    symbols: Vec<Symbol>,
    /// Draw weights per symbol, in draw order (higher = more frequent)
    weights: Vec<(SymbolId, u32)>,
}

impl SymbolCatalog {
    /// The standard Lucky Wood catalog
    pub fn standard() -> Self {
        let symbols = vec![
            Symbol::wild(WILD, "Magical Tree Wild", [0.0, 0.0, 10.0, 50.0, 200.0]),
            Symbol::scatter(SCATTER, "Golden Coin Scatter", [0.0, 2.0, 5.0, 20.0, 100.0]),
            Symbol::bonus(BONUS, "Treasure Chest Bonus"),
            Symbol::regular(
                LUCKY_CLOVER,
                "Lucky Four-Leaf Clover",
                Rarity::High,
                [0.0, 0.0, 5.0, 25.0, 100.0],
            ),
            Symbol::regular(
                GOLDEN_ACORN,
                "Golden Acorn",
                Rarity::High,
                [0.0, 0.0, 4.0, 20.0, 80.0],
            ),
            Symbol::regular(
                MAGIC_TREE,
                "Ancient Magic Tree",
                Rarity::High,
                [0.0, 0.0, 3.0, 15.0, 60.0],
            ),
            Symbol::regular(
                OAK_LEAVES,
                "Oak Leaves",
                Rarity::Medium,
                [0.0, 0.0, 2.0, 10.0, 40.0],
            ),
            Symbol::regular(
                PINE_CONE,
                "Pine Cone",
                Rarity::Medium,
                [0.0, 0.0, 2.0, 8.0, 30.0],
            ),
            Symbol::regular(
                WOODEN_LOG,
                "Wooden Log",
                Rarity::Medium,
                [0.0, 0.0, 1.0, 6.0, 25.0],
            ),
            Symbol::regular(ACE, "Ace", Rarity::Low, [0.0, 0.0, 1.0, 5.0, 20.0]),
            Symbol::regular(KING, "King", Rarity::Low, [0.0, 0.0, 1.0, 4.0, 15.0]),
            Symbol::regular(QUEEN, "Queen", Rarity::Low, [0.0, 0.0, 1.0, 3.0, 12.0]),
            Symbol::regular(JACK, "Jack", Rarity::Low, [0.0, 0.0, 0.0, 2.0, 10.0]),
            Symbol::regular(TEN, "Ten", Rarity::Low, [0.0, 0.0, 0.0, 2.0, 8.0]),
        ];

        let weights = vec![
            (WILD, 1),
            (SCATTER, 2),
            (BONUS, 1),
            (LUCKY_CLOVER, 3),
            (GOLDEN_ACORN, 4),
            (MAGIC_TREE, 5),
            (OAK_LEAVES, 8),
            (PINE_CONE, 10),
            (WOODEN_LOG, 12),
            (ACE, 15),
            (KING, 18),
            (QUEEN, 20),
            (JACK, 22),
            (TEN, 25),
        ];

        debug_assert!(symbols.iter().all(|s| weights.iter().any(|(id, _)| *id == s.id)));

        Self { symbols, weights }
    }

    /// Get symbol by ID
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.id == id)
    }

    /// All symbols in catalog order
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Pay multiplier for a symbol and match count (zero for unknown IDs)
    pub fn pay(&self, id: SymbolId, match_count: u8) -> f64 {
        self.get(id).map(|s| s.pay(match_count)).unwrap_or(0.0)
    }

    /// Check role (false for unknown IDs)
    pub fn is_wild(&self, id: SymbolId) -> bool {
        self.get(id).is_some_and(|s| s.role == SymbolRole::Wild)
    }

    pub fn is_scatter(&self, id: SymbolId) -> bool {
        self.get(id).is_some_and(|s| s.role == SymbolRole::Scatter)
    }

    pub fn is_bonus(&self, id: SymbolId) -> bool {
        self.get(id).is_some_and(|s| s.role == SymbolRole::Bonus)
    }

    /// All regular-symbol IDs in catalog order
    pub fn regular_ids(&self) -> Vec<SymbolId> {
        self.symbols
            .iter()
            .filter(|s| s.role == SymbolRole::Regular)
            .map(|s| s.id)
            .collect()
    }

    /// Sum of all draw weights
    pub fn total_weight(&self) -> u32 {
        self.weights.iter().map(|(_, w)| w).sum()
    }

    /// Draw one symbol by cumulative weight.
    ///
    /// Samples uniform `r` in `[0, total_weight)` and subtracts entries in
    /// table order until the remainder drops to zero or below.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> SymbolId {
        let total = self.total_weight() as f64;
        let mut remaining = rng.gen_range(0.0..total);

        for (id, weight) in &self.weights {
            remaining -= *weight as f64;
            if remaining <= 0.0 {
                return *id;
            }
        }

        // Unreachable with a well-formed table; the lightest-paying symbol
        // is the safe answer regardless.
        self.weights.last().map(|(id, _)| *id).unwrap_or(EMPTY)
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
