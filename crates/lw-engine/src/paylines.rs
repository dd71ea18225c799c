//! Payline catalog and win evaluation

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::symbols::{SymbolCatalog, SymbolId};

/// Minimum run length for a line win
pub const MIN_WIN_LENGTH: u8 = 3;
/// Minimum scatter count for a scatter win
pub const MIN_SCATTER_COUNT: u8 = 3;

/// A payline definition: five grid positions checked left to right.
///
/// Positions are linear grid indices (reel×3 + row). Several shapes revisit
/// the grid centre (position 4), so patterns are stored as explicit position
/// lists rather than one row per reel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payline {
    /// Payline ID (1-based)
    pub id: u8,
    /// Display name
    pub name: String,
    /// The five positions, in scan order
    pub positions: [u8; 5],
    /// Highlight color for presentation
    pub color: String,
}

impl Payline {
    fn new(id: u8, name: &str, positions: [u8; 5], color: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            positions,
            color: color.to_string(),
        }
    }
}

/// The 20 standard Lucky Wood payline patterns
pub fn standard_20_paylines() -> Vec<Payline> {
    vec![
        // Horizontal lines
        Payline::new(1, "Top Line", [0, 3, 6, 9, 12], "#FF6B6B"),
        Payline::new(2, "Middle Line", [1, 4, 7, 10, 13], "#4ECDC4"),
        Payline::new(3, "Bottom Line", [2, 5, 8, 11, 14], "#45B7D1"),
        // Diagonals
        Payline::new(4, "Top-Bottom Diagonal", [0, 4, 8, 10, 12], "#96CEB4"),
        Payline::new(5, "Bottom-Top Diagonal", [2, 4, 6, 10, 14], "#FFEAA7"),
        // V shapes
        Payline::new(6, "V Shape Left", [0, 4, 8, 4, 12], "#DDA0DD"),
        Payline::new(7, "V Shape Right", [2, 4, 6, 4, 14], "#98D8C8"),
        // Inverted V shapes
        Payline::new(8, "Inverted V Left", [1, 3, 6, 9, 13], "#F7DC6F"),
        Payline::new(9, "Inverted V Right", [1, 5, 8, 11, 13], "#BB8FCE"),
        // Zigzags
        Payline::new(10, "Zigzag Up", [2, 3, 8, 9, 14], "#85C1E9"),
        Payline::new(11, "Zigzag Down", [0, 5, 6, 11, 12], "#F8C471"),
        // W and M patterns
        Payline::new(12, "W Pattern", [0, 5, 7, 9, 14], "#82E0AA"),
        Payline::new(13, "M Pattern", [2, 3, 7, 11, 12], "#F1948A"),
        // Complex zigzag
        Payline::new(14, "Complex Zig 1", [1, 3, 8, 11, 13], "#D7BDE2"),
        Payline::new(15, "Complex Zig 2", [1, 5, 6, 9, 13], "#A9DFBF"),
        // Cross patterns
        Payline::new(16, "Cross Left", [2, 4, 6, 4, 12], "#F9E79F"),
        Payline::new(17, "Cross Right", [0, 4, 8, 4, 14], "#AED6F1"),
        // Snake patterns
        Payline::new(18, "Snake Up", [2, 3, 7, 9, 12], "#FADBD8"),
        Payline::new(19, "Snake Down", [0, 5, 7, 11, 14], "#D5F4E6"),
        // Final complex pattern
        Payline::new(20, "Lucky Pattern", [1, 3, 6, 11, 13], "#FFD93D"),
    ]
}

/// Result of scanning one payline for a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEval {
    pub is_win: bool,
    /// Resolved winning symbol (wild only when all five cells are wild)
    pub win_symbol: SymbolId,
    /// Length of the left-anchored run
    pub win_length: u8,
}

/// A win on a single payline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineWin {
    /// Payline ID
    pub payline_id: u8,
    /// The five symbols along the line
    pub symbols: Vec<SymbolId>,
    /// Resolved winning symbol
    pub win_symbol: SymbolId,
    /// Run length
    pub win_length: u8,
    /// Win amount (pay multiplier × bet per line)
    pub payout: f64,
    /// The positions that paid (first `win_length` of the pattern)
    pub positions: Vec<u8>,
}

/// Scatter scan over the whole grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterScan {
    pub is_win: bool,
    pub count: u8,
    pub positions: Vec<u8>,
}

/// The fixed payline catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaylineCatalog {
    paylines: Vec<Payline>,
}

impl PaylineCatalog {
    pub fn standard() -> Self {
        Self {
            paylines: standard_20_paylines(),
        }
    }

    /// Look up a payline by ID
    pub fn get(&self, id: u8) -> Option<&Payline> {
        self.paylines.iter().find(|p| p.id == id)
    }

    /// All paylines in ID order
    pub fn paylines(&self) -> &[Payline] {
        &self.paylines
    }

    pub fn len(&self) -> usize {
        self.paylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paylines.is_empty()
    }

    /// Evaluate every requested payline and collect the winners.
    ///
    /// Unknown payline IDs are skipped. Winners carry only the paid prefix
    /// of the pattern's positions, for downstream highlighting.
    pub fn winning_paylines(
        &self,
        grid: &Grid,
        active_ids: &[u8],
        bet_per_line: f64,
        catalog: &SymbolCatalog,
    ) -> Vec<LineWin> {
        let mut wins = Vec::new();

        for &id in active_ids {
            let Some(payline) = self.get(id) else {
                continue;
            };

            let symbols = payline_symbols(grid, payline);
            let eval = evaluate_line(&symbols, catalog, MIN_WIN_LENGTH);
            if !eval.is_win {
                continue;
            }

            let payout = catalog.pay(eval.win_symbol, eval.win_length) * bet_per_line;
            wins.push(LineWin {
                payline_id: payline.id,
                symbols: symbols.to_vec(),
                win_symbol: eval.win_symbol,
                win_length: eval.win_length,
                payout,
                positions: payline.positions[..eval.win_length as usize].to_vec(),
            });
        }

        wins
    }
}

impl Default for PaylineCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// The symbols along a payline in scan order (EMPTY for unpopulated cells)
pub fn payline_symbols(grid: &Grid, payline: &Payline) -> [SymbolId; 5] {
    let mut symbols = [0; 5];
    for (i, &position) in payline.positions.iter().enumerate() {
        symbols[i] = grid.at_position(position as usize);
    }
    symbols
}

/// Scan a payline's symbols for a left-anchored run.
///
/// The anchor is the first symbol; a wild anchor resolves to the first
/// non-wild symbol on the line (staying wild only if all five are). A cell
/// extends the run when it equals the anchor or either side is wild, and a
/// still-wild anchor adopts the first concrete symbol the run meets.
pub fn evaluate_line(symbols: &[SymbolId; 5], catalog: &SymbolCatalog, min_length: u8) -> LineEval {
    let mut win_symbol = symbols[0];

    if catalog.is_wild(win_symbol) {
        for &s in &symbols[1..] {
            if !catalog.is_wild(s) {
                win_symbol = s;
                break;
            }
        }
    }

    let mut win_length = 1u8;
    for &s in &symbols[1..] {
        if s == win_symbol || catalog.is_wild(s) || catalog.is_wild(win_symbol) {
            if catalog.is_wild(win_symbol) && !catalog.is_wild(s) {
                win_symbol = s;
            }
            win_length += 1;
        } else {
            break;
        }
    }

    LineEval {
        is_win: win_length >= min_length,
        win_symbol,
        win_length,
    }
}

/// Count scatters anywhere on the grid (not payline-restricted)
pub fn check_scatter_win(grid: &Grid, catalog: &SymbolCatalog, min_count: u8) -> ScatterScan {
    let positions = grid.positions_where(|id| catalog.is_scatter(id));
    let count = positions.len() as u8;
    ScatterScan {
        is_win: count >= min_count,
        count,
        positions,
    }
}
