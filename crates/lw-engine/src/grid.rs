//! 5×3 reel grid and position arithmetic

use serde::{Deserialize, Serialize};

use crate::symbols::{EMPTY, SymbolId};

/// Number of reels (columns)
pub const REELS: usize = 5;
/// Visible rows per reel
pub const ROWS: usize = 3;
/// Total grid positions
pub const POSITIONS: usize = REELS * ROWS;

/// Convert a linear position [0, 14] to (reel, row)
pub fn position_to_reel_row(position: usize) -> (usize, usize) {
    (position / ROWS, position % ROWS)
}

/// Convert (reel, row) to a linear position
pub fn reel_row_to_position(reel: usize, row: usize) -> usize {
    reel * ROWS + row
}

/// A 5×3 grid of symbols, linearized as position = reel×3 + row.
///
/// Cells hold [`EMPTY`] until the first spin populates them. Produced fresh
/// on every spin and treated as immutable by evaluation; only the feature
/// passes rewrite cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<SymbolId>,
}

impl Grid {
    /// Empty grid (all cells unset)
    pub fn empty() -> Self {
        Self {
            cells: vec![EMPTY; POSITIONS],
        }
    }

    /// Build a grid by drawing each cell independently, reel by reel
    pub fn generate(mut draw: impl FnMut() -> SymbolId) -> Self {
        let mut cells = Vec::with_capacity(POSITIONS);
        for _reel in 0..REELS {
            for _row in 0..ROWS {
                cells.push(draw());
            }
        }
        Self { cells }
    }

    /// Build from explicit reel columns (test/tooling helper)
    pub fn from_reels(reels: [[SymbolId; ROWS]; REELS]) -> Self {
        let mut cells = Vec::with_capacity(POSITIONS);
        for reel in &reels {
            cells.extend_from_slice(reel);
        }
        Self { cells }
    }

    /// Symbol at a linear position (EMPTY when out of range)
    pub fn at_position(&self, position: usize) -> SymbolId {
        self.cells.get(position).copied().unwrap_or(EMPTY)
    }

    /// Symbol at (reel, row)
    pub fn at(&self, reel: usize, row: usize) -> SymbolId {
        self.at_position(reel_row_to_position(reel, row))
    }

    /// Overwrite a cell
    pub fn set_position(&mut self, position: usize, id: SymbolId) {
        if let Some(cell) = self.cells.get_mut(position) {
            *cell = id;
        }
    }

    /// The three cells of one reel
    pub fn reel(&self, reel: usize) -> &[SymbolId] {
        let start = reel * ROWS;
        &self.cells[start..start + ROWS]
    }

    /// Does a reel contain the given symbol?
    pub fn reel_contains(&self, reel: usize, id: SymbolId) -> bool {
        self.reel(reel).contains(&id)
    }

    /// Overwrite every cell of one reel
    pub fn fill_reel(&mut self, reel: usize, id: SymbolId) {
        for row in 0..ROWS {
            self.set_position(reel_row_to_position(reel, row), id);
        }
    }

    /// All cells in position order
    pub fn cells(&self) -> &[SymbolId] {
        &self.cells
    }

    /// Map every cell through a transform
    pub fn map_cells(&mut self, mut f: impl FnMut(SymbolId) -> SymbolId) {
        for cell in &mut self.cells {
            *cell = f(*cell);
        }
    }

    /// Positions holding a symbol matching the predicate
    pub fn positions_where(&self, mut pred: impl FnMut(SymbolId) -> bool) -> Vec<u8> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &id)| pred(id))
            .map(|(pos, _)| pos as u8)
            .collect()
    }

    /// True until the first spin populates the grid
    pub fn is_unpopulated(&self) -> bool {
        self.cells.iter().all(|&c| c == EMPTY)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}
