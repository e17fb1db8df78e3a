//! Rectangular grid storage and structural edits.
//!
//! The grid is a dense, row-major array of raw cell text. Invariants:
//! every row has the same length, and the grid always has at least one
//! row and one column. Row and column counts change only through the
//! structural operations here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::addr::CellAddr;

/// A structural operation addressed a cell outside the grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
pub struct OutOfBounds {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

/// Dense rectangular cell storage. Cell content is raw text; content
/// starting with `=` denotes a formula and is evaluated on read, never
/// rewritten in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Create a blank grid. Zero extents are clamped to 1.
    pub fn new(rows: usize, cols: usize) -> Grid {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Grid {
            rows: vec![vec![String::new(); cols]; rows],
        }
    }

    /// Build a grid from loaded rows. Ragged rows are normalized to the
    /// widest row with empty cells; empty input collapses to a 1x1 grid.
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Grid {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        if rows.is_empty() || width == 0 {
            return Grid::new(1, 1);
        }
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Grid { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows[0].len()
    }

    pub fn contains(&self, addr: CellAddr) -> bool {
        addr.row < self.row_count() && addr.col < self.col_count()
    }

    /// Validate an address against the current extents.
    pub fn check(&self, addr: CellAddr) -> Result<(), OutOfBounds> {
        if self.contains(addr) {
            Ok(())
        } else {
            Err(OutOfBounds {
                row: addr.row,
                col: addr.col,
                rows: self.row_count(),
                cols: self.col_count(),
            })
        }
    }

    /// Raw text of the addressed cell, or None past the extents.
    pub fn get(&self, addr: CellAddr) -> Option<&str> {
        self.rows.get(addr.row)?.get(addr.col).map(String::as_str)
    }

    /// Replace the addressed cell's content. Fails without mutating if
    /// the address is outside the current extents.
    pub fn set(&mut self, addr: CellAddr, value: impl Into<String>) -> Result<(), OutOfBounds> {
        self.check(addr)?;
        self.rows[addr.row][addr.col] = value.into();
        Ok(())
    }

    /// Append one blank row of the current width.
    pub fn insert_row(&mut self) {
        self.rows.push(vec![String::new(); self.col_count()]);
    }

    /// Append one blank column to every row.
    pub fn insert_column(&mut self) {
        for row in &mut self.rows {
            row.push(String::new());
        }
    }

    /// Delete the given rows. Indices are deduplicated and processed in
    /// descending order so earlier deletions do not shift later ones;
    /// out-of-range indices are ignored. Deleting every row collapses
    /// to one blank row of the current width.
    pub fn delete_rows(&mut self, indices: &[usize]) {
        let width = self.col_count();
        for index in descending(indices) {
            if index < self.rows.len() {
                self.rows.remove(index);
            }
        }
        if self.rows.is_empty() {
            self.rows.push(vec![String::new(); width]);
        }
    }

    /// Delete the given columns, symmetric to [`Grid::delete_rows`].
    /// Deleting every column collapses to one blank column.
    pub fn delete_columns(&mut self, indices: &[usize]) {
        for index in descending(indices) {
            if index < self.col_count() {
                for row in &mut self.rows {
                    row.remove(index);
                }
            }
        }
        if self.rows[0].is_empty() {
            for row in &mut self.rows {
                row.push(String::new());
            }
        }
    }

    /// Set each addressed cell to the empty string. Addresses outside
    /// the current extents (stale after a structural shrink) are skipped.
    pub fn clear_cells<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = CellAddr>,
    {
        for addr in cells {
            if self.contains(addr) {
                self.rows[addr.row][addr.col].clear();
            }
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Extents trimmed to the last non-empty row and column, as
    /// (row count, col count). An entirely blank grid yields (0, 0).
    pub fn trimmed_extents(&self) -> (usize, usize) {
        let mut max_row = 0;
        let mut max_col = 0;
        for (r, row) in self.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if !cell.is_empty() {
                    max_row = max_row.max(r + 1);
                    max_col = max_col.max(c + 1);
                }
            }
        }
        (max_row, max_col)
    }
}

/// Distinct indices, largest first.
fn descending(indices: &[usize]) -> Vec<usize> {
    let mut sorted: Vec<usize> = indices.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();
    sorted
}
