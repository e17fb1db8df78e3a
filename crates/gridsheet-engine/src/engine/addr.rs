//! Cell addressing and range algebra.
//!
//! Provides bidirectional conversion between zero-based (row, col)
//! coordinates, canonical cell ids (`"{row}-{col}"`), and
//! spreadsheet-style column letters, plus rectangular range computation
//! from two corner cells.
//!
//! # Examples
//!
//! ```ignore
//! let addr = CellAddr::parse_label("B3").unwrap();
//! assert_eq!(addr.col, 1);  // 0-indexed
//! assert_eq!(addr.row, 2);
//! assert_eq!(addr.cell_id(), "2-1");
//! assert_eq!(addr.label(), "B3");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A cell address by row and column indices (0-indexed).
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellAddr {
    pub row: usize,
    pub col: usize,
}

impl CellAddr {
    pub fn new(row: usize, col: usize) -> CellAddr {
        CellAddr { row, col }
    }

    /// Canonical string key used in maps and serialized snapshots.
    pub fn cell_id(&self) -> String {
        format!("{}-{}", self.row, self.col)
    }

    /// A1-style label (e.g. `"B3"` = column 1, row 2).
    pub fn label(&self) -> String {
        format!("{}{}", column_label(self.col), self.row + 1)
    }

    /// Parse an address from A1 notation (e.g. "A1", "B2", "AA10").
    /// Returns None if the input is invalid.
    pub fn parse_label(name: &str) -> Option<CellAddr> {
        let split = name.find(|c: char| c.is_ascii_digit())?;
        let (letters, digits) = name.split_at(split);
        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_uppercase()) {
            return None;
        }
        let col = parse_column(letters)?;
        let row = digits.parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellAddr::new(row, col))
    }
}

impl std::str::FromStr for CellAddr {
    type Err = String;

    /// Parse the canonical `"{row}-{col}"` cell id form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || format!("Invalid cell id: {}", s);
        let (row, col) = s.split_once('-').ok_or_else(err)?;
        let row = row.parse::<usize>().map_err(|_| err())?;
        let col = col.parse::<usize>().map_err(|_| err())?;
        Ok(CellAddr::new(row, col))
    }
}

impl fmt::Display for CellAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// Convert a column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
/// Bijective base-26: there is no zero digit.
pub fn column_label(col: usize) -> String {
    let mut result = String::new();
    let mut n = col as u128 + 1;
    while n > 0 {
        n -= 1;
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    result
}

/// Convert column letters back to a 0-indexed column (A -> 0, Z -> 25, AA -> 26).
/// Returns None on empty input, non-letter characters, or overflow.
pub fn parse_column(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut acc = 0usize;
    for c in letters.bytes() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() - b'A') as usize + 1;
        acc = acc.checked_mul(26)?.checked_add(digit)?;
    }
    acc.checked_sub(1)
}

/// All cells in the inclusive rectangle spanned by two corners.
/// Corner order is irrelevant; the rectangle is normalized per axis.
pub fn range_between(a: CellAddr, b: CellAddr) -> HashSet<CellAddr> {
    let mut range = HashSet::new();
    for row in a.row.min(b.row)..=a.row.max(b.row) {
        for col in a.col.min(b.col)..=a.col.max(b.col) {
            range.insert(CellAddr::new(row, col));
        }
    }
    range
}

/// Bounding rectangle of a set of cell addresses (inclusive extents).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SelectionRect {
    pub min_row: usize,
    pub min_col: usize,
    pub max_row: usize,
    pub max_col: usize,
}

impl SelectionRect {
    /// Compute the bounding rectangle of a non-empty set of cells.
    /// Returns None for an empty set.
    pub fn bounding(cells: &HashSet<CellAddr>) -> Option<SelectionRect> {
        let mut iter = cells.iter();
        let first = iter.next()?;
        let mut rect = SelectionRect {
            min_row: first.row,
            min_col: first.col,
            max_row: first.row,
            max_col: first.col,
        };
        for addr in iter {
            rect.min_row = rect.min_row.min(addr.row);
            rect.min_col = rect.min_col.min(addr.col);
            rect.max_row = rect.max_row.max(addr.row);
            rect.max_col = rect.max_col.max(addr.col);
        }
        Some(rect)
    }

    pub fn top_left(&self) -> CellAddr {
        CellAddr::new(self.min_row, self.min_col)
    }

    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }
}

#[cfg(test)]
mod tests {
    use super::{CellAddr, SelectionRect, column_label, parse_column, range_between};

    #[test]
    fn test_cell_id_roundtrip() {
        for (row, col) in [(0, 0), (2, 1), (49, 19), (1000, 702)] {
            let addr = CellAddr::new(row, col);
            let parsed: CellAddr = addr.cell_id().parse().unwrap();
            assert_eq!(parsed, addr);
        }
    }

    #[test]
    fn test_cell_id_rejects_garbage() {
        assert!("".parse::<CellAddr>().is_err());
        assert!("3".parse::<CellAddr>().is_err());
        assert!("a-b".parse::<CellAddr>().is_err());
        assert!("1-2-3".parse::<CellAddr>().is_err());
    }

    #[test]
    fn test_column_label_sequence() {
        let labels: Vec<String> = (0..28).map(column_label).collect();
        assert_eq!(labels[0], "A");
        assert_eq!(labels[25], "Z");
        assert_eq!(labels[26], "AA");
        assert_eq!(labels[27], "AB");
    }

    #[test]
    fn test_parse_column_inverts_label() {
        for col in [0, 1, 25, 26, 27, 51, 52, 701, 702, 18277] {
            assert_eq!(parse_column(&column_label(col)), Some(col));
        }
    }

    #[test]
    fn test_parse_label_b3() {
        let addr = CellAddr::parse_label("B3").unwrap();
        assert_eq!(addr.col, 1);
        assert_eq!(addr.row, 2);
        assert_eq!(addr.label(), "B3");
    }

    #[test]
    fn test_parse_label_overflow_returns_none() {
        let huge = format!("{}1", "Z".repeat(40));
        assert!(CellAddr::parse_label(&huge).is_none());
    }

    #[test]
    fn test_parse_label_rejects_row_zero() {
        assert!(CellAddr::parse_label("A0").is_none());
    }

    #[test]
    fn test_range_between_corner_order_irrelevant() {
        let a = CellAddr::new(0, 0);
        let b = CellAddr::new(2, 1);
        let forward = range_between(a, b);
        let backward = range_between(b, a);
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 6); // 3 rows x 2 cols
        assert!(forward.contains(&CellAddr::new(1, 1)));
    }

    #[test]
    fn test_range_between_single_cell() {
        let a = CellAddr::new(3, 4);
        let range = range_between(a, a);
        assert_eq!(range.len(), 1);
        assert!(range.contains(&a));
    }

    #[test]
    fn test_bounding_rect() {
        let range = range_between(CellAddr::new(1, 2), CellAddr::new(3, 4));
        let rect = SelectionRect::bounding(&range).unwrap();
        assert_eq!(rect.top_left(), CellAddr::new(1, 2));
        assert_eq!(rect.height(), 3);
        assert_eq!(rect.width(), 3);

        assert!(SelectionRect::bounding(&Default::default()).is_none());
    }
}
