//! Aggregate and bulk text functions over the selection.

use gridsheet_engine::engine::{CellAddr, format_number};

use super::state::Session;
use crate::error::{Result, SheetError};

/// Numeric aggregates over the current selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Aggregate {
    Sum,
    Average,
    Max,
    Min,
    Count,
}

impl Aggregate {
    pub fn name(&self) -> &'static str {
        match self {
            Aggregate::Sum => "SUM",
            Aggregate::Average => "AVERAGE",
            Aggregate::Max => "MAX",
            Aggregate::Min => "MIN",
            Aggregate::Count => "COUNT",
        }
    }
}

/// Where an aggregate result ends up.
///
/// `Adjacent` writes it into the cell right of the selection's last
/// column when the selection is wider than tall, else below its last
/// row. `Manual` holds the result for an explicit
/// [`Session::insert_pending_result`] into the active cell. Which one a
/// session uses is an explicit configuration choice, not inferred.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ResultPlacement {
    #[default]
    Manual,
    Adjacent,
}

/// Per-cell text transforms over the current selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextTransform {
    Trim,
    Upper,
    Lower,
}

impl Session {
    /// Compute an aggregate over the current selection and place the
    /// result per the session's [`ResultPlacement`]. The transient
    /// display string is returned either way.
    ///
    /// Coercion rules: non-numeric cells count as 0 for SUM and for
    /// AVERAGE's numerator; MAX/MIN skip them and report "no numeric
    /// values" when nothing numeric was selected; COUNT is the
    /// selection's cardinality regardless of content. AVERAGE divides
    /// by the cardinality, not the numeric-cell count, and shows two
    /// decimals.
    pub fn apply_aggregate(&mut self, aggregate: Aggregate) -> Result<String> {
        let rect = self.selected_rect()?;
        let cells = self.selected()?;
        let values: Vec<String> = cells.iter().map(|&addr| self.display_value(addr)).collect();
        let count = values.len();

        let result = match aggregate {
            Aggregate::Sum => {
                let sum: f64 = values.iter().map(|v| v.parse().unwrap_or(0.0)).sum();
                format_number(sum)
            }
            Aggregate::Average => {
                let sum: f64 = values.iter().map(|v| v.parse().unwrap_or(0.0)).sum();
                format!("{:.2}", sum / count as f64)
            }
            Aggregate::Max => {
                let max = values
                    .iter()
                    .filter_map(|v| v.parse::<f64>().ok())
                    .fold(f64::NEG_INFINITY, f64::max);
                if max == f64::NEG_INFINITY {
                    "no numeric values".to_string()
                } else {
                    format_number(max)
                }
            }
            Aggregate::Min => {
                let min = values
                    .iter()
                    .filter_map(|v| v.parse::<f64>().ok())
                    .fold(f64::INFINITY, f64::min);
                if min == f64::INFINITY {
                    "no numeric values".to_string()
                } else {
                    format_number(min)
                }
            }
            Aggregate::Count => count.to_string(),
        };

        match self.aggregate_placement {
            ResultPlacement::Adjacent => {
                // Right of the last column for wide selections, below
                // the last row otherwise; skipped silently at the edge.
                let target = if rect.width() > rect.height() {
                    CellAddr::new(rect.min_row, rect.max_col + 1)
                } else {
                    CellAddr::new(rect.max_row + 1, rect.min_col)
                };
                if self.grid.contains(target) {
                    self.checkpoint();
                    self.grid.set(target, result.clone())?;
                    self.commit();
                }
            }
            ResultPlacement::Manual => {
                self.pending_result = Some(result.clone());
            }
        }

        Ok(result)
    }

    /// Write the held aggregate result into the selection's active
    /// cell. Consumes the pending result.
    pub fn insert_pending_result(&mut self) -> Result<()> {
        let result = self
            .pending_result
            .take()
            .ok_or(SheetError::NoPendingResult)?;
        let target = self
            .selection
            .active_cell()
            .ok_or(SheetError::EmptySelection)?;
        self.set_cell(target, result)
    }

    /// Apply a text transform to every selected cell in place.
    pub fn apply_text_transform(&mut self, transform: TextTransform) -> Result<()> {
        let cells = self.selected()?;
        self.checkpoint();
        for addr in cells {
            let Some(raw) = self.grid.get(addr) else {
                continue; // stale address after a structural shrink
            };
            let replaced = match transform {
                TextTransform::Trim => raw.trim().to_string(),
                TextTransform::Upper => raw.to_uppercase(),
                TextTransform::Lower => raw.to_lowercase(),
            };
            self.grid.set(addr, replaced)?;
        }
        self.commit();
        Ok(())
    }

    /// Replace every literal occurrence of `query` in each selected
    /// cell. Returns the number of cells whose content changed; a cell
    /// counts once regardless of how many occurrences it held. No
    /// history entry is pushed when nothing changes.
    pub fn find_and_replace(&mut self, query: &str, replacement: &str) -> Result<usize> {
        let cells = self.selected()?;
        if query.is_empty() {
            return Ok(0);
        }

        let mut changes = Vec::new();
        for addr in cells {
            if let Some(raw) = self.grid.get(addr)
                && raw.contains(query)
            {
                changes.push((addr, raw.replace(query, replacement)));
            }
        }
        if changes.is_empty() {
            return Ok(0);
        }

        self.checkpoint();
        let changed = changes.len();
        for (addr, value) in changes {
            self.grid.set(addr, value)?;
        }
        self.commit();
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::{Aggregate, ResultPlacement, TextTransform};
    use crate::document::Session;
    use crate::error::SheetError;
    use crate::storage::MemoryStore;
    use gridsheet_engine::engine::CellAddr;

    fn session() -> Session {
        Session::new("doc", Box::new(MemoryStore::new()))
    }

    fn select(s: &mut Session, a: (usize, usize), b: (usize, usize)) {
        s.selection
            .select_rect(CellAddr::new(a.0, a.1), CellAddr::new(b.0, b.1));
    }

    #[test]
    fn test_sum_coerces_non_numeric_to_zero() {
        let mut s = session();
        s.set_cell(CellAddr::new(0, 0), "5").unwrap();
        select(&mut s, (0, 0), (0, 0));
        assert_eq!(s.apply_aggregate(Aggregate::Sum).unwrap(), "5");

        s.set_cell(CellAddr::new(0, 1), "abc").unwrap();
        select(&mut s, (0, 0), (0, 1));
        assert_eq!(s.apply_aggregate(Aggregate::Sum).unwrap(), "5");
    }

    #[test]
    fn test_average_divides_by_cardinality_with_two_decimals() {
        let mut s = session();
        s.set_cell(CellAddr::new(0, 0), "2").unwrap();
        s.set_cell(CellAddr::new(1, 0), "4").unwrap();
        s.set_cell(CellAddr::new(2, 0), "6").unwrap();
        select(&mut s, (0, 0), (2, 0));
        assert_eq!(s.apply_aggregate(Aggregate::Average).unwrap(), "4.00");

        // Non-numeric cell still counts in the divisor.
        s.set_cell(CellAddr::new(3, 0), "abc").unwrap();
        select(&mut s, (0, 0), (3, 0));
        assert_eq!(s.apply_aggregate(Aggregate::Average).unwrap(), "3.00");
    }

    #[test]
    fn test_max_min_over_non_numeric_selection() {
        let mut s = session();
        s.set_cell(CellAddr::new(0, 0), "abc").unwrap();
        select(&mut s, (0, 0), (0, 0));
        assert_eq!(
            s.apply_aggregate(Aggregate::Max).unwrap(),
            "no numeric values"
        );
        assert_eq!(
            s.apply_aggregate(Aggregate::Min).unwrap(),
            "no numeric values"
        );

        s.set_cell(CellAddr::new(0, 1), "-2").unwrap();
        s.set_cell(CellAddr::new(0, 2), "9").unwrap();
        select(&mut s, (0, 0), (0, 2));
        assert_eq!(s.apply_aggregate(Aggregate::Max).unwrap(), "9");
        assert_eq!(s.apply_aggregate(Aggregate::Min).unwrap(), "-2");
    }

    #[test]
    fn test_count_is_cell_count_not_numeric_count() {
        let mut s = session();
        s.set_cell(CellAddr::new(0, 0), "abc").unwrap();
        select(&mut s, (0, 0), (1, 1));
        assert_eq!(s.apply_aggregate(Aggregate::Count).unwrap(), "4");
    }

    #[test]
    fn test_aggregate_reads_evaluated_values() {
        let mut s = session();
        s.set_cell(CellAddr::new(0, 0), "3").unwrap();
        s.set_cell(CellAddr::new(0, 1), "=A1+4").unwrap();
        select(&mut s, (0, 0), (0, 1));
        assert_eq!(s.apply_aggregate(Aggregate::Sum).unwrap(), "10");
    }

    #[test]
    fn test_aggregate_requires_selection() {
        let mut s = session();
        assert!(matches!(
            s.apply_aggregate(Aggregate::Sum),
            Err(SheetError::EmptySelection)
        ));
    }

    #[test]
    fn test_manual_placement_holds_pending_result() {
        let mut s = session();
        s.set_cell(CellAddr::new(0, 0), "5").unwrap();
        select(&mut s, (0, 0), (0, 0));
        s.apply_aggregate(Aggregate::Sum).unwrap();
        assert_eq!(s.pending_result(), Some("5"));

        select(&mut s, (4, 4), (4, 4));
        s.insert_pending_result().unwrap();
        assert_eq!(s.raw_value(CellAddr::new(4, 4)), "5");
        assert_eq!(s.pending_result(), None);
        assert!(matches!(
            s.insert_pending_result(),
            Err(SheetError::NoPendingResult)
        ));
    }

    #[test]
    fn test_adjacent_placement_wide_selection_writes_right() {
        let mut s = session();
        s.aggregate_placement = ResultPlacement::Adjacent;
        s.set_cell(CellAddr::new(0, 0), "1").unwrap();
        s.set_cell(CellAddr::new(0, 1), "2").unwrap();
        select(&mut s, (0, 0), (0, 1)); // 1x2, wider than tall
        s.apply_aggregate(Aggregate::Sum).unwrap();
        assert_eq!(s.raw_value(CellAddr::new(0, 2)), "3");
    }

    #[test]
    fn test_adjacent_placement_tall_selection_writes_below() {
        let mut s = session();
        s.aggregate_placement = ResultPlacement::Adjacent;
        s.set_cell(CellAddr::new(0, 0), "1").unwrap();
        s.set_cell(CellAddr::new(1, 0), "2").unwrap();
        select(&mut s, (0, 0), (1, 0));
        s.apply_aggregate(Aggregate::Sum).unwrap();
        assert_eq!(s.raw_value(CellAddr::new(2, 0)), "3");
    }

    #[test]
    fn test_adjacent_placement_skips_out_of_bounds_target() {
        let mut s = session();
        s.aggregate_placement = ResultPlacement::Adjacent;
        let last_row = s.grid.row_count() - 1;
        s.set_cell(CellAddr::new(last_row, 0), "7").unwrap();
        select(&mut s, (last_row, 0), (last_row, 0));
        let depth_before = s.undo_stack.len();
        let result = s.apply_aggregate(Aggregate::Sum).unwrap();
        assert_eq!(result, "7"); // transient result still reported
        assert_eq!(s.undo_stack.len(), depth_before); // nothing written
    }

    #[test]
    fn test_text_transforms() {
        let mut s = session();
        s.set_cell(CellAddr::new(0, 0), "  Hello  ").unwrap();
        select(&mut s, (0, 0), (0, 0));
        s.apply_text_transform(TextTransform::Trim).unwrap();
        assert_eq!(s.raw_value(CellAddr::new(0, 0)), "Hello");
        s.apply_text_transform(TextTransform::Upper).unwrap();
        assert_eq!(s.raw_value(CellAddr::new(0, 0)), "HELLO");
        s.apply_text_transform(TextTransform::Lower).unwrap();
        assert_eq!(s.raw_value(CellAddr::new(0, 0)), "hello");
    }

    #[test]
    fn test_find_and_replace_counts_cells_once() {
        let mut s = session();
        s.set_cell(CellAddr::new(0, 0), "apple").unwrap();
        s.set_cell(CellAddr::new(0, 1), "banana").unwrap();
        select(&mut s, (0, 0), (0, 1));
        let changed = s.find_and_replace("a", "b").unwrap();
        assert_eq!(changed, 2);
        assert_eq!(s.raw_value(CellAddr::new(0, 0)), "bpple");
        assert_eq!(s.raw_value(CellAddr::new(0, 1)), "bbnbnb");
    }

    #[test]
    fn test_find_and_replace_no_match_pushes_no_history() {
        let mut s = session();
        select(&mut s, (0, 0), (2, 2));
        assert_eq!(s.find_and_replace("zzz", "x").unwrap(), 0);
        assert_eq!(s.find_and_replace("", "x").unwrap(), 0);
        assert!(!s.can_undo());
    }
}
