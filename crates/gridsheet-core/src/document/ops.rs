//! Mutating commands.
//!
//! Every command here goes through the same shape: validate, take a
//! history checkpoint, mutate the grid (and/or style map), commit.
//! Validation failures return before the checkpoint, so the undo stack
//! never records a failed operation.

use std::collections::HashSet;

use gridsheet_engine::engine::{CellAddr, SelectionRect};

use super::state::{ClipboardBlock, Session};
use crate::error::{Result, SheetError};
use crate::style::{CellStyle, FormatKind, TextAlign};

impl Session {
    /// The active selection, or `EmptySelection` if there is none.
    pub(crate) fn selected(&self) -> Result<HashSet<CellAddr>> {
        let range = self.selection.range();
        if range.is_empty() {
            return Err(SheetError::EmptySelection);
        }
        Ok(range.clone())
    }

    pub(crate) fn selected_rect(&self) -> Result<SelectionRect> {
        let range = self.selected()?;
        SelectionRect::bounding(&range).ok_or(SheetError::EmptySelection)
    }

    /// Replace one cell's content. Rejects out-of-extent addresses
    /// without touching grid or history.
    pub fn set_cell(&mut self, addr: CellAddr, value: impl Into<String>) -> Result<()> {
        self.grid.check(addr)?;
        self.checkpoint();
        self.grid.set(addr, value)?;
        self.commit();
        Ok(())
    }

    /// Set every selected cell to the empty string.
    pub fn clear_selection(&mut self) -> Result<()> {
        let cells = self.selected()?;
        self.checkpoint();
        self.grid.clear_cells(cells);
        self.commit();
        Ok(())
    }

    /// Append a blank row at the bottom.
    pub fn add_row(&mut self) {
        self.checkpoint();
        self.grid.insert_row();
        self.commit();
    }

    /// Append a blank column at the right.
    pub fn add_column(&mut self) {
        self.checkpoint();
        self.grid.insert_column();
        self.commit();
    }

    /// Delete every row the selection touches. Deleting all rows leaves
    /// one blank row of the current width.
    pub fn delete_selected_rows(&mut self) -> Result<()> {
        let rows: Vec<usize> = self.selected()?.iter().map(|a| a.row).collect();
        self.checkpoint();
        self.grid.delete_rows(&rows);
        self.commit();
        Ok(())
    }

    /// Delete every column the selection touches, symmetric to
    /// [`Session::delete_selected_rows`].
    pub fn delete_selected_columns(&mut self) -> Result<()> {
        let cols: Vec<usize> = self.selected()?.iter().map(|a| a.col).collect();
        self.checkpoint();
        self.grid.delete_columns(&cols);
        self.commit();
        Ok(())
    }

    /// Replicate the selection's top row into every row below it
    /// within the selection rectangle.
    pub fn fill_down(&mut self) -> Result<()> {
        let rect = self.selected_rect()?;
        self.checkpoint();
        for col in rect.min_col..=rect.max_col {
            let source = self.raw_value(CellAddr::new(rect.min_row, col)).to_string();
            for row in rect.min_row + 1..=rect.max_row {
                let addr = CellAddr::new(row, col);
                if self.grid.contains(addr) {
                    self.grid.set(addr, source.clone())?;
                }
            }
        }
        self.commit();
        Ok(())
    }

    /// Replicate the selection's leftmost column into every column to
    /// its right within the selection rectangle.
    pub fn fill_right(&mut self) -> Result<()> {
        let rect = self.selected_rect()?;
        self.checkpoint();
        for row in rect.min_row..=rect.max_row {
            let source = self.raw_value(CellAddr::new(row, rect.min_col)).to_string();
            for col in rect.min_col + 1..=rect.max_col {
                let addr = CellAddr::new(row, col);
                if self.grid.contains(addr) {
                    self.grid.set(addr, source.clone())?;
                }
            }
        }
        self.commit();
        Ok(())
    }

    /// Flip a boolean format attribute on every selected cell. Style
    /// entries are created lazily on first use.
    pub fn toggle_format(&mut self, kind: FormatKind) -> Result<()> {
        let cells = self.selected()?;
        self.checkpoint();
        for addr in cells {
            self.styles.entry(addr).or_default().toggle(kind);
        }
        self.commit();
        Ok(())
    }

    pub fn set_alignment(&mut self, align: TextAlign) -> Result<()> {
        self.update_styles(|style| style.text_align = align)
    }

    pub fn set_text_color(&mut self, color: &str) -> Result<()> {
        let color = color.to_string();
        self.update_styles(|style| style.color = Some(color.clone()))
    }

    pub fn set_background_color(&mut self, color: &str) -> Result<()> {
        let color = color.to_string();
        self.update_styles(|style| style.background_color = Some(color.clone()))
    }

    /// Reset every selected cell to default formatting.
    pub fn clear_format(&mut self) -> Result<()> {
        let cells = self.selected()?;
        self.checkpoint();
        for addr in cells {
            self.styles.remove(&addr);
        }
        self.commit();
        Ok(())
    }

    fn update_styles(&mut self, mut apply: impl FnMut(&mut CellStyle)) -> Result<()> {
        let cells = self.selected()?;
        self.checkpoint();
        for addr in cells {
            apply(self.styles.entry(addr).or_default());
        }
        self.commit();
        Ok(())
    }

    /// Formatting of a cell; default when no entry exists.
    pub fn style_of(&self, addr: CellAddr) -> CellStyle {
        self.styles.get(&addr).cloned().unwrap_or_default()
    }

    /// Capture the bounding rectangle of the selection into the
    /// clipboard, replacing any previously copied block. Read-only:
    /// no history entry, no persistence.
    pub fn copy(&mut self) -> Result<()> {
        let rect = self.selected_rect()?;
        let mut values = Vec::with_capacity(rect.height());
        for row in rect.min_row..=rect.max_row {
            let mut out = Vec::with_capacity(rect.width());
            for col in rect.min_col..=rect.max_col {
                out.push(self.raw_value(CellAddr::new(row, col)).to_string());
            }
            values.push(out);
        }
        self.clipboard = Some(ClipboardBlock { values });
        Ok(())
    }

    /// Replay the copied block at the top-left of the current
    /// selection, row by row. Destination cells past the grid edge are
    /// clipped silently; the grid never grows on paste. Returns the
    /// number of cells written.
    pub fn paste(&mut self) -> Result<usize> {
        let block = self.clipboard.clone().ok_or(SheetError::EmptyClipboard)?;
        let anchor = self.selected_rect()?.top_left();

        self.checkpoint();
        let mut written = 0;
        for (r, row) in block.values.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                let addr = CellAddr::new(anchor.row + r, anchor.col + c);
                if self.grid.contains(addr) {
                    self.grid.set(addr, value.clone())?;
                    written += 1;
                }
            }
        }
        self.commit();
        Ok(written)
    }

    /// Rename the sheet. The name lives outside the grid, so this does
    /// not touch the history stacks.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.modified = true;
        self.persist_best_effort();
    }
}
