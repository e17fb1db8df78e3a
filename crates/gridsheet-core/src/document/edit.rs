//! In-cell edit buffer.
//!
//! Text typed into a cell is buffered until the edit ends: commit
//! writes it through the command engine (one history entry), Escape
//! cancels and the grid keeps its pre-edit value. This is the only
//! cancellation concept the session has.

use gridsheet_engine::engine::CellAddr;

use super::state::Session;
use crate::error::Result;

/// An in-progress edit of a single cell.
#[derive(Clone, Debug)]
pub struct CellEdit {
    pub addr: CellAddr,
    /// Raw cell text when the edit began.
    pub original: String,
    /// Current buffer contents.
    pub buffer: String,
}

impl Session {
    /// Start editing a cell, capturing its pre-edit value. An
    /// uncommitted previous edit is dropped.
    pub fn begin_edit(&mut self, addr: CellAddr) -> Result<()> {
        self.grid.check(addr)?;
        let original = self.raw_value(addr).to_string();
        self.edit = Some(CellEdit {
            addr,
            buffer: original.clone(),
            original,
        });
        Ok(())
    }

    /// Update the edit buffer. Ignored when no edit is in progress.
    pub fn edit_text(&mut self, text: impl Into<String>) {
        if let Some(edit) = &mut self.edit {
            edit.buffer = text.into();
        }
    }

    /// End the edit and write the buffer to the grid. A buffer equal to
    /// the pre-edit value is dropped without a history entry.
    pub fn commit_edit(&mut self) -> Result<()> {
        let Some(edit) = self.edit.take() else {
            return Ok(());
        };
        if edit.buffer != edit.original {
            self.set_cell(edit.addr, edit.buffer)?;
        }
        Ok(())
    }

    /// Escape: discard the buffer, leaving the cell at its pre-edit
    /// value.
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    pub fn editing(&self) -> Option<&CellEdit> {
        self.edit.as_ref()
    }
}
