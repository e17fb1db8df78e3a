//! Session persistence and tabular import/export.
//!
//! The store is consumed through two operations: load a snapshot by
//! document id and save one under it. Saves triggered by mutating
//! commands are best-effort: failures are logged and never roll back
//! the in-memory state, which is the source of truth.

use std::collections::HashMap;

use gridsheet_engine::engine::{CellAddr, Grid};

use super::state::Session;
use crate::error::Result;
use crate::storage::{DocumentSnapshot, DocumentStore, csv};

impl Session {
    /// Open a document by id. A missing id yields the blank default
    /// sheet, eagerly saved under that id so it exists at the store.
    /// Load errors propagate; the session is not created half-loaded.
    pub fn open(doc_id: impl Into<String>, store: Box<dyn DocumentStore>) -> Result<Session> {
        let doc_id = doc_id.into();
        let mut session = Session::new(doc_id.clone(), store);
        match session.store.load(&doc_id)? {
            Some(snapshot) => session.restore(snapshot),
            None => session.persist_best_effort(),
        }
        Ok(session)
    }

    /// Replace grid, name, and styles from a loaded snapshot. History
    /// does not survive a load.
    pub(crate) fn restore(&mut self, snapshot: DocumentSnapshot) {
        self.grid = Grid::from_rows(snapshot.rows);
        if !snapshot.name.is_empty() {
            self.name = snapshot.name;
        }
        self.styles = snapshot
            .styles
            .into_iter()
            .filter_map(|(id, style)| Some((id.parse::<CellAddr>().ok()?, style)))
            .collect();
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.modified = false;
    }

    /// Serialize the current grid, name, and styles.
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            rows: self.grid.rows().to_vec(),
            name: self.name.clone(),
            styles: self
                .styles
                .iter()
                .map(|(addr, style)| (addr.cell_id(), style.clone()))
                .collect::<HashMap<_, _>>(),
        }
    }

    /// Save to the store, surfacing the error to the caller.
    pub fn save(&mut self) -> Result<()> {
        let snapshot = self.snapshot();
        self.store.save(&self.doc_id, &snapshot)?;
        self.modified = false;
        Ok(())
    }

    /// Fire-and-forget save after a mutating command. A store failure
    /// is logged and the in-memory mutation stands.
    pub(crate) fn persist_best_effort(&mut self) {
        let snapshot = self.snapshot();
        if let Err(e) = self.store.save(&self.doc_id, &snapshot) {
            log::warn!("failed to save document {}: {}", self.doc_id, e);
        } else {
            self.modified = false;
        }
    }

    /// Replace the grid with parsed CSV content. Undoable like any
    /// other mutating command.
    pub fn import_csv(&mut self, content: &str) {
        let rows = csv::parse_csv(content);
        self.checkpoint();
        self.grid = Grid::from_rows(rows);
        self.commit();
    }

    /// Export the grid, trimmed to its last non-empty row/column, as
    /// CSV text. Numeric-looking values are emitted bare.
    pub fn export_csv(&self) -> String {
        csv::write_csv(&self.grid)
    }
}
