//! Document session state.
//!
//! All previously-ambient spreadsheet state - the grid, selection,
//! history stacks, clipboard - is owned by a single [`Session`] per
//! open document and passed by reference to command handlers.

use std::collections::HashMap;

use gridsheet_engine::engine::{
    CellAddr, ExpressionEngine, Grid, RhaiExpressionEngine, evaluate_cell,
};

use super::edit::CellEdit;
use super::functions::ResultPlacement;
use crate::selection::SelectionTracker;
use crate::storage::DocumentStore;
use crate::style::CellStyle;

/// Maximum number of undo entries to keep.
pub(crate) const MAX_UNDO_STACK: usize = 100;

/// Extents of a freshly created document.
pub(crate) const DEFAULT_ROWS: usize = 50;
pub(crate) const DEFAULT_COLS: usize = 20;
pub(crate) const DEFAULT_NAME: &str = "Untitled Sheet";

/// Rectangular block captured by copy and replayed by paste.
/// At most one block exists at a time; each copy overwrites it, and
/// paste reads it non-destructively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipboardBlock {
    /// Copied raw values, row-major, height x width.
    pub values: Vec<Vec<String>>,
}

impl ClipboardBlock {
    pub fn height(&self) -> usize {
        self.values.len()
    }

    pub fn width(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }
}

/// UI-agnostic state of one open spreadsheet document.
pub struct Session {
    /// The cell grid; raw text, formulas kept unevaluated.
    pub grid: Grid,
    /// Editable sheet name.
    pub name: String,
    /// Lazily populated per-cell formatting.
    pub styles: HashMap<CellAddr, CellStyle>,
    /// Active selection.
    pub selection: SelectionTracker,
    /// Where aggregate results go (see [`ResultPlacement`]).
    pub aggregate_placement: ResultPlacement,
    /// Whether the session has unsaved-at-the-store mutations. Cleared
    /// on successful save only.
    pub modified: bool,
    /// Document id at the store.
    pub doc_id: String,

    pub(crate) undo_stack: Vec<Grid>,
    pub(crate) redo_stack: Vec<Grid>,
    pub(crate) clipboard: Option<ClipboardBlock>,
    pub(crate) pending_result: Option<String>,
    pub(crate) edit: Option<CellEdit>,
    pub(crate) engine: Box<dyn ExpressionEngine>,
    pub(crate) store: Box<dyn DocumentStore>,
}

impl Session {
    /// Create a session over a blank default-sized grid. Side-effect
    /// free: the store is not written until the first mutation.
    pub fn new(doc_id: impl Into<String>, store: Box<dyn DocumentStore>) -> Session {
        Session {
            grid: Grid::new(DEFAULT_ROWS, DEFAULT_COLS),
            name: DEFAULT_NAME.to_string(),
            styles: HashMap::new(),
            selection: SelectionTracker::new(),
            aggregate_placement: ResultPlacement::default(),
            modified: false,
            doc_id: doc_id.into(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            clipboard: None,
            pending_result: None,
            edit: None,
            engine: Box::new(RhaiExpressionEngine::new()),
            store,
        }
    }

    /// Swap in a different expression backend.
    pub fn with_engine(mut self, engine: Box<dyn ExpressionEngine>) -> Session {
        self.engine = engine;
        self
    }

    /// Evaluated display value of a cell. Recomputed from raw content
    /// on every call; formula errors surface as `#REF!` / `#ERROR!`.
    pub fn display_value(&self, addr: CellAddr) -> String {
        match self.grid.get(addr) {
            Some(raw) => evaluate_cell(raw, &self.grid, self.engine.as_ref()),
            None => String::new(),
        }
    }

    /// Raw text of a cell as typed (formulas keep their leading `=`).
    pub fn raw_value(&self, addr: CellAddr) -> &str {
        self.grid.get(addr).unwrap_or("")
    }

    pub fn clipboard(&self) -> Option<&ClipboardBlock> {
        self.clipboard.as_ref()
    }

    /// Aggregate result held for manual insertion, if any.
    pub fn pending_result(&self) -> Option<&str> {
        self.pending_result.as_deref()
    }
}
