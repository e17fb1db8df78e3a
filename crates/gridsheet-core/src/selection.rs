//! Pointer-driven selection tracking.
//!
//! The tracker holds an anchor/focus pair and derives the active
//! rectangular set of cells from them. It is driven by three pointer
//! events: down on a cell (anchor = focus = that cell), enter over a
//! cell while the button is held (focus moves, range recomputed), and
//! up anywhere - including outside the grid - which always ends the
//! drag. A plain click therefore yields a single-cell range.

use std::collections::HashSet;

use gridsheet_engine::engine::{CellAddr, range_between};

#[derive(Default)]
pub struct SelectionTracker {
    anchor: Option<CellAddr>,
    focus: Option<CellAddr>,
    selecting: bool,
    range: HashSet<CellAddr>,
}

impl SelectionTracker {
    pub fn new() -> SelectionTracker {
        SelectionTracker::default()
    }

    /// Pointer pressed on a cell: start a new selection there.
    pub fn pointer_down(&mut self, addr: CellAddr) {
        self.anchor = Some(addr);
        self.focus = Some(addr);
        self.selecting = true;
        self.recompute();
    }

    /// Pointer moved over a cell. Only extends the selection while the
    /// button is held; stray enter events are ignored, so the pointer
    /// may leave and re-enter the grid freely.
    pub fn pointer_enter(&mut self, addr: CellAddr) {
        if !self.selecting {
            return;
        }
        self.focus = Some(addr);
        self.recompute();
    }

    /// Pointer released, anywhere. The selection itself survives; only
    /// the drag state ends, so the tracker can never stay stuck in a
    /// selecting state after a release outside the grid.
    pub fn pointer_up(&mut self) {
        self.selecting = false;
    }

    /// Programmatic selection of the rectangle between two corners.
    pub fn select_rect(&mut self, a: CellAddr, b: CellAddr) {
        self.anchor = Some(a);
        self.focus = Some(b);
        self.selecting = false;
        self.recompute();
    }

    /// Drop the selection entirely.
    pub fn clear(&mut self) {
        self.anchor = None;
        self.focus = None;
        self.selecting = false;
        self.range.clear();
    }

    fn recompute(&mut self) {
        self.range = match (self.anchor, self.focus) {
            (Some(a), Some(f)) => range_between(a, f),
            _ => HashSet::new(),
        };
    }

    /// The active rectangular set of cells.
    pub fn range(&self) -> &HashSet<CellAddr> {
        &self.range
    }

    /// The anchor cell, i.e. where the selection began.
    pub fn active_cell(&self) -> Option<CellAddr> {
        self.anchor
    }

    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}
