//! Linear undo/redo over full-grid snapshots.
//!
//! Every mutating command pushes a deep copy of the pre-mutation grid
//! onto the undo stack and clears the redo stack, so there is never a
//! branching timeline. Failed commands are rejected before the
//! checkpoint, so the stacks only ever hold states that were really
//! live. The snapshot-per-command representation is acceptable at the
//! grid sizes this targets; the contract (full-grid snapshot
//! semantics) is what callers may rely on.

use super::state::{MAX_UNDO_STACK, Session};

impl Session {
    /// Record the current grid as an undo point and cut off any redo
    /// branch. Call immediately before mutating, after all validation.
    pub(crate) fn checkpoint(&mut self) {
        self.undo_stack.push(self.grid.clone());
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_UNDO_STACK {
            self.undo_stack.remove(0);
        }
    }

    /// Finish a mutating command: mark modified and replicate to the
    /// store best-effort.
    pub(crate) fn commit(&mut self) {
        self.modified = true;
        self.persist_best_effort();
    }

    /// Restore the most recent undo point. Returns false - with zero
    /// state change - when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.grid, previous);
        self.redo_stack.push(current);
        self.commit();
        true
    }

    /// Re-apply the most recently undone state. Returns false - with
    /// zero state change - when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.grid, next);
        self.undo_stack.push(current);
        self.commit();
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
