//! Error types for the Gridsheet core.

use thiserror::Error;

use gridsheet_engine::engine::OutOfBounds;

/// Errors that can occur in a Gridsheet document session.
///
/// Formula errors are deliberately absent: they are value-level
/// (`#REF!` / `#ERROR!` display sentinels) and never cross the
/// evaluator boundary. Undo/redo on an empty stack are no-ops, not
/// errors.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    OutOfBounds(#[from] OutOfBounds),

    #[error("No cells selected")]
    EmptySelection,

    #[error("Clipboard is empty")]
    EmptyClipboard,

    #[error("No aggregate result to insert")]
    NoPendingResult,

    #[error("Document store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;
