//! Spreadsheet engine API.
//!
//! This module provides the computation layer for the spreadsheet:
//!
//! - [`CellAddr`] - Cell addressing (canonical ids, A1 labels, ranges)
//! - [`Grid`] - Rectangular cell storage with structural edits
//! - [`ExpressionEngine`] / [`RhaiExpressionEngine`] - Injected arithmetic backend
//! - [`evaluate_cell`] - Reference substitution and formula evaluation
//! - [`format_number`] - Format values for display

mod addr;
mod eval;
mod format;
mod grid;

pub use addr::{CellAddr, SelectionRect, column_label, parse_column, range_between};
pub use eval::{
    EVAL_ERROR, EvalError, ExpressionEngine, REF_ERROR, RhaiExpressionEngine, Value,
    display_value, evaluate_cell,
};
pub use format::{format_number, looks_numeric};
pub use grid::{Grid, OutOfBounds};
