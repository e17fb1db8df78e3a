//! gridsheet-engine - grid model, cell addressing, and formula evaluation.

pub mod engine;

pub use engine::{CellAddr, EvalError, ExpressionEngine, Grid, OutOfBounds, Value};
