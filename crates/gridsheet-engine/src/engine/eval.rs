//! Formula evaluation by cell-reference substitution.
//!
//! A formula is any cell whose raw text starts with `=`. Reference
//! tokens in A1 notation are replaced with the referenced cell's raw
//! stored text (no recursive evaluation - a reference to another
//! formula cell splices that cell's unevaluated text), and the result
//! is handed to the injected [`ExpressionEngine`]. Nothing is cached:
//! every display read re-evaluates, so edits to referenced cells are
//! reflected on the next read without a dependency graph.

use regex::Regex;
use rhai::Engine;
use std::fmt;
use thiserror::Error;

use super::addr::{CellAddr, parse_column};
use super::format::format_number;
use super::grid::Grid;

/// Display sentinel for a reference outside the grid extents.
pub const REF_ERROR: &str = "#REF!";
/// Display sentinel for an expression the engine could not evaluate.
pub const EVAL_ERROR: &str = "#ERROR!";

/// Opaque failure from the expression engine.
#[derive(Error, Debug, Clone)]
#[error("expression evaluation failed: {0}")]
pub struct EvalError(pub String);

/// Result of evaluating an expression: a number or a string.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// The arithmetic/string expression grammar is an external collaborator's
/// contract: one method, evaluating an expression with no cell references
/// left in it. Injected so reference substitution stays independently
/// testable from the arithmetic backend.
pub trait ExpressionEngine: Send + Sync {
    fn evaluate(&self, expr: &str) -> Result<Value, EvalError>;
}

/// Default [`ExpressionEngine`] backed by a Rhai engine in expression
/// mode (no statements, no side effects).
pub struct RhaiExpressionEngine {
    engine: Engine,
}

impl RhaiExpressionEngine {
    pub fn new() -> RhaiExpressionEngine {
        RhaiExpressionEngine {
            engine: Engine::new(),
        }
    }
}

impl Default for RhaiExpressionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionEngine for RhaiExpressionEngine {
    fn evaluate(&self, expr: &str) -> Result<Value, EvalError> {
        let value: rhai::Dynamic = self
            .engine
            .eval_expression(expr)
            .map_err(|e| EvalError(e.to_string()))?;
        if let Ok(n) = value.as_float() {
            Ok(Value::Number(n))
        } else if let Ok(n) = value.as_int() {
            Ok(Value::Number(n as f64))
        } else if let Ok(b) = value.as_bool() {
            Ok(Value::Text(if b { "TRUE" } else { "FALSE" }.to_string()))
        } else if value.is_unit() {
            Ok(Value::Text(String::new()))
        } else if let Ok(s) = value.into_string() {
            Ok(Value::Text(s))
        } else {
            Err(EvalError("unsupported expression result type".to_string()))
        }
    }
}

/// A formula referenced an address outside the grid extents.
struct RefError;

/// Resolve raw cell text to its display value.
///
/// Non-formula text is returned unchanged. For formulas, all reference
/// tokens are substituted first; any out-of-extent reference aborts the
/// whole evaluation with [`REF_ERROR`] (no partial substitution), and
/// any engine failure yields [`EVAL_ERROR`]. Errors are value-level and
/// never escape past this boundary.
pub fn evaluate_cell(raw: &str, grid: &Grid, engine: &dyn ExpressionEngine) -> String {
    let Some(body) = raw.strip_prefix('=') else {
        return raw.to_string();
    };
    let expr = match substitute_references(body, grid) {
        Ok(expr) => expr,
        Err(RefError) => return REF_ERROR.to_string(),
    };
    match engine.evaluate(&expr) {
        Ok(value) => value.to_string(),
        Err(_) => EVAL_ERROR.to_string(),
    }
}

/// Display value of the addressed cell; empty past the extents.
pub fn display_value(addr: CellAddr, grid: &Grid, engine: &dyn ExpressionEngine) -> String {
    match grid.get(addr) {
        Some(raw) => evaluate_cell(raw, grid, engine),
        None => String::new(),
    }
}

/// Replace every `<letters><digits>` reference token with the raw
/// stored value of the referenced cell.
fn substitute_references(body: &str, grid: &Grid) -> Result<String, RefError> {
    let re = Regex::new(r"([A-Z]+)([0-9]+)").expect("reference pattern is valid");
    let mut out = String::with_capacity(body.len());
    let mut last = 0;
    for caps in re.captures_iter(body) {
        let token = caps.get(0).ok_or(RefError)?;
        let col = parse_column(&caps[1]).ok_or(RefError)?;
        let row = caps[2]
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .ok_or(RefError)?;
        let value = grid.get(CellAddr::new(row, col)).ok_or(RefError)?;
        out.push_str(&body[last..token.start()]);
        out.push_str(value);
        last = token.end();
    }
    out.push_str(&body[last..]);
    Ok(out)
}
