//! Document session state and commands (UI-agnostic).

mod edit;
mod functions;
mod history;
mod io;
mod ops;
mod state;

pub use edit::CellEdit;
pub use functions::{Aggregate, ResultPlacement, TextTransform};
pub use state::{ClipboardBlock, Session};
