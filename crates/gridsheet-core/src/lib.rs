//! gridsheet-core - UI-agnostic document session + storage.

pub mod document;
pub mod error;
pub mod selection;
pub mod storage;
pub mod style;

pub use document::{Aggregate, CellEdit, ClipboardBlock, ResultPlacement, Session, TextTransform};
pub use error::{Result, SheetError};
pub use selection::SelectionTracker;
pub use storage::{DocumentSnapshot, DocumentStore, JsonFileStore, MemoryStore};
pub use style::{CellStyle, FormatKind, TextAlign};

pub use gridsheet_engine::engine::{CellAddr, Grid};
