//! Persistence and tabular import/export.

pub mod csv;
mod store;

pub use csv::{parse_csv, write_csv};
pub use store::{DocumentSnapshot, DocumentStore, JsonFileStore, MemoryStore};
