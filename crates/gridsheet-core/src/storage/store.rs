//! Remote document store contract.
//!
//! The session consumes persistence through exactly two operations:
//! load a snapshot by document id, save a snapshot under a document id.
//! Saving is best-effort replication: the in-memory grid is the source
//! of truth and a failed save never rolls a mutation back.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{Result, SheetError};
use crate::style::CellStyle;

/// Serialized form of an open document: the full cell grid, the sheet
/// name, and the style map keyed by canonical cell id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub rows: Vec<Vec<String>>,
    pub name: String,
    #[serde(default)]
    pub styles: HashMap<String, CellStyle>,
}

pub trait DocumentStore: Send {
    /// Load the snapshot stored under `id`, or None if the document
    /// does not exist yet.
    fn load(&self, id: &str) -> Result<Option<DocumentSnapshot>>;

    /// Store the snapshot under `id`, overwriting any previous version.
    fn save(&self, id: &str, snapshot: &DocumentSnapshot) -> Result<()>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<String, DocumentSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, id: &str) -> Result<Option<DocumentSnapshot>> {
        let docs = self
            .docs
            .lock()
            .map_err(|_| SheetError::Store("store mutex poisoned".to_string()))?;
        Ok(docs.get(id).cloned())
    }

    fn save(&self, id: &str, snapshot: &DocumentSnapshot) -> Result<()> {
        let mut docs = self
            .docs
            .lock()
            .map_err(|_| SheetError::Store("store mutex poisoned".to_string()))?;
        docs.insert(id.to_string(), snapshot.clone());
        Ok(())
    }
}

/// One JSON file per document under a root directory.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> JsonFileStore {
        JsonFileStore { root: root.into() }
    }

    fn doc_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self, id: &str) -> Result<Option<DocumentSnapshot>> {
        let path = self.doc_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        let snapshot = serde_json::from_str(&content)
            .map_err(|e| SheetError::Store(format!("corrupt document {}: {}", path.display(), e)))?;
        Ok(Some(snapshot))
    }

    fn save(&self, id: &str, snapshot: &DocumentSnapshot) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| SheetError::Store(format!("serialize failed: {}", e)))?;
        std::fs::write(self.doc_path(id), json)?;
        Ok(())
    }
}
