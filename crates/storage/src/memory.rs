use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StorageError;
use crate::traits::HistoryStore;

/// Process-local store, for tests and the wasm front-end's fallback.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryStore {
    fn read_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let documents = self
            .documents
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(documents.get(key).cloned())
    }

    fn write_raw(&self, key: &str, document: &str) -> Result<(), StorageError> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        documents.insert(key.to_string(), document.to_string());
        Ok(())
    }
}
