//! MemoryStorage - HashMap-backed storage for tests and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::StorageBackend;
use crate::error::StoreError;

/// In-memory storage backed by a HashMap. Clone-friendly via Arc.
///
/// Reading a collection that was never written yields the empty string,
/// mirroring the create-if-absent behavior of [`super::DirStorage`].
#[derive(Clone)]
pub struct MemoryStorage {
    files: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage {
            files: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn read_collection(&self, collection: &str) -> Result<String, StoreError> {
        let files = self
            .files
            .read()
            .map_err(|_| StoreError::Io("storage lock poisoned".to_string()))?;
        Ok(files.get(collection).cloned().unwrap_or_default())
    }

    fn write_collection(&self, collection: &str, contents: &str) -> Result<(), StoreError> {
        let mut files = self
            .files
            .write()
            .map_err(|_| StoreError::Io("storage lock poisoned".to_string()))?;
        files.insert(collection.to_string(), contents.to_string());
        Ok(())
    }
}
