//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use hashlink::LinkedHashMap;

/// In-memory storage for testing and ephemeral use.
///
/// Keys are listed in insertion order; overwriting a key keeps its place.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: LinkedHashMap<String, String>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
        match self.entries.get_mut(key) {
            Some(existing) => *existing = value.to_string(),
            None => {
                self.entries.insert(key.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    fn load(&self, key: &str) -> StorageResult<String> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn delete(&mut self, key: &str) -> StorageResult<()> {
        self.entries
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.entries.contains_key(key))
    }
}
