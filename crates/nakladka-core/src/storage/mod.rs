//! Storage abstraction for persistence.
//!
//! Backends are flat key-value stores of serialized records, the same shape
//! as browser local storage. Higher layers choose the key namespace.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Key not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for key-value storage backends.
///
/// Operations are synchronous; the editor core runs on a single thread and
/// never suspends while persisting.
pub trait Storage {
    /// Store a value, replacing any previous value under the key.
    fn save(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Load the value stored under a key.
    fn load(&self, key: &str) -> StorageResult<String>;

    /// Delete a key. Fails with [`StorageError::NotFound`] if it is absent.
    fn delete(&mut self, key: &str) -> StorageResult<()>;

    /// List all keys in storage order.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}
