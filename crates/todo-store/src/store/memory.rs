//! In-memory storage backend and task store.
//!
//! [`InMemoryBackend`] provides a thread-safe [`StorageBackend`] implementation
//! over an insertion-ordered `IndexMap<String, Vec<u8>>`. It is a dumb
//! document store with no domain logic. Every write, including the
//! lookup-and-write of a merge, happens under a single write lock.
//!
//! [`InMemoryTaskStore`] is [`GenericTaskStore`] specialised to this backend,
//! used by tests and by the server when no database is configured.
//!
//! # Examples
//!
//! ```
//! use todo_store::store::memory::InMemoryTaskStore;
//!
//! let store = InMemoryTaskStore::in_memory();
//! ```

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::store::backend::{StorageBackend, StorageError};
use crate::store::generic::GenericTaskStore;

/// Thread-safe in-memory storage backend.
///
/// Documents are kept in insertion order. Deleting uses `shift_remove`, so
/// the relative order of the remaining documents never changes.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    data: RwLock<IndexMap<String, Vec<u8>>>,
}

impl InMemoryBackend {
    /// Creates an empty in-memory backend.
    ///
    /// # Examples
    ///
    /// ```
    /// use todo_store::store::memory::InMemoryBackend;
    ///
    /// let backend = InMemoryBackend::new();
    /// assert!(backend.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents stored.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Returns `true` if the backend contains no documents.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

#[async_trait]
impl StorageBackend for InMemoryBackend {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        self.data
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })
    }

    async fn put(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.data.write().insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn merge(&self, key: &str, fields: &[u8]) -> Result<Vec<u8>, StorageError> {
        let fields = parse_object(fields)?;

        let mut data = self.data.write();
        let document = data.get_mut(key).ok_or_else(|| StorageError::NotFound {
            key: key.to_string(),
        })?;

        let mut merged = parse_object(document)?;
        merged.extend(fields);
        let bytes =
            serde_json::to_vec(&Value::Object(merged)).map_err(|e| StorageError::Backend {
                message: format!("failed to encode merged document: {e}"),
                source: Some(Box::new(e)),
            })?;
        document.clone_from(&bytes);
        Ok(bytes)
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.data.write().shift_remove(key).is_some())
    }

    async fn list(&self) -> Result<Vec<(String, Vec<u8>)>, StorageError> {
        Ok(self
            .data
            .read()
            .iter()
            .map(|(key, data)| (key.clone(), data.clone()))
            .collect())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

fn parse_object(data: &[u8]) -> Result<Map<String, Value>, StorageError> {
    match serde_json::from_slice(data) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(StorageError::backend("document is not a JSON object")),
        Err(e) => Err(StorageError::Backend {
            message: format!("document is not valid JSON: {e}"),
            source: Some(Box::new(e)),
        }),
    }
}

/// Task store over [`InMemoryBackend`].
pub type InMemoryTaskStore = GenericTaskStore<InMemoryBackend>;

impl GenericTaskStore<InMemoryBackend> {
    /// Creates an empty in-memory task store.
    pub fn in_memory() -> Self {
        Self::new(InMemoryBackend::new())
    }
}

impl Default for GenericTaskStore<InMemoryBackend> {
    fn default() -> Self {
        Self::in_memory()
    }
}
