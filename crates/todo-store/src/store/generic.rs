//! Generic task store with all domain logic delegating to a [`StorageBackend`].
//!
//! [`GenericTaskStore`] implements every domain operation (text validation,
//! ID and timestamp assignment, partial-field merge, canonical JSON
//! serialization) on top of any [`StorageBackend`] implementation.
//!
//! Backends remain dumb document stores; all intelligence lives here.
//!
//! # Construction
//!
//! ```
//! use todo_store::store::generic::GenericTaskStore;
//! use todo_store::store::memory::InMemoryBackend;
//!
//! let store = GenericTaskStore::new(InMemoryBackend::new());
//! ```

use crate::domain::{TaskPatch, TaskRecord};
use crate::error::TaskError;
use crate::store::backend::{StorageBackend, StorageError};

/// Generic task store that delegates all storage to a [`StorageBackend`].
///
/// # Type Parameters
///
/// * `B` - A [`StorageBackend`] implementation (in-memory, Redis, etc.)
#[derive(Debug)]
pub struct GenericTaskStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> GenericTaskStore<B> {
    /// Creates a new generic task store backed by the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ---- Serialization helpers (private) ----

    fn serialize_record(record: &TaskRecord) -> Result<Vec<u8>, TaskError> {
        serde_json::to_vec(record)
            .map_err(|e| TaskError::StoreError(format!("failed to serialize TaskRecord: {e}")))
    }

    fn deserialize_record(data: &[u8]) -> Result<TaskRecord, TaskError> {
        serde_json::from_slice(data)
            .map_err(|e| TaskError::StoreError(format!("failed to deserialize TaskRecord: {e}")))
    }

    fn map_storage_error(err: StorageError, task_id: &str) -> TaskError {
        match err {
            StorageError::NotFound { .. } => TaskError::NotFound {
                task_id: task_id.to_string(),
            },
            StorageError::Backend { message, .. } => TaskError::StoreError(message),
        }
    }

    // ---- Domain operations (public) ----

    /// Returns every task in insertion order.
    pub async fn list_all(&self) -> Result<Vec<TaskRecord>, TaskError> {
        let documents = self
            .backend
            .list()
            .await
            .map_err(|e| Self::map_storage_error(e, ""))?;

        let records = documents
            .iter()
            .map(|(_, data)| Self::deserialize_record(data))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = records.len(), "listed tasks");
        Ok(records)
    }

    /// Creates a new task with a fresh ID, `completed = false` and the
    /// current time as its creation timestamp.
    pub async fn create(&self, text: &str) -> Result<TaskRecord, TaskError> {
        let record = TaskRecord::new(text.to_string())?;

        let bytes = Self::serialize_record(&record)?;
        self.backend
            .put(&record.id, &bytes)
            .await
            .map_err(|e| Self::map_storage_error(e, &record.id))?;

        tracing::debug!(task_id = %record.id, "created task");
        Ok(record)
    }

    /// Retrieves a task by ID.
    pub async fn get(&self, task_id: &str) -> Result<TaskRecord, TaskError> {
        let data = self
            .backend
            .get(task_id)
            .await
            .map_err(|e| Self::map_storage_error(e, task_id))?;
        Self::deserialize_record(&data)
    }

    /// Merges `patch` onto the task with the given ID and persists it.
    ///
    /// The patch is validated first, so a malformed patch never reaches the
    /// backend. The merge itself is a single backend call that fails with
    /// `NotFound` rather than recreating a task deleted in the meantime.
    /// Concurrent updates are last-write-wins.
    pub async fn update_by_id(
        &self,
        task_id: &str,
        patch: &TaskPatch,
    ) -> Result<TaskRecord, TaskError> {
        patch.validate()?;

        let fields = serde_json::to_vec(patch)
            .map_err(|e| TaskError::StoreError(format!("failed to serialize TaskPatch: {e}")))?;
        let data = self
            .backend
            .merge(task_id, &fields)
            .await
            .map_err(|e| Self::map_storage_error(e, task_id))?;
        let record = Self::deserialize_record(&data)?;

        tracing::debug!(task_id = task_id, "updated task");
        Ok(record)
    }

    /// Deletes the task with the given ID.
    ///
    /// Returns `true` if a task was removed. Deleting a missing ID is not an
    /// error.
    pub async fn delete_by_id(&self, task_id: &str) -> Result<bool, TaskError> {
        let removed = self
            .backend
            .delete(task_id)
            .await
            .map_err(|e| Self::map_storage_error(e, task_id))?;

        if removed {
            tracing::debug!(task_id = task_id, "deleted task");
        } else {
            tracing::debug!(task_id = task_id, "delete of unknown task ignored");
        }
        Ok(removed)
    }

    /// Checks that the backend is reachable.
    pub async fn ping(&self) -> Result<(), TaskError> {
        self.backend
            .ping()
            .await
            .map_err(|e| Self::map_storage_error(e, ""))
    }
}
