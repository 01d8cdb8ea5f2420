//! Task store trait, generic implementation, and backends.
//!
//! # Architecture
//!
//! The task storage system has three layers:
//!
//! 1. **[`TaskStore`]** -- A type-erasure interface for use as
//!    `Arc<dyn TaskStore>` by the HTTP layer and by test doubles.
//!
//! 2. **[`GenericTaskStore<B>`](generic::GenericTaskStore)** -- All domain
//!    logic (validation, ID assignment, canonical serialization). Has a
//!    blanket `TaskStore` impl.
//!
//! 3. **[`StorageBackend`]** -- Dumb document trait that backends implement
//!    (in-memory, Redis). No domain logic.
//!
//! # Backends
//!
//! - [`InMemoryBackend`](crate::store::memory::InMemoryBackend) -- insertion-ordered
//!   map behind a `parking_lot::RwLock`.
//! - [`RedisBackend`](crate::store::redis::RedisBackend) -- Redis document
//!   store for durable deployments. Available behind the `redis` feature flag.

pub mod backend;
pub mod generic;
pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;

use async_trait::async_trait;

pub use backend::{StorageBackend, StorageError};

use crate::domain::{TaskPatch, TaskRecord};
use crate::error::TaskError;

/// Durable CRUD over the collection of task records.
///
/// Each operation performs one logical round trip to the backing store.
/// Implementations must be `Send + Sync` so a single store can be shared
/// across request handlers behind an `Arc`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use todo_store::store::memory::InMemoryTaskStore;
/// use todo_store::{TaskPatch, TaskStore};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let store: Arc<dyn TaskStore> = Arc::new(InMemoryTaskStore::in_memory());
///
/// let task = store.create("buy milk").await.unwrap();
/// assert!(!task.completed);
///
/// let done = store.update_by_id(&task.id, &TaskPatch::completed(true)).await.unwrap();
/// assert!(done.completed);
///
/// store.delete_by_id(&task.id).await.unwrap();
/// assert!(store.list_all().await.unwrap().is_empty());
/// # }
/// ```
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task in insertion order. Empty if none exist.
    ///
    /// # Errors
    ///
    /// - [`TaskError::StoreError`] if the backend fails.
    async fn list_all(&self) -> Result<Vec<TaskRecord>, TaskError>;

    /// Creates a task from `text`, assigning its ID and creation time.
    ///
    /// # Errors
    ///
    /// - [`TaskError::Validation`] if `text` is empty.
    /// - [`TaskError::StoreError`] if the backend fails.
    async fn create(&self, text: &str) -> Result<TaskRecord, TaskError>;

    /// Retrieves a task by ID.
    ///
    /// # Errors
    ///
    /// - [`TaskError::NotFound`] if the task does not exist.
    /// - [`TaskError::StoreError`] if the backend fails.
    async fn get(&self, task_id: &str) -> Result<TaskRecord, TaskError>;

    /// Applies the set fields of `patch` to the task and returns the result.
    ///
    /// # Errors
    ///
    /// - [`TaskError::Validation`] if a patch field is malformed.
    /// - [`TaskError::NotFound`] if the task does not exist.
    /// - [`TaskError::StoreError`] if the backend fails.
    async fn update_by_id(&self, task_id: &str, patch: &TaskPatch)
        -> Result<TaskRecord, TaskError>;

    /// Deletes a task. Returns `true` if it existed.
    ///
    /// Deleting a missing ID succeeds with `false`.
    ///
    /// # Errors
    ///
    /// - [`TaskError::StoreError`] if the backend fails.
    async fn delete_by_id(&self, task_id: &str) -> Result<bool, TaskError>;

    /// Checks that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// - [`TaskError::StoreError`] if the backend cannot be reached.
    async fn ping(&self) -> Result<(), TaskError>;
}

// ---- Blanket TaskStore impl for GenericTaskStore ----

#[async_trait]
impl<B: StorageBackend + 'static> TaskStore for generic::GenericTaskStore<B> {
    async fn list_all(&self) -> Result<Vec<TaskRecord>, TaskError> {
        generic::GenericTaskStore::list_all(self).await
    }

    async fn create(&self, text: &str) -> Result<TaskRecord, TaskError> {
        generic::GenericTaskStore::create(self, text).await
    }

    async fn get(&self, task_id: &str) -> Result<TaskRecord, TaskError> {
        generic::GenericTaskStore::get(self, task_id).await
    }

    async fn update_by_id(
        &self,
        task_id: &str,
        patch: &TaskPatch,
    ) -> Result<TaskRecord, TaskError> {
        generic::GenericTaskStore::update_by_id(self, task_id, patch).await
    }

    async fn delete_by_id(&self, task_id: &str) -> Result<bool, TaskError> {
        generic::GenericTaskStore::delete_by_id(self, task_id).await
    }

    async fn ping(&self) -> Result<(), TaskError> {
        generic::GenericTaskStore::ping(self).await
    }
}
