//! Low-level document storage backend trait and supporting types.
//!
//! The [`StorageBackend`] trait defines the contract that all storage engines
//! implement: [`get`](StorageBackend::get), [`put`](StorageBackend::put),
//! [`merge`](StorageBackend::merge), [`delete`](StorageBackend::delete),
//! [`list`](StorageBackend::list) and [`ping`](StorageBackend::ping).
//!
//! Domain logic (text validation, ID assignment, serialization) does **not**
//! belong here. Backends are dumb document stores keyed by task ID; domain
//! logic lives in `GenericTaskStore`.
//!
//! # Documents
//!
//! Documents are JSON objects. Apart from [`merge`](StorageBackend::merge),
//! which sets top-level members the way a document database's field update
//! does, backends never look inside them.
//!
//! # Ordering
//!
//! [`list`](StorageBackend::list) returns documents in insertion order.
//! Overwriting an existing key with [`put`](StorageBackend::put) keeps its
//! original position.

use std::fmt;

use async_trait::async_trait;

/// Errors that can occur during raw storage operations.
///
/// These are low-level errors from the storage backend. `GenericTaskStore`
/// maps them to domain-aware [`TaskError`](crate::error::TaskError) variants
/// before surfacing to callers.
///
/// # Examples
///
/// ```
/// use todo_store::store::backend::StorageError;
///
/// let err = StorageError::NotFound { key: "task-123".to_string() };
/// assert!(err.to_string().contains("task-123"));
/// ```
#[derive(Debug)]
pub enum StorageError {
    /// The requested key was not found in storage.
    NotFound {
        /// The key that was not found.
        key: String,
    },

    /// An I/O or backend-specific error occurred (e.g., network failure,
    /// database timeout, malformed stored document).
    Backend {
        /// Human-readable description of the error.
        message: String,
        /// The underlying error, if available. Accessible via
        /// [`std::error::Error::source()`].
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StorageError {
    /// Shorthand for a [`StorageError::Backend`] without an underlying source.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
            source: None,
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { key } => write!(f, "key not found: {key}"),
            Self::Backend { message, .. } => write!(f, "backend error: {message}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend {
                source: Some(src), ..
            } => Some(src.as_ref()),
            _ => None,
        }
    }
}

/// Document storage backend for task persistence.
///
/// Implementations store opaque serialized documents keyed by task ID.
/// All domain logic lives in `GenericTaskStore`, **not** in the backend.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to support concurrent access
/// from multiple request handlers.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Retrieves a document by key.
    ///
    /// # Errors
    ///
    /// - [`StorageError::NotFound`] if no document exists for the given key.
    /// - [`StorageError::Backend`] on I/O or backend-specific failures.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Stores a document unconditionally (create or overwrite).
    ///
    /// # Errors
    ///
    /// - [`StorageError::Backend`] on I/O or backend-specific failures.
    async fn put(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Sets the top-level members of the JSON object `fields` on an existing
    /// document and returns the resulting document.
    ///
    /// The lookup and the write are one atomic step: a document deleted
    /// concurrently is never recreated. Members absent from `fields` are left
    /// as they are, and the document keeps its position in [`list`](Self::list).
    ///
    /// # Errors
    ///
    /// - [`StorageError::NotFound`] if no document exists for the given key.
    /// - [`StorageError::Backend`] if the stored document or `fields` is not a
    ///   JSON object, or on I/O or backend-specific failures.
    async fn merge(&self, key: &str, fields: &[u8]) -> Result<Vec<u8>, StorageError>;

    /// Deletes a document by key.
    ///
    /// Returns `true` if the key existed and was deleted, `false` if the
    /// key did not exist (idempotent delete).
    ///
    /// # Errors
    ///
    /// - [`StorageError::Backend`] on I/O or backend-specific failures.
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;

    /// Lists every stored `(key, document)` pair in insertion order.
    ///
    /// # Errors
    ///
    /// - [`StorageError::Backend`] on I/O or backend-specific failures.
    async fn list(&self) -> Result<Vec<(String, Vec<u8>)>, StorageError>;

    /// Verifies the backend is reachable.
    ///
    /// Called once at startup so an unreachable database fails the process
    /// before it starts serving.
    ///
    /// # Errors
    ///
    /// - [`StorageError::Backend`] if the backend cannot be reached.
    async fn ping(&self) -> Result<(), StorageError>;
}
