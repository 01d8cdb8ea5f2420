//! Task records and document-store persistence for the todo-list service.
//!
//! # Overview
//!
//! A task is a flat document: an opaque store-assigned `id`, non-empty
//! `text`, a `completed` flag, and its creation time. The store offers four
//! operations over the collection -- list, create, update-by-id (partial
//! merge) and delete-by-id (idempotent).
//!
//! # Module Organization
//!
//! - [`domain`] - [`TaskRecord`], [`NewTask`] and [`TaskPatch`]
//! - [`store`] - [`TaskStore`] trait, generic store, storage backends
//! - [`error`] - [`TaskError`] and its [`ErrorClass`]

pub mod domain;
pub mod error;
pub mod store;

// Re-exports for ergonomic access
pub use domain::{NewTask, TaskPatch, TaskRecord};
pub use error::{ErrorClass, TaskError};
pub use store::generic::GenericTaskStore;
pub use store::memory::{InMemoryBackend, InMemoryTaskStore};
pub use store::{StorageBackend, StorageError, TaskStore};
