//! Domain types for task persistence.
//!
//! - [`TaskRecord`] - The stored and transmitted task document.
//! - [`NewTask`] - Create payload.
//! - [`TaskPatch`] - Validated partial-update payload.

pub mod record;

pub use record::{validate_text, NewTask, TaskPatch, TaskRecord};
