//! Error types for task store operations.
//!
//! Provides [`TaskError`], the domain error surfaced by every
//! [`TaskStore`](crate::store::TaskStore) operation, and [`ErrorClass`],
//! the coarse category the HTTP layer maps to a status code.

use std::fmt;

/// Coarse category of a [`TaskError`].
///
/// The API layer uses this to pick a status code without matching on
/// every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller sent missing or malformed input.
    Validation,
    /// The addressed record does not exist.
    NotFound,
    /// The backing store failed.
    Store,
}

/// Errors that can occur during task operations.
///
/// # Examples
///
/// ```
/// use todo_store::{ErrorClass, TaskError};
///
/// let err = TaskError::NotFound {
///     task_id: "missing-task".to_string(),
/// };
/// assert_eq!(err.class(), ErrorClass::NotFound);
/// assert!(err.to_string().contains("missing-task"));
/// ```
#[derive(Debug)]
pub enum TaskError {
    /// A field failed validation (e.g. empty `text`).
    Validation {
        /// The offending field, if the failure is tied to one.
        field: Option<String>,
        /// Human-readable reason.
        message: String,
    },

    /// Task with the given ID was not found.
    NotFound {
        /// The task ID that was not found.
        task_id: String,
    },

    /// Backend storage error.
    StoreError(String),
}

impl TaskError {
    /// Builds a validation error tied to a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    /// Returns the coarse category of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use todo_store::{ErrorClass, TaskError};
    ///
    /// let err = TaskError::invalid_field("text", "must not be empty");
    /// assert_eq!(err.class(), ErrorClass::Validation);
    ///
    /// let err = TaskError::StoreError("connection reset".to_string());
    /// assert_eq!(err.class(), ErrorClass::Store);
    /// ```
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Validation { .. } => ErrorClass::Validation,
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::StoreError(_) => ErrorClass::Store,
        }
    }
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation {
                field: Some(field),
                message,
            } => write!(f, "validation failed for `{field}`: {message}"),
            Self::Validation {
                field: None,
                message,
            } => write!(f, "validation failed: {message}"),
            Self::NotFound { task_id } => write!(f, "task not found: {task_id}"),
            Self::StoreError(msg) => write!(f, "store error: {msg}"),
        }
    }
}

impl std::error::Error for TaskError {}
