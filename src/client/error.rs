use thiserror::Error;

/// Errors surfaced by the task API client and the list view.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connection, timeout, decode).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The view holds no task with this id.
    #[error("no task with id {id} in the current list")]
    UnknownTask { id: String },

    /// A save was requested while no task was being edited.
    #[error("no task is being edited")]
    NotEditing,
}
