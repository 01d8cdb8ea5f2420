//! Mapping from store failures to HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use todo_store::{ErrorClass, TaskError};

/// An error response: a status code and a message rendered as
/// `{"error": "<message>"}`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Response status code.
    pub status: StatusCode,
    /// Text placed in the `error` member of the body.
    pub message: String,
}

impl ApiError {
    /// Builds an error response with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Failure of a read (list). Store faults are server errors.
    pub fn read(err: TaskError) -> Self {
        let status = match err.class() {
            ErrorClass::Store => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorClass::Validation | ErrorClass::NotFound => StatusCode::BAD_REQUEST,
        };
        Self::new(status, err.to_string())
    }

    /// Failure of a write (create, update, delete). Always a client error.
    pub fn write(err: TaskError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err.to_string())
    }

    /// A request body that could not be parsed.
    pub fn from_rejection(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "{}", self.message);
        } else {
            tracing::warn!(status = %self.status, "{}", self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_faults_split_by_operation() {
        let read = ApiError::read(TaskError::StoreError("down".into()));
        assert_eq!(read.status, StatusCode::INTERNAL_SERVER_ERROR);

        let write = ApiError::write(TaskError::StoreError("down".into()));
        assert_eq!(write.status, StatusCode::BAD_REQUEST);
        assert_eq!(write.message, "store error: down");
    }

    #[test]
    fn missing_task_is_a_client_error() {
        let err = ApiError::write(TaskError::NotFound {
            task_id: "nope".into(),
        });
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
