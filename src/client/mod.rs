//! Typed HTTP client for the task API, and the list view built on it.

pub mod error;
pub mod view;

use async_trait::async_trait;
use serde::Deserialize;

use todo_store::{NewTask, TaskPatch, TaskRecord};

pub use error::ClientError;
pub use view::{EditDraft, TaskListView, ViewState};

/// The four remote operations a task list needs.
///
/// [`TaskClient`] implements this over HTTP; tests substitute their own.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<TaskRecord>, ClientError>;

    async fn create_task(&self, text: &str) -> Result<TaskRecord, ClientError>;

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<TaskRecord, ClientError>;

    async fn delete_task(&self, id: &str) -> Result<(), ClientError>;
}

/// Error body returned by the service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for a running task server.
///
/// # Examples
///
/// ```no_run
/// use todo_list::client::{TaskApi, TaskClient};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), todo_list::client::ClientError> {
/// let client = TaskClient::new("http://127.0.0.1:3000");
/// let task = client.create_task("water plants").await?;
/// client.delete_task(&task.id).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TaskClient {
    http: reqwest::Client,
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Uses a preconfigured `reqwest::Client` (timeouts, proxies).
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/tasks/{}", self.base_url, urlencoding::encode(id))
    }

    /// Passes success responses through; turns anything else into
    /// [`ClientError::Api`] carrying the service's error message.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let raw = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&raw)
            .map(|body| body.error)
            .unwrap_or(raw);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl TaskApi for TaskClient {
    async fn list_tasks(&self) -> Result<Vec<TaskRecord>, ClientError> {
        let response = self.http.get(self.tasks_url()).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_task(&self, text: &str) -> Result<TaskRecord, ClientError> {
        let response = self
            .http
            .post(self.tasks_url())
            .json(&NewTask::new(text))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<TaskRecord, ClientError> {
        let response = self.http.put(self.task_url(id)).json(patch).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_task(&self, id: &str) -> Result<(), ClientError> {
        let response = self.http.delete(self.task_url(id)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
