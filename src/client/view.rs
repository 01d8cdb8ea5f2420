//! In-memory task list kept in sync with the API.
//!
//! The view starts [`ViewState::Idle`] and becomes [`ViewState::Loaded`]
//! once [`TaskListView::mount`] fetches the list. Every action issues one
//! request; on success the local list is patched by task id, on failure it
//! is left as it was and the error is logged and returned.

use chrono::Local;
use todo_store::{TaskPatch, TaskRecord};

use super::{ClientError, TaskApi};

/// Lifecycle of a [`TaskListView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing fetched yet, or the initial fetch failed.
    Idle,
    /// The list reflects the last successful fetch plus local updates.
    Loaded,
}

/// Uncommitted text for the task being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: String,
    pub text: String,
}

/// A task list view over a [`TaskApi`].
pub struct TaskListView<A: TaskApi> {
    api: A,
    state: ViewState,
    tasks: Vec<TaskRecord>,
    new_text: String,
    editing: Option<EditDraft>,
}

impl<A: TaskApi> TaskListView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ViewState::Idle,
            tasks: Vec::new(),
            new_text: String::new(),
            editing: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    /// Text of the task that [`add`](Self::add) will create.
    pub fn new_text(&self) -> &str {
        &self.new_text
    }

    pub fn set_new_text(&mut self, text: impl Into<String>) {
        self.new_text = text.into();
    }

    /// Fetches the full list and enters [`ViewState::Loaded`].
    pub async fn mount(&mut self) -> Result<(), ClientError> {
        let tasks = self
            .api
            .list_tasks()
            .await
            .inspect_err(|e| tracing::error!("Error fetching tasks: {}", e))?;
        self.tasks = tasks;
        self.state = ViewState::Loaded;
        Ok(())
    }

    /// Creates a task from the new-task text, appends it and clears the text.
    pub async fn add(&mut self) -> Result<&TaskRecord, ClientError> {
        let task = self
            .api
            .create_task(&self.new_text)
            .await
            .inspect_err(|e| tracing::error!("Error adding task: {}", e))?;
        self.new_text.clear();
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Flips the completion flag of the task with `id`.
    pub async fn toggle(&mut self, id: &str) -> Result<&TaskRecord, ClientError> {
        let index = self.position(id)?;
        let patch = TaskPatch::completed(!self.tasks[index].completed);
        let updated = self
            .api
            .update_task(id, &patch)
            .await
            .inspect_err(|e| tracing::error!("Error updating task: {}", e))?;
        self.tasks[index] = updated;
        Ok(&self.tasks[index])
    }

    /// Enters edit mode for `id`, seeding the draft with its current text.
    pub fn begin_edit(&mut self, id: &str) -> Result<(), ClientError> {
        let index = self.position(id)?;
        self.editing = Some(EditDraft {
            id: id.to_string(),
            text: self.tasks[index].text.clone(),
        });
        Ok(())
    }

    /// Replaces the draft text. No-op outside edit mode.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Some(draft) = self.editing.as_mut() {
            draft.text = text.into();
        }
    }

    /// Sends the draft text and, on success, commits it and leaves edit mode.
    ///
    /// Only the `text` of the response is taken into the list.
    pub async fn save_edit(&mut self) -> Result<&TaskRecord, ClientError> {
        let draft = self.editing.as_ref().ok_or(ClientError::NotEditing)?;
        let index = self.position(&draft.id)?;
        let updated = self
            .api
            .update_task(&draft.id, &TaskPatch::text(draft.text.as_str()))
            .await
            .inspect_err(|e| tracing::error!("Error updating task: {}", e))?;
        self.tasks[index].text = updated.text;
        self.editing = None;
        Ok(&self.tasks[index])
    }

    /// Deletes `id` remotely and drops it from the list.
    pub async fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        self.api
            .delete_task(id)
            .await
            .inspect_err(|e| tracing::error!("Error deleting task: {}", e))?;
        self.tasks.retain(|task| task.id != id);
        if self.editing.as_ref().is_some_and(|draft| draft.id == id) {
            self.editing = None;
        }
        Ok(())
    }

    /// Plain-text rendering, one line per task.
    ///
    /// ```text
    /// [x] buy milk  (Created: 2026-10-18 09:30:00)  3f2a...
    /// [ ] > call mom_ (editing)  (Created: 2026-10-18 09:31:12)  9b1c...
    /// ```
    pub fn render(&self) -> String {
        if self.tasks.is_empty() {
            return "No tasks.\n".to_string();
        }

        let mut out = String::new();
        for task in &self.tasks {
            let marker = if task.completed { "[x]" } else { "[ ]" };
            let text = match &self.editing {
                Some(draft) if draft.id == task.id => format!("> {}_ (editing)", draft.text),
                _ => task.text.clone(),
            };
            let created = task.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
            out.push_str(&format!(
                "{marker} {text}  (Created: {created})  {}\n",
                task.id
            ));
        }
        out
    }

    fn position(&self, id: &str) -> Result<usize, ClientError> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| ClientError::UnknownTask { id: id.to_string() })
    }
}
