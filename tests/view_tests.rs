//! State-machine tests for the task list view, using an in-process API.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use todo_list::client::{ClientError, EditDraft, TaskApi, TaskListView, ViewState};
use todo_store::store::memory::InMemoryTaskStore;
use todo_store::{TaskError, TaskPatch, TaskRecord};

/// Serves the API from an in-memory store. Can be switched into a mode
/// where every call fails, and records the patches it receives.
#[derive(Default)]
struct FakeApi {
    store: InMemoryTaskStore,
    failing: AtomicBool,
    patches: Mutex<Vec<TaskPatch>>,
}

impl FakeApi {
    fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), ClientError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ClientError::Api {
                status: 500,
                message: "store error: down".to_string(),
            });
        }
        Ok(())
    }
}

fn rejected(err: TaskError) -> ClientError {
    ClientError::Api {
        status: 400,
        message: err.to_string(),
    }
}

#[async_trait]
impl TaskApi for FakeApi {
    async fn list_tasks(&self) -> Result<Vec<TaskRecord>, ClientError> {
        self.check()?;
        self.store.list_all().await.map_err(rejected)
    }

    async fn create_task(&self, text: &str) -> Result<TaskRecord, ClientError> {
        self.check()?;
        self.store.create(text).await.map_err(rejected)
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<TaskRecord, ClientError> {
        self.check()?;
        self.patches.lock().unwrap().push(patch.clone());
        self.store.update_by_id(id, patch).await.map_err(rejected)
    }

    async fn delete_task(&self, id: &str) -> Result<(), ClientError> {
        self.check()?;
        self.store.delete_by_id(id).await.map(|_| ()).map_err(rejected)
    }
}

/// A mounted view over a store preloaded with `texts`.
async fn loaded_view(texts: &[&str]) -> TaskListView<FakeApi> {
    let api = FakeApi::default();
    for text in texts {
        api.store.create(text).await.unwrap();
    }
    let mut view = TaskListView::new(api);
    view.mount().await.unwrap();
    view
}

fn texts<A: TaskApi>(view: &TaskListView<A>) -> Vec<&str> {
    view.tasks().iter().map(|t| t.text.as_str()).collect()
}

// ─── Mount ──────────────────────────────────────────────────────────────────

mod mount_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn starts_idle_and_empty() {
        let view = TaskListView::new(FakeApi::default());
        assert_eq!(view.state(), ViewState::Idle);
        assert!(view.tasks().is_empty());
        assert_eq!(view.render(), "No tasks.\n");
    }

    #[tokio::test]
    async fn mount_loads_existing_tasks_in_order() {
        let view = loaded_view(&["a", "b", "c"]).await;
        assert_eq!(view.state(), ViewState::Loaded);
        assert_eq!(texts(&view), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn failed_mount_stays_idle() {
        let api = FakeApi::default();
        api.store.create("hidden").await.unwrap();
        api.fail(true);

        let mut view = TaskListView::new(api);
        assert!(view.mount().await.is_err());
        assert_eq!(view.state(), ViewState::Idle);
        assert!(view.tasks().is_empty());
    }
}

// ─── Actions ────────────────────────────────────────────────────────────────

mod action_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn add_appends_and_clears_input() {
        let mut view = loaded_view(&["first"]).await;
        view.set_new_text("second");

        let added = view.add().await.unwrap();
        assert_eq!(added.text, "second");
        assert!(!added.completed);
        assert_eq!(view.new_text(), "");
        assert_eq!(texts(&view), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn add_with_empty_input_is_rejected() {
        let mut view = loaded_view(&[]).await;
        let err = view.add().await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 400, .. }));
        assert!(view.tasks().is_empty());
    }

    #[tokio::test]
    async fn toggle_sends_negated_flag_and_replaces_record() {
        let mut view = loaded_view(&["task"]).await;
        let id = view.tasks()[0].id.clone();

        assert!(view.toggle(&id).await.unwrap().completed);
        assert!(!view.toggle(&id).await.unwrap().completed);

        let patches = view_api_patches(&view);
        assert_eq!(
            patches,
            vec![TaskPatch::completed(true), TaskPatch::completed(false)]
        );
    }

    #[tokio::test]
    async fn toggle_of_unknown_id_sends_nothing() {
        let mut view = loaded_view(&["task"]).await;
        let err = view.toggle("nope").await.unwrap_err();
        assert!(matches!(err, ClientError::UnknownTask { .. }));
        assert!(view_api_patches(&view).is_empty());
    }

    #[tokio::test]
    async fn delete_removes_only_that_task() {
        let mut view = loaded_view(&["a", "b", "c"]).await;
        let id = view.tasks()[1].id.clone();

        view.delete(&id).await.unwrap();
        assert_eq!(texts(&view), vec!["a", "c"]);
    }

    #[tokio::test]
    async fn failures_leave_local_state_unchanged() {
        let mut view = loaded_view(&["a", "b"]).await;
        let before = view.tasks().to_vec();
        let id = before[0].id.clone();
        view.set_new_text("c");

        fake(&view).fail(true);
        assert!(view.add().await.is_err());
        assert!(view.toggle(&id).await.is_err());
        assert!(view.delete(&id).await.is_err());

        assert_eq!(view.tasks(), before.as_slice());
        assert_eq!(view.new_text(), "c");
    }
}

// ─── Editing ────────────────────────────────────────────────────────────────

mod edit_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn edit_draft_is_separate_until_saved() {
        let mut view = loaded_view(&["draft me"]).await;
        let id = view.tasks()[0].id.clone();

        view.begin_edit(&id).unwrap();
        assert_eq!(
            view.editing(),
            Some(&EditDraft {
                id: id.clone(),
                text: "draft me".to_string()
            })
        );

        view.set_draft("drafted");
        assert_eq!(view.tasks()[0].text, "draft me");
        assert!(view.render().contains("> drafted_ (editing)"));

        let saved = view.save_edit().await.unwrap();
        assert_eq!(saved.text, "drafted");
        assert_eq!(view.editing(), None);
        assert_eq!(view_api_patches(&view), vec![TaskPatch::text("drafted")]);
    }

    #[tokio::test]
    async fn save_commits_only_text() {
        let mut view = loaded_view(&["x"]).await;
        let id = view.tasks()[0].id.clone();

        // Another client completes the task behind this view's back.
        fake(&view)
            .store
            .update_by_id(&id, &TaskPatch::completed(true))
            .await
            .unwrap();

        view.begin_edit(&id).unwrap();
        view.set_draft("y");
        view.save_edit().await.unwrap();

        assert_eq!(view.tasks()[0].text, "y");
        assert!(!view.tasks()[0].completed);
    }

    #[tokio::test]
    async fn rejected_save_keeps_edit_mode() {
        let mut view = loaded_view(&["keep"]).await;
        let id = view.tasks()[0].id.clone();

        view.begin_edit(&id).unwrap();
        view.set_draft("   ");
        assert!(view.save_edit().await.is_err());

        assert_eq!(view.tasks()[0].text, "keep");
        assert_eq!(view.editing().map(|d| d.text.as_str()), Some("   "));
    }

    #[tokio::test]
    async fn save_without_edit_fails() {
        let mut view = loaded_view(&["a"]).await;
        assert!(matches!(
            view.save_edit().await,
            Err(ClientError::NotEditing)
        ));
    }

    #[tokio::test]
    async fn deleting_edited_task_leaves_edit_mode() {
        let mut view = loaded_view(&["a"]).await;
        let id = view.tasks()[0].id.clone();
        view.begin_edit(&id).unwrap();

        view.delete(&id).await.unwrap();
        assert_eq!(view.editing(), None);
    }
}

// ─── Render ─────────────────────────────────────────────────────────────────

mod render_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn one_line_per_task_with_marker_and_timestamp() {
        let mut view = loaded_view(&["open", "done"]).await;
        let id = view.tasks()[1].id.clone();
        view.toggle(&id).await.unwrap();

        let rendered = view.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[ ] open  (Created: "));
        assert!(lines[1].starts_with("[x] done  (Created: "));
        assert!(lines[1].ends_with(&id));
    }
}

fn fake<'a>(view: &'a TaskListView<FakeApi>) -> &'a FakeApi {
    view.api()
}

fn view_api_patches(view: &TaskListView<FakeApi>) -> Vec<TaskPatch> {
    fake(view).patches.lock().unwrap().clone()
}
