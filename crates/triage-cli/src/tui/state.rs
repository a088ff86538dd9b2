//! Session state and the actions that mutate it.
//!
//! Every store-touching action ends with a full re-read of the task list,
//! so the snapshot held here is never patched in place.

use tui_input::Input;

use triage_classifier::{PriorityClassifier, Suggestion};
use triage_core::entities::Task;
use triage_core::enums::{Priority, TaskStatus};
use triage_core::validation::{EMPTY_DESCRIPTION, validate_description};
use triage_db::error::DatabaseError;
use triage_db::service::TaskStore;
use triage_db::updates::task::TaskUpdateBuilder;

pub const STORAGE_FAILURE: &str = "Something went wrong talking to the task database";
pub const UPDATED: &str = "Task updated successfully!";
pub const NO_API_KEY: &str = "No OPENAI_API_KEY found; using keyword prioritization";
pub const OFFLINE: &str = "Offline mode; using keyword prioritization";
pub const REMOTE_UNAVAILABLE: &str =
    "Remote classifier unavailable (see log); using keyword prioritization";

/// How priorities will be suggested this session, and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierMode {
    /// Remote stage first, keywords on failure.
    Remote,
    /// `--offline` was given.
    Offline,
    /// No API key configured.
    #[default]
    NoKey,
    /// A key is configured but the remote stage could not be built.
    Unavailable,
}

impl ClassifierMode {
    /// Startup notice explaining a keyword-only session.
    pub const fn notice_text(self) -> Option<&'static str> {
        match self {
            Self::Remote => None,
            Self::Offline => Some(OFFLINE),
            Self::NoKey => Some(NO_API_KEY),
            Self::Unavailable => Some(REMOTE_UNAVAILABLE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }
}

/// Which part of the page receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Description,
    Priority,
    List,
}

/// The add-task form.
#[derive(Debug, Default)]
pub struct NewTaskForm {
    pub input: Input,
    pub suggestion: Option<Suggestion>,
    /// Selected priority. `None` until a suggestion arrives or the user picks.
    pub priority: Option<Priority>,
    overridden: bool,
}

impl NewTaskForm {
    /// The description changed, so any earlier suggestion no longer applies.
    pub fn description_changed(&mut self) {
        self.suggestion = None;
        if !self.overridden {
            self.priority = None;
        }
    }

    pub fn cycle_priority(&mut self) {
        self.priority = Some(self.priority.unwrap_or_default().toggled());
        self.overridden = true;
    }

    fn apply_suggestion(&mut self, suggestion: Suggestion) {
        self.suggestion = Some(suggestion);
        if !self.overridden {
            self.priority = Some(suggestion.priority);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditField {
    #[default]
    Description,
    Priority,
    Status,
}

impl EditField {
    pub const fn next(self) -> Self {
        match self {
            Self::Description => Self::Priority,
            Self::Priority => Self::Status,
            Self::Status => Self::Description,
        }
    }
}

/// In-progress edit of a single task.
#[derive(Debug)]
pub struct EditForm {
    pub id: i64,
    pub input: Input,
    pub priority: Priority,
    pub status: TaskStatus,
    pub field: EditField,
    pub error: Option<String>,
}

impl EditForm {
    fn for_task(task: &Task) -> Self {
        Self {
            id: task.id,
            input: Input::new(task.description.clone()),
            priority: task.priority,
            status: task.status,
            field: EditField::Description,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub total: usize,
    pub urgent: usize,
    pub completed: usize,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub tasks: Vec<Task>,
    pub selected: usize,
    pub focus: Focus,
    pub form: NewTaskForm,
    pub editing: Option<EditForm>,
    pub notice: Option<Notice>,
    pub show_help: bool,
    pub mode: ClassifierMode,
}

impl AppState {
    pub fn new(mode: ClassifierMode) -> Self {
        Self {
            notice: mode.notice_text().map(Notice::info),
            mode,
            ..Self::default()
        }
    }

    pub fn remote_enabled(&self) -> bool {
        self.mode == ClassifierMode::Remote
    }

    pub fn counters(&self) -> Counters {
        Counters {
            total: self.tasks.len(),
            urgent: self.tasks.iter().filter(|t| t.is_urgent()).count(),
            completed: self.tasks.iter().filter(|t| t.is_completed()).count(),
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    pub const fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Replace the snapshot with the store's current contents.
    pub async fn refresh(&mut self, store: &TaskStore) {
        match store.list_tasks().await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.selected = self.selected.min(self.tasks.len().saturating_sub(1));
            }
            Err(error) => self.storage_failure(&error),
        }
    }

    /// Ask the classifier about the current description and preselect its
    /// answer.
    pub async fn suggest(&mut self, classifier: &PriorityClassifier) {
        let Ok(description) = validate_description(self.form.input.value()) else {
            self.notice = Some(Notice::error(EMPTY_DESCRIPTION));
            return;
        };
        let suggestion = classifier.suggest(description).await;
        tracing::debug!(
            priority = %suggestion.priority,
            source = %suggestion.source,
            "priority suggested"
        );
        self.form.apply_suggestion(suggestion);
        self.notice = None;
        self.focus = Focus::Priority;
    }

    /// Persist the form as a new Pending task. Without a selected priority,
    /// the classifier decides.
    pub async fn add_task(&mut self, store: &TaskStore, classifier: &PriorityClassifier) {
        let description = match validate_description(self.form.input.value()) {
            Ok(description) => description.to_string(),
            Err(_) => {
                self.notice = Some(Notice::error(EMPTY_DESCRIPTION));
                return;
            }
        };

        let priority = match self.form.priority {
            Some(priority) => priority,
            None => {
                let suggestion = classifier.suggest(&description).await;
                self.form.apply_suggestion(suggestion);
                suggestion.priority
            }
        };

        match store
            .add_task(&description, priority, TaskStatus::Pending)
            .await
        {
            Ok(_) => {
                self.form = NewTaskForm::default();
                self.focus = Focus::Description;
                // The new task lists first.
                self.selected = 0;
                self.notice = Some(Notice::success(format!(
                    "Task added with priority: {priority}"
                )));
                self.refresh(store).await;
            }
            Err(error) => self.storage_failure(&error),
        }
    }

    pub async fn toggle_selected_status(&mut self, store: &TaskStore) {
        let Some(id) = self.selected_task().map(|t| t.id) else {
            return;
        };
        match store.toggle_status(id).await {
            Ok(_) => self.refresh(store).await,
            Err(error) => self.storage_failure(&error),
        }
    }

    pub async fn toggle_selected_priority(&mut self, store: &TaskStore) {
        let Some(id) = self.selected_task().map(|t| t.id) else {
            return;
        };
        match store.toggle_priority(id).await {
            Ok(_) => self.refresh(store).await,
            Err(error) => self.storage_failure(&error),
        }
    }

    pub async fn delete_selected(&mut self, store: &TaskStore) {
        let Some(id) = self.selected_task().map(|t| t.id) else {
            return;
        };
        if self.editing.as_ref().is_some_and(|e| e.id == id) {
            self.editing = None;
        }
        match store.delete_task(id).await {
            Ok(()) => self.refresh(store).await,
            Err(error) => self.storage_failure(&error),
        }
    }

    /// Start editing the selected task, replacing any edit in progress.
    pub fn begin_edit(&mut self) {
        if let Some(task) = self.selected_task() {
            self.editing = Some(EditForm::for_task(task));
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Write all three edited fields. An empty description keeps the form
    /// open with an inline error.
    pub async fn save_edit(&mut self, store: &TaskStore) {
        let Some(edit) = self.editing.as_mut() else {
            return;
        };
        let description = match validate_description(edit.input.value()) {
            Ok(description) => description.to_string(),
            Err(_) => {
                edit.error = Some(EMPTY_DESCRIPTION.to_string());
                return;
            }
        };

        let update = TaskUpdateBuilder::new()
            .description(description)
            .priority(edit.priority)
            .status(edit.status)
            .build();
        let id = edit.id;

        match store.update_task(id, update).await {
            Ok(()) => {
                self.editing = None;
                self.notice = Some(Notice::success(UPDATED));
                self.refresh(store).await;
            }
            Err(error) => self.storage_failure(&error),
        }
    }

    fn storage_failure(&mut self, error: &DatabaseError) {
        tracing::error!(%error, "task store operation failed");
        self.notice = Some(Notice::error(STORAGE_FAILURE));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn test_store() -> TaskStore {
        TaskStore::new_local(":memory:").await.unwrap()
    }

    fn type_description(state: &mut AppState, text: &str) {
        state.form.input = Input::new(text.to_string());
        state.form.description_changed();
    }

    #[tokio::test]
    async fn add_without_override_uses_suggestion() {
        let store = test_store().await;
        let classifier = PriorityClassifier::offline();
        let mut state = AppState::new(ClassifierMode::NoKey);

        type_description(&mut state, "Call client today");
        state.add_task(&store, &classifier).await;

        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks[0].priority, Priority::Urgent);
        assert_eq!(state.tasks[0].status, TaskStatus::Pending);
        assert_eq!(
            state.notice,
            Some(Notice::success("Task added with priority: Urgent"))
        );
        assert!(state.form.input.value().is_empty());
    }

    #[tokio::test]
    async fn override_beats_suggestion() {
        let store = test_store().await;
        let classifier = PriorityClassifier::offline();
        let mut state = AppState::new(ClassifierMode::NoKey);

        type_description(&mut state, "Call client today");
        state.suggest(&classifier).await;
        assert_eq!(state.form.priority, Some(Priority::Urgent));
        assert_eq!(state.focus, Focus::Priority);

        state.form.cycle_priority();
        state.add_task(&store, &classifier).await;

        assert_eq!(state.tasks[0].priority, Priority::Normal);
    }

    #[tokio::test]
    async fn editing_description_clears_stale_suggestion() {
        let classifier = PriorityClassifier::offline();
        let mut state = AppState::new(ClassifierMode::NoKey);

        type_description(&mut state, "urgent fix");
        state.suggest(&classifier).await;
        assert!(state.form.suggestion.is_some());

        type_description(&mut state, "water plants");
        assert!(state.form.suggestion.is_none());
        assert_eq!(state.form.priority, None);
    }

    #[tokio::test]
    async fn blank_description_is_rejected_inline() {
        let store = test_store().await;
        let classifier = PriorityClassifier::offline();
        let mut state = AppState::new(ClassifierMode::Remote);

        type_description(&mut state, "   ");
        state.add_task(&store, &classifier).await;

        assert!(store.list_tasks().await.unwrap().is_empty());
        assert_eq!(state.notice, Some(Notice::error(EMPTY_DESCRIPTION)));

        state.suggest(&classifier).await;
        assert!(state.form.suggestion.is_none());
    }

    #[tokio::test]
    async fn toggles_and_delete_refresh_snapshot() {
        let store = test_store().await;
        let classifier = PriorityClassifier::offline();
        let mut state = AppState::new(ClassifierMode::NoKey);

        type_description(&mut state, "water plants");
        state.add_task(&store, &classifier).await;

        state.toggle_selected_status(&store).await;
        assert_eq!(state.tasks[0].status, TaskStatus::Completed);
        state.toggle_selected_priority(&store).await;
        assert_eq!(state.tasks[0].priority, Priority::Urgent);

        let counters = state.counters();
        assert_eq!(
            counters,
            Counters {
                total: 1,
                urgent: 1,
                completed: 1
            }
        );

        state.delete_selected(&store).await;
        assert!(state.tasks.is_empty());
        assert_eq!(state.counters().total, 0);
    }

    #[tokio::test]
    async fn only_one_task_is_edited_at_a_time() {
        let store = test_store().await;
        let classifier = PriorityClassifier::offline();
        let mut state = AppState::new(ClassifierMode::NoKey);

        for text in ["first", "second"] {
            type_description(&mut state, text);
            state.add_task(&store, &classifier).await;
        }

        state.selected = 0;
        state.begin_edit();
        let first_id = state.editing.as_ref().unwrap().id;
        state.selected = 1;
        state.begin_edit();
        let second_id = state.editing.as_ref().unwrap().id;

        assert_ne!(first_id, second_id);
        assert_eq!(second_id, state.tasks[1].id);
    }

    #[tokio::test]
    async fn save_edit_writes_all_fields() {
        let store = test_store().await;
        let classifier = PriorityClassifier::offline();
        let mut state = AppState::new(ClassifierMode::NoKey);

        type_description(&mut state, "draft");
        state.add_task(&store, &classifier).await;
        state.begin_edit();
        {
            let edit = state.editing.as_mut().unwrap();
            edit.input = Input::new("final".into());
            edit.priority = Priority::Urgent;
            edit.status = TaskStatus::Completed;
        }
        state.save_edit(&store).await;

        assert!(state.editing.is_none());
        assert_eq!(state.notice, Some(Notice::success(UPDATED)));
        let task = &state.tasks[0];
        assert_eq!(task.description, "final");
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn save_edit_rejects_blank_description() {
        let store = test_store().await;
        let classifier = PriorityClassifier::offline();
        let mut state = AppState::new(ClassifierMode::NoKey);

        type_description(&mut state, "keep me");
        state.add_task(&store, &classifier).await;
        state.begin_edit();
        state.editing.as_mut().unwrap().input = Input::new(String::new());
        state.save_edit(&store).await;

        let edit = state.editing.as_ref().expect("edit stays open");
        assert_eq!(edit.error.as_deref(), Some(EMPTY_DESCRIPTION));
        assert_eq!(
            store.list_tasks().await.unwrap()[0].description,
            "keep me"
        );
    }

    #[tokio::test]
    async fn cancel_clears_edit() {
        let store = test_store().await;
        let classifier = PriorityClassifier::offline();
        let mut state = AppState::new(ClassifierMode::NoKey);

        type_description(&mut state, "task");
        state.add_task(&store, &classifier).await;
        state.begin_edit();
        state.cancel_edit();
        assert!(state.editing.is_none());
    }

    #[test]
    fn startup_notice_names_the_reason() {
        assert_eq!(
            AppState::new(ClassifierMode::NoKey).notice,
            Some(Notice::info(NO_API_KEY))
        );
        assert_eq!(
            AppState::new(ClassifierMode::Offline).notice,
            Some(Notice::info(OFFLINE))
        );
        assert_eq!(
            AppState::new(ClassifierMode::Unavailable).notice,
            Some(Notice::info(REMOTE_UNAVAILABLE))
        );
        assert_eq!(AppState::new(ClassifierMode::Remote).notice, None);
    }

    #[tokio::test]
    async fn add_selects_the_new_task() {
        let store = test_store().await;
        let classifier = PriorityClassifier::offline();
        let mut state = AppState::new(ClassifierMode::Offline);

        for text in ["older", "old"] {
            type_description(&mut state, text);
            state.add_task(&store, &classifier).await;
        }
        state.selected = 1;

        type_description(&mut state, "newest");
        state.add_task(&store, &classifier).await;

        assert_eq!(state.selected, 0);
        assert_eq!(
            state.selected_task().map(|t| t.description.as_str()),
            Some("newest")
        );
    }

    #[tokio::test]
    async fn storage_failure_shows_generic_notice() {
        let store = test_store().await;
        let classifier = PriorityClassifier::offline();
        let mut state = AppState::new(ClassifierMode::Offline);

        type_description(&mut state, "kept in snapshot");
        state.add_task(&store, &classifier).await;
        let snapshot = state.tasks.clone();

        store
            .db()
            .conn()
            .execute("DROP TABLE tasks", ())
            .await
            .unwrap();

        type_description(&mut state, "Call client today");
        state.add_task(&store, &classifier).await;
        assert_eq!(state.notice, Some(Notice::error(STORAGE_FAILURE)));
        assert_eq!(state.tasks, snapshot);
        // The form keeps the text so the user can retry.
        assert_eq!(state.form.input.value(), "Call client today");

        state.notice = None;
        state.toggle_selected_status(&store).await;
        assert_eq!(state.notice, Some(Notice::error(STORAGE_FAILURE)));

        state.notice = None;
        state.refresh(&store).await;
        assert_eq!(state.notice, Some(Notice::error(STORAGE_FAILURE)));
        assert_eq!(state.tasks, snapshot);
    }

    #[test]
    fn selection_is_clamped() {
        let mut state = AppState::new(ClassifierMode::Remote);
        state.select_next();
        assert_eq!(state.selected, 0);
        state.select_prev();
        assert_eq!(state.selected, 0);
    }
}
