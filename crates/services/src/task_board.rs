use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use backend::{BackendError, TaskApi, TaskDetails, TaskPatch};
use taskboard_core::model::{
    EodOutcome, MiddayStatus, NewTask, Task, TaskId, TaskStatus, UserId,
};
use taskboard_core::quick_add::{QuickAdd, QuickAddDefaults};
use taskboard_core::review::{ReviewMode, TaskCardState};
use taskboard_core::summary::Capacity;
use tracing::info;

use crate::Clock;
use crate::error::ServiceError;
use crate::lock;
use crate::notify::Notifier;
use crate::project_store::ProjectStore;

/// Client-only notes that survive re-fetches.
#[derive(Debug, Clone, Default)]
struct Annotation {
    goal: Option<String>,
    midday_status: Option<MiddayStatus>,
    eod_outcome: Option<EodOutcome>,
}

#[derive(Default)]
struct BoardState {
    mode: ReviewMode,
    cards: HashMap<TaskId, TaskCardState>,
    annotations: HashMap<TaskId, Annotation>,
}

/// Flattened task list with review mode, per-card state and task edits.
///
/// Tasks live in the [`ProjectStore`]; the board layers local annotations
/// and card state on top of them.
#[derive(Clone)]
pub struct TaskBoard {
    clock: Clock,
    tasks: Arc<dyn TaskApi>,
    projects: Arc<ProjectStore>,
    notifier: Notifier,
    state: Arc<Mutex<BoardState>>,
}

impl TaskBoard {
    #[must_use]
    pub fn new(
        clock: Clock,
        tasks: Arc<dyn TaskApi>,
        projects: Arc<ProjectStore>,
        notifier: Notifier,
    ) -> Self {
        Self {
            clock,
            tasks,
            projects,
            notifier,
            state: Arc::new(Mutex::new(BoardState::default())),
        }
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Backend` after the project store reported it.
    pub async fn refresh(&self) -> Result<(), ServiceError> {
        self.projects.refresh().await
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.projects.is_loading()
    }

    /// All tasks with their local annotations applied.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        let mut tasks = self.projects.tasks();
        let state = lock(&self.state);
        for task in &mut tasks {
            if let Some(note) = state.annotations.get(&task.id) {
                if let Some(goal) = &note.goal {
                    task.goal.clone_from(goal);
                }
                task.midday_status = note.midday_status;
                task.eod_outcome = note.eod_outcome;
            }
        }
        tasks
    }

    /// Tasks listed under the current review mode.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<Task> {
        let mode = self.mode();
        self.tasks()
            .into_iter()
            .filter(|task| mode.includes(task))
            .collect()
    }

    #[must_use]
    pub fn mode(&self) -> ReviewMode {
        lock(&self.state).mode
    }

    pub fn set_mode(&self, mode: ReviewMode) {
        lock(&self.state).mode = mode;
    }

    #[must_use]
    pub fn capacity(&self) -> Capacity {
        Capacity::from_tasks(&self.tasks())
    }

    #[must_use]
    pub fn quick_add_defaults(&self, user_email: Option<&str>) -> QuickAddDefaults {
        QuickAddDefaults::for_context(&self.projects.projects(), user_email)
    }

    //
    // ─── CARD STATE ───────────────────────────────────────────────────────────
    //

    /// Card state for a task, seeded from its saved notes on first access.
    #[must_use]
    pub fn card(&self, id: &TaskId) -> TaskCardState {
        if let Some(card) = lock(&self.state).cards.get(id) {
            return card.clone();
        }
        self.tasks()
            .iter()
            .find(|task| &task.id == id)
            .map(TaskCardState::from_task)
            .unwrap_or_default()
    }

    /// Edit the card state of one task.
    pub fn edit_card<F>(&self, id: &TaskId, apply: F)
    where
        F: FnOnce(&mut TaskCardState),
    {
        let mut card = self.card(id);
        apply(&mut card);
        lock(&self.state).cards.insert(id.clone(), card);
    }

    pub fn toggle_details(&self, id: &TaskId) {
        self.edit_card(id, |card| card.show_details = !card.show_details);
    }

    /// Open or close the carryover progress field.
    pub fn toggle_progress_field(&self, id: &TaskId) {
        self.edit_card(id, |card| card.show_progress_field = !card.show_progress_field);
    }

    //
    // ─── LOCAL ANNOTATIONS ────────────────────────────────────────────────────
    //

    pub fn set_midday_status(&self, id: &TaskId, status: MiddayStatus) {
        lock(&self.state)
            .annotations
            .entry(id.clone())
            .or_default()
            .midday_status = Some(status);
    }

    pub fn set_eod_outcome(&self, id: &TaskId, outcome: EodOutcome) {
        lock(&self.state)
            .annotations
            .entry(id.clone())
            .or_default()
            .eod_outcome = Some(outcome);
    }

    //
    // ─── BACKEND EDITS ────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `ServiceError` after reporting it.
    pub async fn update_status(&self, id: &TaskId, status: TaskStatus) -> Result<(), ServiceError> {
        let result = self.write(id, self.tasks.update_status(id, status)).await;
        self.notifier.capture("Error updating task", result)?;
        self.projects.update_task(id, |task| task.status = status);
        self.notifier
            .success("Task updated", format!("Status changed to {}", status.label()));
        Ok(())
    }

    /// Persist the deliverable and bottleneck drafts; blank drafts clear.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` after reporting it.
    pub async fn save_details(
        &self,
        id: &TaskId,
        deliverable: &str,
        bottleneck: &str,
    ) -> Result<(), ServiceError> {
        let details = TaskDetails::from_drafts(deliverable, bottleneck);
        let result = self.write(id, self.tasks.save_details(id, &details)).await;
        self.notifier.capture("Error saving details", result)?;
        self.projects
            .update_task(id, |task| task.set_details(deliverable, bottleneck));
        self.edit_card(id, |card| {
            card.deliverable = deliverable.to_owned();
            card.bottleneck = bottleneck.to_owned();
        });
        self.notifier.success("Details saved", "");
        Ok(())
    }

    /// Flag a task to roll over with a progress note.
    ///
    /// Marking an already flagged task overwrites the note and keeps the flag.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` after reporting it.
    pub async fn mark_continue_tomorrow(&self, id: &TaskId, progress: &str) -> Result<(), ServiceError> {
        let result = self
            .write(id, self.tasks.continue_tomorrow(id, progress))
            .await;
        self.notifier.capture("Error updating task", result)?;
        self.projects
            .update_task(id, |task| task.mark_continue_tomorrow(progress));
        self.edit_card(id, |card| {
            card.progress = progress.to_owned();
            card.show_progress_field = false;
        });
        info!(%id, "task carried over");
        self.notifier
            .success("Task updated", "Task will continue tomorrow");
        Ok(())
    }

    /// Edit the progress note of a carried-over task.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` after reporting it.
    pub async fn save_carryover_progress(&self, id: &TaskId, progress: &str) -> Result<(), ServiceError> {
        let patch = TaskPatch {
            progress: Some(progress.to_owned()),
            ..TaskPatch::default()
        };
        let result = self.write(id, self.tasks.patch_task(id, &patch)).await;
        self.notifier.capture("Error saving progress", result)?;
        self.projects
            .update_task(id, |task| task.progress = Some(progress.to_owned()));
        self.edit_card(id, |card| card.progress = progress.to_owned());
        self.notifier.success("Progress saved", "");
        Ok(())
    }

    /// Create a task from a parsed quick-add line.
    ///
    /// The project is created when missing. The task is appended locally and
    /// the projects are re-fetched afterwards.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` after reporting it.
    pub async fn add_task(
        &self,
        entry: QuickAdd,
        user_id: Option<UserId>,
    ) -> Result<TaskId, ServiceError> {
        let result = self.create_task(&entry, user_id).await;
        let id = self.notifier.capture("Error adding task", result)?;

        lock(&self.state).annotations.insert(
            id.clone(),
            Annotation {
                goal: Some(entry.goal.clone()),
                ..Annotation::default()
            },
        );
        self.notifier.success("Task added", entry.title);
        // The project store reports its own failure.
        let _ = self.projects.refresh().await;
        Ok(id)
    }

    async fn create_task(
        &self,
        entry: &QuickAdd,
        user_id: Option<UserId>,
    ) -> Result<TaskId, ServiceError> {
        let project_id = self
            .projects
            .ensure_project(&entry.project, &entry.goal, user_id)
            .await?;
        let new_task = NewTask {
            title: entry.title.clone(),
            project_id: project_id.clone(),
            effort: entry.effort,
            priority: entry.priority,
            status: TaskStatus::Todo,
            difficulty_level: entry.difficulty,
            due_date: self.clock.today(),
        };
        let id = self.tasks.create_task(&new_task).await?;
        info!(%id, project = %entry.project, "task created");

        let mut task = Task::new(id.clone(), project_id, new_task.title);
        task.effort = new_task.effort;
        task.priority = new_task.priority;
        task.difficulty_level = Some(new_task.difficulty_level);
        task.due_date = Some(new_task.due_date);
        task.project_name.clone_from(&entry.project);
        task.goal.clone_from(&entry.goal);
        self.projects.push_task(task);
        Ok(id)
    }

    /// Run a backend write for a task that is on the board.
    async fn write<F>(&self, id: &TaskId, call: F) -> Result<(), ServiceError>
    where
        F: Future<Output = Result<(), BackendError>>,
    {
        if !self.projects.has_task(id) {
            return Err(ServiceError::UnknownTask(id.to_string()));
        }
        call.await.map_err(ServiceError::from)
    }

    /// # Errors
    ///
    /// Returns `ServiceError` after reporting it.
    pub async fn delete_task(&self, id: &TaskId) -> Result<(), ServiceError> {
        self.projects.delete_task(id).await?;
        let mut state = lock(&self.state);
        state.cards.remove(id);
        state.annotations.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::InMemoryBackend;
    use taskboard_core::model::{Effort, Project, ProjectId};
    use taskboard_core::quick_add::parse_quick_add;
    use taskboard_core::time::fixed_clock;

    fn board(repo: &InMemoryBackend) -> (TaskBoard, Notifier) {
        let notifier = Notifier::new();
        let projects = Arc::new(ProjectStore::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            notifier.clone(),
        ));
        let board = TaskBoard::new(fixed_clock(), Arc::new(repo.clone()), projects, notifier.clone());
        (board, notifier)
    }

    fn seeded() -> InMemoryBackend {
        let repo = InMemoryBackend::with_clock(fixed_clock());
        repo.seed_project(Project::new(ProjectId::new("p1"), "Website"))
            .unwrap();
        repo.seed_task(Task::new(TaskId::new("t1"), ProjectId::new("p1"), "Header"))
            .unwrap();
        repo.seed_task(Task::new(TaskId::new("t2"), ProjectId::new("p1"), "Footer"))
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn carryover_mode_lists_flagged_tasks_only() {
        let repo = seeded();
        let (board, _) = board(&repo);
        board.refresh().await.unwrap();

        board.set_mode(ReviewMode::Midday);
        board
            .mark_continue_tomorrow(&TaskId::new("t2"), "styles done")
            .await
            .unwrap();
        assert_eq!(board.visible_tasks().len(), 2);

        board.set_mode(ReviewMode::Carryover);
        let visible = board.visible_tasks();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].progress.as_deref(), Some("styles done"));
    }

    #[tokio::test]
    async fn annotations_survive_refresh() {
        let repo = seeded();
        let (board, _) = board(&repo);
        board.refresh().await.unwrap();

        board.set_midday_status(&TaskId::new("t1"), MiddayStatus::AtRisk);
        board.set_eod_outcome(&TaskId::new("t1"), EodOutcome::Partial);
        board.refresh().await.unwrap();

        let task = board
            .tasks()
            .into_iter()
            .find(|task| task.id == TaskId::new("t1"))
            .unwrap();
        assert_eq!(task.midday_status, Some(MiddayStatus::AtRisk));
        assert_eq!(task.eod_outcome, Some(EodOutcome::Partial));
        assert_eq!(repo.stored_tasks().unwrap()[0].midday_status, None);
    }

    #[tokio::test]
    async fn card_state_toggles_and_seeds() {
        let repo = seeded();
        let (board, _) = board(&repo);
        board.refresh().await.unwrap();
        let id = TaskId::new("t1");

        assert!(!board.card(&id).show_details);
        board.toggle_details(&id);
        assert!(board.card(&id).show_details);
        board.toggle_progress_field(&id);
        assert!(board.card(&id).progress_field_visible(ReviewMode::EndOfDay));

        board.save_details(&id, "PR", "  ").await.unwrap();
        assert_eq!(board.card(&id).deliverable, "PR");
        let task = &board.tasks()[0];
        assert_eq!(task.deliverable.as_deref(), Some("PR"));
        assert!(task.bottleneck.is_none());
    }

    #[tokio::test]
    async fn add_task_creates_missing_project() {
        let repo = seeded();
        let (board, notifier) = board(&repo);
        board.refresh().await.unwrap();

        let defaults = board.quick_add_defaults(None);
        assert_eq!(defaults.project, "Website");
        let entry = parse_quick_add("Draft deck #marketing @launch ^L", &defaults).unwrap();
        let id = board.add_task(entry, None).await.unwrap();

        let projects = repo.stored_projects().unwrap();
        assert!(projects.iter().any(|project| project.name == "marketing"));
        let task = board
            .tasks()
            .into_iter()
            .find(|task| task.id == id)
            .unwrap();
        assert_eq!(task.project_name, "marketing");
        assert_eq!(task.goal, "launch");
        assert_eq!(task.effort, Effort::Large);
        assert_eq!(task.due_date, Some(fixed_clock().today()));
        assert_eq!(notifier.drain().len(), 1);
    }

    #[tokio::test]
    async fn status_change_updates_capacity() {
        let repo = seeded();
        let (board, _) = board(&repo);
        board.refresh().await.unwrap();

        board
            .update_status(&TaskId::new("t1"), TaskStatus::Completed)
            .await
            .unwrap();
        let capacity = board.capacity();
        assert_eq!(capacity.planned_tasks, 2);
        assert_eq!(capacity.completed_tasks, 1);
        assert_eq!(repo.stored_tasks().unwrap()[0].status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn writes_to_tasks_off_the_board_are_refused() {
        let repo = seeded();
        let (fresh, _) = board(&repo);
        let (board, notifier) = board(&repo);
        board.refresh().await.unwrap();

        let err = board
            .update_status(&TaskId::new("ghost"), TaskStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnknownTask(ref id) if id == "ghost"));
        let notes = notifier.drain();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].description, "Task no longer exists");

        // Not loaded yet: the backend is not asked to change anything.
        assert!(
            fresh
                .mark_continue_tomorrow(&TaskId::new("t1"), "later")
                .await
                .is_err()
        );
        assert!(!repo.stored_tasks().unwrap()[0].continue_tomorrow);
    }
}
