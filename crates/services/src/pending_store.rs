use std::sync::{Arc, Mutex};

use backend::TaskApi;
use taskboard_core::model::{PendingTask, TaskId, UserId};
use tracing::info;

use crate::Clock;
use crate::error::ServiceError;
use crate::lock;
use crate::notify::Notifier;
use crate::project_store::ProjectStore;

#[derive(Default)]
struct PendingState {
    tasks: Vec<PendingTask>,
    loading: bool,
}

/// Overdue tasks of the signed-in user.
#[derive(Clone)]
pub struct PendingTaskStore {
    clock: Clock,
    tasks: Arc<dyn TaskApi>,
    projects: Arc<ProjectStore>,
    notifier: Notifier,
    state: Arc<Mutex<PendingState>>,
}

impl PendingTaskStore {
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
            state: Arc::new(Mutex::new(PendingState::default())),
        }
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Backend` after reporting it; the list is kept.
    pub async fn refresh(&self, user_id: &UserId) -> Result<(), ServiceError> {
        lock(&self.state).loading = true;
        let result = self
            .tasks
            .pending_tasks(user_id)
            .await
            .map_err(ServiceError::from);
        let mut state = lock(&self.state);
        state.loading = false;
        match result {
            Ok(tasks) => {
                state.tasks = tasks;
                Ok(())
            }
            Err(err) => {
                drop(state);
                self.notifier.report("Error fetching pending tasks", &err);
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn tasks(&self) -> Vec<PendingTask> {
        lock(&self.state).tasks.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    /// Move a pending task to today as `todo`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Backend` after reporting it.
    pub async fn reassign_to_today(&self, id: &TaskId) -> Result<(), ServiceError> {
        let today = self.clock.today();
        let result = self
            .tasks
            .reassign_task(id, today)
            .await
            .map_err(ServiceError::from);
        self.notifier.capture("Error reassigning task", result)?;
        info!(%id, %today, "pending task reassigned");
        self.settle(id, "Task reassigned", "Task has been moved to today")
            .await;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Backend` after reporting it.
    pub async fn mark_completed(&self, id: &TaskId) -> Result<(), ServiceError> {
        let result = self
            .tasks
            .complete_task(id)
            .await
            .map_err(ServiceError::from);
        self.notifier.capture("Error completing task", result)?;
        self.settle(id, "Task completed", "Task has been marked as completed")
            .await;
        Ok(())
    }

    async fn settle(&self, id: &TaskId, title: &str, description: &str) {
        lock(&self.state).tasks.retain(|task| &task.id != id);
        self.notifier.success(title, description);
        // The project store reports its own failure.
        let _ = self.projects.refresh().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::InMemoryBackend;
    use chrono::Duration;
    use taskboard_core::model::{Project, ProjectId, Task, TaskStatus};
    use taskboard_core::time::fixed_clock;

    fn seeded() -> InMemoryBackend {
        let repo = InMemoryBackend::with_clock(fixed_clock());
        repo.seed_project(Project::new(ProjectId::new("p1"), "Website"))
            .unwrap();
        for id in ["t1", "t2"] {
            let mut task = Task::new(TaskId::new(id), ProjectId::new("p1"), id);
            task.due_date = Some(fixed_clock().today() - Duration::days(1));
            repo.seed_task(task).unwrap();
        }
        repo
    }

    fn store(repo: &InMemoryBackend) -> (PendingTaskStore, Arc<ProjectStore>) {
        let notifier = Notifier::new();
        let projects = Arc::new(ProjectStore::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            notifier.clone(),
        ));
        let store = PendingTaskStore::new(
            fixed_clock(),
            Arc::new(repo.clone()),
            Arc::clone(&projects),
            notifier,
        );
        (store, projects)
    }

    #[tokio::test]
    async fn reassign_moves_task_to_today_and_refreshes_projects() {
        let repo = seeded();
        let (store, projects) = store(&repo);
        let user = UserId::new("u1");
        store.refresh(&user).await.unwrap();
        assert_eq!(store.tasks().len(), 2);

        store.reassign_to_today(&TaskId::new("t1")).await.unwrap();
        assert_eq!(store.tasks().len(), 1);
        let moved = projects
            .tasks()
            .into_iter()
            .find(|task| task.id == TaskId::new("t1"))
            .unwrap();
        assert_eq!(moved.due_date, Some(fixed_clock().today()));
        assert_eq!(moved.status, TaskStatus::Todo);

        store.refresh(&user).await.unwrap();
        assert_eq!(store.tasks().len(), 1);
    }

    #[tokio::test]
    async fn completing_removes_from_pending() {
        let repo = seeded();
        let (store, _) = store(&repo);
        let user = UserId::new("u1");
        store.refresh(&user).await.unwrap();

        store.mark_completed(&TaskId::new("t2")).await.unwrap();
        store.refresh(&user).await.unwrap();
        let left: Vec<TaskId> = store.tasks().into_iter().map(|task| task.id).collect();
        assert_eq!(left, [TaskId::new("t1")]);
    }
}
