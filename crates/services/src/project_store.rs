use std::sync::{Arc, Mutex};

use backend::{ProjectApi, TaskApi};
use taskboard_core::model::{
    NewProject, Project, ProjectId, Task, TaskId, UserId, attach_tasks, flatten_tasks,
};
use taskboard_core::summary::{TaskTotals, UserWorkload, WeeklyGoal, weekly_goals};
use tracing::{info, warn};

use crate::error::ServiceError;
use crate::lock;
use crate::notify::Notifier;

#[derive(Default)]
struct ProjectState {
    projects: Vec<Project>,
    loading: bool,
}

/// Projects with their tasks attached, fetched from two endpoints.
#[derive(Clone)]
pub struct ProjectStore {
    projects: Arc<dyn ProjectApi>,
    tasks: Arc<dyn TaskApi>,
    notifier: Notifier,
    state: Arc<Mutex<ProjectState>>,
}

impl ProjectStore {
    #[must_use]
    pub fn new(projects: Arc<dyn ProjectApi>, tasks: Arc<dyn TaskApi>, notifier: Notifier) -> Self {
        Self {
            projects,
            tasks,
            notifier,
            state: Arc::new(Mutex::new(ProjectState::default())),
        }
    }

    /// Re-fetch projects and tasks and merge them.
    ///
    /// On failure the previously loaded projects are kept.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Backend` after reporting it.
    pub async fn refresh(&self) -> Result<(), ServiceError> {
        lock(&self.state).loading = true;
        let result = self.fetch().await;
        let mut state = lock(&self.state);
        state.loading = false;
        match result {
            Ok(projects) => {
                info!(count = projects.len(), "projects loaded");
                state.projects = projects;
                Ok(())
            }
            Err(err) => {
                drop(state);
                self.notifier.report("Error fetching projects", &err);
                Err(err)
            }
        }
    }

    /// Re-fetch for screens where projects are secondary; a failure is only
    /// logged and the loaded projects are kept.
    pub async fn refresh_quietly(&self) {
        lock(&self.state).loading = true;
        let result = self.fetch().await;
        let mut state = lock(&self.state);
        state.loading = false;
        match result {
            Ok(projects) => state.projects = projects,
            Err(err) => warn!(error = %err, "projects unavailable"),
        }
    }

    async fn fetch(&self) -> Result<Vec<Project>, ServiceError> {
        let projects = self.projects.list_projects().await?;
        let tasks = self.tasks.list_tasks().await?;
        Ok(attach_tasks(projects, &tasks))
    }

    #[must_use]
    pub fn projects(&self) -> Vec<Project> {
        lock(&self.state).projects.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    /// Every task of every project, in project order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        flatten_tasks(&lock(&self.state).projects)
    }

    #[must_use]
    pub fn totals(&self) -> TaskTotals {
        TaskTotals::from_projects(&lock(&self.state).projects)
    }

    #[must_use]
    pub fn workload_of(&self, user_id: &UserId) -> UserWorkload {
        UserWorkload::of(&lock(&self.state).projects, user_id)
    }

    #[must_use]
    pub fn weekly_goals(&self) -> Vec<WeeklyGoal> {
        weekly_goals(&lock(&self.state).projects)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<ProjectId> {
        lock(&self.state)
            .projects
            .iter()
            .find(|project| project.name == name)
            .map(|project| project.id.clone())
    }

    /// Resolve a project by name, creating it when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Backend` if the project cannot be created.
    pub async fn ensure_project(
        &self,
        name: &str,
        goal: &str,
        user_id: Option<UserId>,
    ) -> Result<ProjectId, ServiceError> {
        if let Some(id) = self.find_by_name(name) {
            return Ok(id);
        }
        let new_project = NewProject::named(name, goal, user_id);
        let id = self.projects.create_project(&new_project).await?;
        info!(%id, name, "project created");

        let mut created = Project::new(id.clone(), new_project.name);
        created.description = new_project.description;
        created.user_id = new_project.user_id;
        lock(&self.state).projects.push(created);
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Backend` after reporting it.
    pub async fn delete_project(&self, id: &ProjectId) -> Result<(), ServiceError> {
        let result = self.projects.delete_project(id).await;
        self.notifier
            .capture("Error deleting project", result.map_err(ServiceError::from))?;
        lock(&self.state).projects.retain(|project| &project.id != id);
        self.notifier.success("Project deleted", "");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Backend` after reporting it.
    pub async fn delete_task(&self, id: &TaskId) -> Result<(), ServiceError> {
        let result = self.tasks.delete_task(id).await;
        self.notifier
            .capture("Error deleting task", result.map_err(ServiceError::from))?;
        for project in &mut lock(&self.state).projects {
            project.tasks.retain(|task| &task.id != id);
        }
        self.notifier.success("Task deleted", "");
        Ok(())
    }

    pub(crate) fn has_task(&self, id: &TaskId) -> bool {
        lock(&self.state)
            .projects
            .iter()
            .flat_map(|project| project.tasks.iter())
            .any(|task| &task.id == id)
    }

    /// Apply a local edit to one task; a task that is gone is left alone.
    pub(crate) fn update_task<F>(&self, id: &TaskId, apply: F)
    where
        F: FnOnce(&mut Task),
    {
        let mut state = lock(&self.state);
        if let Some(task) = state
            .projects
            .iter_mut()
            .flat_map(|project| project.tasks.iter_mut())
            .find(|task| &task.id == id)
        {
            apply(task);
        }
    }

    /// Append a task optimistically to its project.
    pub(crate) fn push_task(&self, task: Task) {
        let mut state = lock(&self.state);
        if let Some(project) = state
            .projects
            .iter_mut()
            .find(|project| project.id == task.project_id)
        {
            project.tasks.push(task);
        }
    }
}
