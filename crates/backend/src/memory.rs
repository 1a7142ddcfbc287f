use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use taskboard_core::Clock;
use taskboard_core::model::{
    NewProject, NewTask, PendingTask, Profile, ProfileId, Project, ProjectId, Task, TaskId,
    TaskStatus, User, UserForm, UserId,
};
use uuid::Uuid;

use crate::repository::{
    AuthApi, AuthToken, BackendError, Credentials, ProfileApi, ProfileUpdate, ProjectApi,
    TaskApi, TaskDetails, TaskPatch, UserApi,
};

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password: String,
}

/// Simple in-memory backend for tests and offline prototyping.
///
/// Tokens are checked only when resolving the current user.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    clock: Clock,
    token: AuthToken,
    accounts: Arc<Mutex<Vec<Account>>>,
    profiles: Arc<Mutex<Vec<Profile>>>,
    projects: Arc<Mutex<Vec<Project>>>,
    tasks: Arc<Mutex<Vec<Task>>>,
    sessions: Arc<Mutex<HashMap<String, UserId>>>,
}

fn poisoned(err: impl std::fmt::Display) -> BackendError {
    BackendError::Transport(err.to_string())
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    /// Token cell consulted by `current_user`.
    #[must_use]
    pub fn token(&self) -> AuthToken {
        self.token.clone()
    }

    /// Add an account with its profile.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Transport` if a lock is poisoned.
    pub fn seed_user(&self, user: User, password: &str) -> Result<(), BackendError> {
        let profile = Profile {
            id: ProfileId::new(format!("profile-{}", user.id)),
            user_id: user.id.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.created_at,
        };
        self.profiles.lock().map_err(poisoned)?.push(profile);
        self.accounts.lock().map_err(poisoned)?.push(Account {
            user,
            password: password.to_owned(),
        });
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `BackendError::Transport` if the lock is poisoned.
    pub fn seed_project(&self, project: Project) -> Result<(), BackendError> {
        self.projects.lock().map_err(poisoned)?.push(project);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `BackendError::Transport` if the lock is poisoned.
    pub fn seed_task(&self, task: Task) -> Result<(), BackendError> {
        self.tasks.lock().map_err(poisoned)?.push(task);
        Ok(())
    }

    /// Snapshot of stored tasks.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Transport` if the lock is poisoned.
    pub fn stored_tasks(&self) -> Result<Vec<Task>, BackendError> {
        Ok(self.tasks.lock().map_err(poisoned)?.clone())
    }

    /// Snapshot of stored projects, without tasks.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Transport` if the lock is poisoned.
    pub fn stored_projects(&self) -> Result<Vec<Project>, BackendError> {
        Ok(self.projects.lock().map_err(poisoned)?.clone())
    }

    fn with_task<F>(&self, id: &TaskId, apply: F) -> Result<(), BackendError>
    where
        F: FnOnce(&mut Task),
    {
        let mut guard = self.tasks.lock().map_err(poisoned)?;
        let task = guard
            .iter_mut()
            .find(|task| &task.id == id)
            .ok_or(BackendError::NotFound)?;
        apply(task);
        task.updated_at = Some(self.clock.now());
        Ok(())
    }

    fn insert_account(&self, form: &UserForm) -> Result<User, BackendError> {
        let mut accounts = self.accounts.lock().map_err(poisoned)?;
        if accounts
            .iter()
            .any(|account| account.user.email.eq_ignore_ascii_case(&form.email))
        {
            return Err(BackendError::Status {
                status: 409,
                message: Some("User already exists".into()),
            });
        }
        let user = User {
            id: UserId::new(new_id()),
            email: form.email.clone(),
            full_name: (!form.full_name.trim().is_empty()).then(|| form.full_name.clone()),
            role: form.role,
            created_at: Some(self.clock.now()),
        };
        accounts.push(Account {
            user: user.clone(),
            password: form.password.clone(),
        });
        drop(accounts);

        self.profiles.lock().map_err(poisoned)?.push(Profile {
            id: ProfileId::new(new_id()),
            user_id: user.id.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.created_at,
        });
        Ok(user)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AuthApi for InMemoryBackend {
    async fn login(&self, credentials: &Credentials) -> Result<String, BackendError> {
        let accounts = self.accounts.lock().map_err(poisoned)?;
        let account = accounts
            .iter()
            .find(|account| {
                account.user.email.eq_ignore_ascii_case(&credentials.email)
                    && account.password == credentials.password
            })
            .ok_or_else(|| BackendError::Status {
                status: 401,
                message: Some("Invalid email or password".into()),
            })?;
        let token = new_id();
        self.sessions
            .lock()
            .map_err(poisoned)?
            .insert(token.clone(), account.user.id.clone());
        Ok(token)
    }

    async fn register(&self, form: &UserForm) -> Result<(), BackendError> {
        self.insert_account(form).map(|_| ())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl UserApi for InMemoryBackend {
    async fn list_users(&self) -> Result<Vec<User>, BackendError> {
        let guard = self.accounts.lock().map_err(poisoned)?;
        Ok(guard.iter().map(|account| account.user.clone()).collect())
    }

    async fn current_user(&self) -> Result<User, BackendError> {
        let token = self.token.get().ok_or(BackendError::Unauthorized)?;
        let user_id = self
            .sessions
            .lock()
            .map_err(poisoned)?
            .get(&token)
            .cloned()
            .ok_or(BackendError::Unauthorized)?;
        let guard = self.accounts.lock().map_err(poisoned)?;
        guard
            .iter()
            .find(|account| account.user.id == user_id)
            .map(|account| account.user.clone())
            .ok_or(BackendError::Unauthorized)
    }

    async fn create_user(&self, form: &UserForm) -> Result<(), BackendError> {
        self.insert_account(form).map(|_| ())
    }

    async fn update_user(&self, id: &UserId, form: &UserForm) -> Result<(), BackendError> {
        let mut guard = self.accounts.lock().map_err(poisoned)?;
        let account = guard
            .iter_mut()
            .find(|account| &account.user.id == id)
            .ok_or(BackendError::NotFound)?;
        account.user.email = form.email.clone();
        account.user.full_name =
            (!form.full_name.trim().is_empty()).then(|| form.full_name.clone());
        account.user.role = form.role;
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), BackendError> {
        let mut guard = self.accounts.lock().map_err(poisoned)?;
        let before = guard.len();
        guard.retain(|account| &account.user.id != id);
        if guard.len() == before {
            return Err(BackendError::NotFound);
        }
        Ok(())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ProfileApi for InMemoryBackend {
    async fn profile_by_user(&self, user_id: &UserId) -> Result<Profile, BackendError> {
        let guard = self.profiles.lock().map_err(poisoned)?;
        guard
            .iter()
            .find(|profile| &profile.user_id == user_id)
            .cloned()
            .ok_or(BackendError::NotFound)
    }

    async fn update_profile(
        &self,
        id: &ProfileId,
        update: &ProfileUpdate,
    ) -> Result<(), BackendError> {
        let mut guard = self.profiles.lock().map_err(poisoned)?;
        let profile = guard
            .iter_mut()
            .find(|profile| &profile.id == id)
            .ok_or(BackendError::NotFound)?;
        if let Some(full_name) = &update.full_name {
            profile.full_name = Some(full_name.clone());
        }
        if let Some(role) = update.role {
            profile.role = role;
        }
        profile.updated_at = Some(self.clock.now());
        Ok(())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ProjectApi for InMemoryBackend {
    async fn list_projects(&self) -> Result<Vec<Project>, BackendError> {
        let guard = self.projects.lock().map_err(poisoned)?;
        Ok(guard
            .iter()
            .map(|project| Project {
                tasks: Vec::new(),
                ..project.clone()
            })
            .collect())
    }

    async fn create_project(&self, project: &NewProject) -> Result<ProjectId, BackendError> {
        let id = ProjectId::new(new_id());
        let mut created = Project::new(id.clone(), project.name.clone());
        created.description = project.description.clone();
        created.user_id = project.user_id.clone();
        created.created_at = Some(self.clock.now());
        self.projects.lock().map_err(poisoned)?.push(created);
        Ok(id)
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), BackendError> {
        let mut guard = self.projects.lock().map_err(poisoned)?;
        let before = guard.len();
        guard.retain(|project| &project.id != id);
        if guard.len() == before {
            return Err(BackendError::NotFound);
        }
        drop(guard);
        self.tasks
            .lock()
            .map_err(poisoned)?
            .retain(|task| &task.project_id != id);
        Ok(())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl TaskApi for InMemoryBackend {
    async fn list_tasks(&self) -> Result<Vec<Task>, BackendError> {
        Ok(self.tasks.lock().map_err(poisoned)?.clone())
    }

    async fn pending_tasks(&self, user_id: &UserId) -> Result<Vec<PendingTask>, BackendError> {
        let today = self.clock.today();
        let projects = self.projects.lock().map_err(poisoned)?.clone();
        let guard = self.tasks.lock().map_err(poisoned)?;
        Ok(guard
            .iter()
            .filter(|task| !task.is_completed())
            .filter(|task| task.due_date.is_some_and(|due| due < today))
            .filter_map(|task| {
                let project = projects
                    .iter()
                    .find(|project| project.id == task.project_id)?;
                let owned = project.user_id.as_ref().is_none_or(|owner| owner == user_id);
                owned.then(|| PendingTask {
                    id: task.id.clone(),
                    title: task.title.clone(),
                    project_name: project.name.clone(),
                    due_date: task.due_date,
                    priority: task.priority,
                    effort: task.effort,
                    status: task.status.as_wire().to_owned(),
                })
            })
            .collect())
    }

    async fn create_task(&self, task: &NewTask) -> Result<TaskId, BackendError> {
        let project_name = self
            .projects
            .lock()
            .map_err(poisoned)?
            .iter()
            .find(|project| project.id == task.project_id)
            .map(|project| project.name.clone())
            .ok_or(BackendError::NotFound)?;

        let id = TaskId::new(new_id());
        let mut created = Task::new(id.clone(), task.project_id.clone(), task.title.clone());
        created.effort = task.effort;
        created.priority = task.priority;
        created.status = task.status;
        created.difficulty_level = Some(task.difficulty_level);
        created.due_date = Some(task.due_date);
        created.created_at = Some(self.clock.now());
        created.project_name = project_name;
        self.tasks.lock().map_err(poisoned)?.push(created);
        Ok(id)
    }

    async fn patch_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<(), BackendError> {
        self.with_task(id, |task| {
            if let Some(status) = patch.status {
                task.status = status;
            }
            if let Some(progress) = &patch.progress {
                task.progress = Some(progress.clone());
            }
            if let Some(flag) = patch.continue_tomorrow {
                task.continue_tomorrow = flag;
            }
        })
    }

    async fn update_status(&self, id: &TaskId, status: TaskStatus) -> Result<(), BackendError> {
        self.with_task(id, |task| task.status = status)
    }

    async fn save_details(&self, id: &TaskId, details: &TaskDetails) -> Result<(), BackendError> {
        self.with_task(id, |task| {
            task.deliverable.clone_from(&details.deliverable);
            task.bottleneck.clone_from(&details.bottleneck);
        })
    }

    async fn continue_tomorrow(&self, id: &TaskId, progress: &str) -> Result<(), BackendError> {
        self.with_task(id, |task| task.mark_continue_tomorrow(progress))
    }

    async fn complete_task(&self, id: &TaskId) -> Result<(), BackendError> {
        self.with_task(id, |task| task.status = TaskStatus::Completed)
    }

    async fn reassign_task(&self, id: &TaskId, due_date: NaiveDate) -> Result<(), BackendError> {
        self.with_task(id, |task| {
            task.due_date = Some(due_date);
            task.status = TaskStatus::Todo;
        })
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), BackendError> {
        let mut guard = self.tasks.lock().map_err(poisoned)?;
        let before = guard.len();
        guard.retain(|task| &task.id != id);
        if guard.len() == before {
            return Err(BackendError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use taskboard_core::model::Role;
    use taskboard_core::time::{fixed_clock, fixed_now};

    fn seeded() -> InMemoryBackend {
        let repo = InMemoryBackend::with_clock(fixed_clock());
        repo.seed_user(
            User {
                id: UserId::new("u1"),
                email: "ana@corp.io".into(),
                full_name: Some("Ana".into()),
                role: Role::Se,
                created_at: Some(fixed_now()),
            },
            "secret1",
        )
        .unwrap();
        let mut project = Project::new(ProjectId::new("p1"), "Website");
        project.user_id = Some(UserId::new("u1"));
        repo.seed_project(project).unwrap();
        repo
    }

    #[tokio::test]
    async fn current_user_requires_issued_token() {
        let repo = seeded();
        assert!(matches!(
            repo.current_user().await,
            Err(BackendError::Unauthorized)
        ));

        let token = repo
            .login(&Credentials {
                email: "ana@corp.io".into(),
                password: "secret1".into(),
                role: None,
            })
            .await
            .unwrap();
        repo.token().set(Some(token));
        assert_eq!(repo.current_user().await.unwrap().id, UserId::new("u1"));

        repo.token().set(Some("forged".into()));
        assert!(repo.current_user().await.is_err());
    }

    #[tokio::test]
    async fn wrong_password_is_rejected_with_message() {
        let repo = seeded();
        let err = repo
            .login(&Credentials {
                email: "ana@corp.io".into(),
                password: "nope".into(),
                role: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.message(), Some("Invalid email or password"));
    }

    #[tokio::test]
    async fn pending_lists_overdue_open_tasks_of_owner() {
        let repo = seeded();
        let today = fixed_clock().today();

        let mut overdue = Task::new(TaskId::new("t1"), ProjectId::new("p1"), "late");
        overdue.due_date = Some(today - Duration::days(2));
        let mut done = Task::new(TaskId::new("t2"), ProjectId::new("p1"), "done");
        done.due_date = Some(today - Duration::days(2));
        done.status = TaskStatus::Completed;
        let mut current = Task::new(TaskId::new("t3"), ProjectId::new("p1"), "today");
        current.due_date = Some(today);
        for task in [overdue, done, current] {
            repo.seed_task(task).unwrap();
        }

        let pending = repo.pending_tasks(&UserId::new("u1")).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].title, "late");
        assert_eq!(pending[0].project_name, "Website");
        assert!(repo.pending_tasks(&UserId::new("other")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reassign_resets_status_and_due_date() {
        let repo = seeded();
        let mut task = Task::new(TaskId::new("t1"), ProjectId::new("p1"), "late");
        task.status = TaskStatus::Blocked;
        repo.seed_task(task).unwrap();

        let today = fixed_clock().today();
        repo.reassign_task(&TaskId::new("t1"), today).await.unwrap();
        let stored = repo.stored_tasks().unwrap();
        assert_eq!(stored[0].status, TaskStatus::Todo);
        assert_eq!(stored[0].due_date, Some(today));
    }

    #[tokio::test]
    async fn deleting_project_drops_its_tasks() {
        let repo = seeded();
        repo.seed_task(Task::new(TaskId::new("t1"), ProjectId::new("p1"), "x"))
            .unwrap();
        repo.delete_project(&ProjectId::new("p1")).await.unwrap();
        assert!(repo.stored_tasks().unwrap().is_empty());
        assert!(matches!(
            repo.delete_project(&ProjectId::new("p1")).await,
            Err(BackendError::NotFound)
        ));
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let repo = seeded();
        let form = UserForm {
            email: "ANA@corp.io".into(),
            full_name: String::new(),
            password: "secret1".into(),
            role: Role::Sce,
        };
        let err = repo.register(&form).await.unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 409, .. }));
    }
}
