use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use taskboard_core::model::{
    NewProject, NewTask, PendingTask, Profile, ProfileId, Project, ProjectId, Role, Task, TaskId,
    TaskStatus, User, UserForm, UserId,
};
use thiserror::Error;

use crate::config::ApiConfig;
use crate::http::HttpBackend;
use crate::memory::InMemoryBackend;

/// Errors surfaced by backend adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("not found")]
    NotFound,
}

impl BackendError {
    /// Message reported by the backend, if it sent one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            BackendError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Malformed(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

/// Bearer token shared by the HTTP adapter and the auth service.
#[derive(Clone, Default)]
pub struct AuthToken(Arc<RwLock<Option<String>>>);

impl AuthToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.0.read().ok().and_then(|guard| guard.clone())
    }

    pub fn set(&self, token: Option<String>) {
        if let Ok(mut guard) = self.0.write() {
            *guard = token;
        }
    }
}

//
// ─── REQUEST BODIES ───────────────────────────────────────────────────────────
//

/// Body of `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Body of `PUT /profiles/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Body of `PATCH /tasks/{id}/details`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskDetails {
    pub deliverable: Option<String>,
    pub bottleneck: Option<String>,
}

impl TaskDetails {
    /// Blank drafts are sent as `null`.
    #[must_use]
    pub fn from_drafts(deliverable: &str, bottleneck: &str) -> Self {
        let non_blank = |value: &str| (!value.trim().is_empty()).then(|| value.to_owned());
        Self {
            deliverable: non_blank(deliverable),
            bottleneck: non_blank(bottleneck),
        }
    }
}

/// Body of the generic `PATCH /tasks/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continue_tomorrow: Option<bool>,
}

//
// ─── CONTRACT ─────────────────────────────────────────────────────────────────
//

/// Login and registration; the only unauthenticated calls.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Status` when the backend rejects the credentials,
    /// or `BackendError::Malformed` when no token is present in the response.
    async fn login(&self, credentials: &Credentials) -> Result<String, BackendError>;

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the backend refuses the registration.
    async fn register(&self, form: &UserForm) -> Result<(), BackendError>;
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait UserApi: Send + Sync {
    /// Fetch the team roster.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or status failures. Malformed
    /// collections are coerced, not reported.
    async fn list_users(&self) -> Result<Vec<User>, BackendError>;

    /// Resolve the user owning the current token.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Unauthorized` when the token is rejected.
    async fn current_user(&self) -> Result<User, BackendError>;

    /// # Errors
    ///
    /// Returns `BackendError` if the user cannot be created.
    async fn create_user(&self, form: &UserForm) -> Result<(), BackendError>;

    /// # Errors
    ///
    /// Returns `BackendError` if the user cannot be updated.
    async fn update_user(&self, id: &UserId, form: &UserForm) -> Result<(), BackendError>;

    /// # Errors
    ///
    /// Returns `BackendError` if the user cannot be deleted.
    async fn delete_user(&self, id: &UserId) -> Result<(), BackendError>;
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ProfileApi: Send + Sync {
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` or a status error when no profile exists.
    async fn profile_by_user(&self, user_id: &UserId) -> Result<Profile, BackendError>;

    /// # Errors
    ///
    /// Returns `BackendError` if the profile cannot be updated.
    async fn update_profile(
        &self,
        id: &ProfileId,
        update: &ProfileUpdate,
    ) -> Result<(), BackendError>;
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ProjectApi: Send + Sync {
    /// Projects without their tasks.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or status failures.
    async fn list_projects(&self) -> Result<Vec<Project>, BackendError>;

    /// # Errors
    ///
    /// Returns `BackendError::Malformed` if the response carries no id.
    async fn create_project(&self, project: &NewProject) -> Result<ProjectId, BackendError>;

    /// # Errors
    ///
    /// Returns `BackendError` if the project cannot be deleted.
    async fn delete_project(&self, id: &ProjectId) -> Result<(), BackendError>;
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait TaskApi: Send + Sync {
    /// # Errors
    ///
    /// Returns `BackendError` on transport or status failures.
    async fn list_tasks(&self) -> Result<Vec<Task>, BackendError>;

    /// Overdue tasks of a user.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or status failures.
    async fn pending_tasks(&self, user_id: &UserId) -> Result<Vec<PendingTask>, BackendError>;

    /// # Errors
    ///
    /// Returns `BackendError::Malformed` if the response carries no id.
    async fn create_task(&self, task: &NewTask) -> Result<TaskId, BackendError>;

    /// # Errors
    ///
    /// Returns `BackendError` if the patch is rejected.
    async fn patch_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<(), BackendError>;

    /// # Errors
    ///
    /// Returns `BackendError` if the status is rejected.
    async fn update_status(&self, id: &TaskId, status: TaskStatus) -> Result<(), BackendError>;

    /// # Errors
    ///
    /// Returns `BackendError` if the details are rejected.
    async fn save_details(&self, id: &TaskId, details: &TaskDetails) -> Result<(), BackendError>;

    /// Flag a task to roll over and store its progress note.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the update is rejected.
    async fn continue_tomorrow(&self, id: &TaskId, progress: &str) -> Result<(), BackendError>;

    /// # Errors
    ///
    /// Returns `BackendError` if the task cannot be completed.
    async fn complete_task(&self, id: &TaskId) -> Result<(), BackendError>;

    /// Move a task to `due_date` and reset it to `todo`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the task cannot be reassigned.
    async fn reassign_task(&self, id: &TaskId, due_date: NaiveDate) -> Result<(), BackendError>;

    /// # Errors
    ///
    /// Returns `BackendError` if the task cannot be deleted.
    async fn delete_task(&self, id: &TaskId) -> Result<(), BackendError>;
}

/// Aggregates the backend contract behind trait objects for easy swapping.
#[derive(Clone)]
pub struct Backend {
    pub auth: Arc<dyn AuthApi>,
    pub users: Arc<dyn UserApi>,
    pub profiles: Arc<dyn ProfileApi>,
    pub projects: Arc<dyn ProjectApi>,
    pub tasks: Arc<dyn TaskApi>,
    pub token: AuthToken,
}

impl Backend {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_memory(InMemoryBackend::new())
    }

    /// Wrap an existing in-memory backend, keeping a handle for seeding.
    #[must_use]
    pub fn from_memory(repo: InMemoryBackend) -> Self {
        let token = repo.token();
        Self {
            auth: Arc::new(repo.clone()),
            users: Arc::new(repo.clone()),
            profiles: Arc::new(repo.clone()),
            projects: Arc::new(repo.clone()),
            tasks: Arc::new(repo),
            token,
        }
    }

    #[must_use]
    pub fn http(config: &ApiConfig) -> Self {
        let repo = HttpBackend::new(config);
        let token = repo.token();
        Self {
            auth: Arc::new(repo.clone()),
            users: Arc::new(repo.clone()),
            profiles: Arc::new(repo.clone()),
            projects: Arc::new(repo.clone()),
            tasks: Arc::new(repo),
            token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_send_blank_drafts_as_null() {
        let details = TaskDetails::from_drafts("  ", "waiting on review");
        let json = serde_json::to_value(&details).unwrap();
        assert!(json["deliverable"].is_null());
        assert_eq!(json["bottleneck"], "waiting on review");
    }

    #[test]
    fn patch_omits_unset_fields() {
        let patch = TaskPatch {
            progress: Some("halfway".into()),
            ..TaskPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "progress": "halfway" }));
    }

    #[test]
    fn token_cell_is_shared() {
        let token = AuthToken::new();
        let alias = token.clone();
        token.set(Some("abc".into()));
        assert_eq!(alias.get().as_deref(), Some("abc"));
        alias.set(None);
        assert!(token.get().is_none());
    }

    #[test]
    fn status_error_exposes_message() {
        let err = BackendError::Status {
            status: 409,
            message: Some("email taken".into()),
        };
        assert_eq!(err.message(), Some("email taken"));
        assert!(BackendError::Unauthorized.message().is_none());
    }
}
