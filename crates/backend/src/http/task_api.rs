use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use serde::Serialize;
use serde_json::json;
use taskboard_core::model::{NewTask, PendingTask, Task, TaskId, TaskStatus, UserId};

use super::HttpBackend;
use super::payload::{coerce_list, extract_id};
use crate::repository::{BackendError, TaskApi, TaskDetails, TaskPatch};

#[derive(Serialize)]
struct ContinueBody<'a> {
    continue_tomorrow: bool,
    progress: &'a str,
}

#[derive(Serialize)]
struct ReassignBody {
    due_date: NaiveDate,
    status: TaskStatus,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl TaskApi for HttpBackend {
    async fn list_tasks(&self) -> Result<Vec<Task>, BackendError> {
        let payload = self.call(Method::GET, "tasks").await?;
        Ok(coerce_list(payload, &["tasks", "data"]))
    }

    async fn pending_tasks(&self, user_id: &UserId) -> Result<Vec<PendingTask>, BackendError> {
        let request = self
            .request(Method::GET, "tasks")
            .query(&[("userId", user_id.as_str()), ("status", "pending")]);
        let payload = self.send(request).await?;
        Ok(coerce_list(payload, &["tasks", "data"]))
    }

    async fn create_task(&self, task: &NewTask) -> Result<TaskId, BackendError> {
        let payload = self.call_with(Method::POST, "tasks", task).await?;
        extract_id(&payload)
            .map(TaskId::new)
            .ok_or_else(|| BackendError::Malformed("created task has no id".into()))
    }

    async fn patch_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<(), BackendError> {
        self.call_with(Method::PATCH, &format!("tasks/{id}"), patch)
            .await?;
        Ok(())
    }

    async fn update_status(&self, id: &TaskId, status: TaskStatus) -> Result<(), BackendError> {
        self.call_with(
            Method::PATCH,
            &format!("tasks/{id}/status"),
            &json!({ "status": status }),
        )
        .await?;
        Ok(())
    }

    async fn save_details(&self, id: &TaskId, details: &TaskDetails) -> Result<(), BackendError> {
        self.call_with(Method::PATCH, &format!("tasks/{id}/details"), details)
            .await?;
        Ok(())
    }

    async fn continue_tomorrow(&self, id: &TaskId, progress: &str) -> Result<(), BackendError> {
        let body = ContinueBody {
            continue_tomorrow: true,
            progress,
        };
        self.call_with(Method::PATCH, &format!("tasks/{id}/continue"), &body)
            .await?;
        Ok(())
    }

    async fn complete_task(&self, id: &TaskId) -> Result<(), BackendError> {
        self.call_with(
            Method::PUT,
            &format!("tasks/{id}/complete"),
            &json!({ "status": TaskStatus::Completed }),
        )
        .await?;
        Ok(())
    }

    async fn reassign_task(&self, id: &TaskId, due_date: NaiveDate) -> Result<(), BackendError> {
        let body = ReassignBody {
            due_date,
            status: TaskStatus::Todo,
        };
        self.call_with(Method::PUT, &format!("tasks/{id}/reassign"), &body)
            .await?;
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), BackendError> {
        self.call(Method::DELETE, &format!("tasks/{id}")).await?;
        Ok(())
    }
}
