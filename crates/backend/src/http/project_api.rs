use async_trait::async_trait;
use reqwest::Method;
use taskboard_core::model::{NewProject, Project, ProjectId};

use super::HttpBackend;
use super::payload::{coerce_list, extract_id};
use crate::repository::{BackendError, ProjectApi};

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ProjectApi for HttpBackend {
    async fn list_projects(&self) -> Result<Vec<Project>, BackendError> {
        let payload = self.call(Method::GET, "projects").await?;
        Ok(coerce_list(payload, &["projects", "data"]))
    }

    async fn create_project(&self, project: &NewProject) -> Result<ProjectId, BackendError> {
        let payload = self.call_with(Method::POST, "projects", project).await?;
        extract_id(&payload)
            .map(ProjectId::new)
            .ok_or_else(|| BackendError::Malformed("created project has no id".into()))
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), BackendError> {
        self.call(Method::DELETE, &format!("projects/{id}")).await?;
        Ok(())
    }
}
