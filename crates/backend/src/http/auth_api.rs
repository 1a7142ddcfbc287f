use async_trait::async_trait;
use reqwest::Method;
use taskboard_core::model::UserForm;
use tracing::info;

use super::HttpBackend;
use super::payload::extract_token;
use crate::repository::{AuthApi, BackendError, Credentials};

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AuthApi for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> Result<String, BackendError> {
        let payload = self.call_with(Method::POST, "login", credentials).await?;
        let token = extract_token(&payload)
            .ok_or_else(|| BackendError::Malformed("Token not found in response".into()))?;
        info!(email = %credentials.email, "login accepted");
        Ok(token)
    }

    async fn register(&self, form: &UserForm) -> Result<(), BackendError> {
        self.call_with(Method::POST, "register", form).await?;
        info!(email = %form.email, "registration accepted");
        Ok(())
    }
}
