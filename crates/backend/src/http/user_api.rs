use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use taskboard_core::model::{Profile, ProfileId, Role, User, UserForm, UserId};

use super::HttpBackend;
use super::payload::{coerce_list, coerce_one};
use crate::repository::{BackendError, ProfileApi, ProfileUpdate, UserApi};

/// Roster edits never resend the password.
#[derive(Serialize)]
struct UserUpdateBody<'a> {
    email: &'a str,
    full_name: &'a str,
    role: Role,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl UserApi for HttpBackend {
    async fn list_users(&self) -> Result<Vec<User>, BackendError> {
        let payload = self.call(Method::GET, "users").await?;
        Ok(coerce_list(payload, &["users", "data"]))
    }

    async fn current_user(&self) -> Result<User, BackendError> {
        // The users endpoint resolves the bearer; a list answer leads with the caller.
        let payload = self.call(Method::GET, "users").await?;
        coerce_one(payload)
    }

    async fn create_user(&self, form: &UserForm) -> Result<(), BackendError> {
        self.call_with(Method::POST, "users", form).await?;
        Ok(())
    }

    async fn update_user(&self, id: &UserId, form: &UserForm) -> Result<(), BackendError> {
        let body = UserUpdateBody {
            email: &form.email,
            full_name: &form.full_name,
            role: form.role,
        };
        self.call_with(Method::PUT, &format!("users/{id}"), &body)
            .await?;
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), BackendError> {
        self.call(Method::DELETE, &format!("users/{id}")).await?;
        Ok(())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ProfileApi for HttpBackend {
    async fn profile_by_user(&self, user_id: &UserId) -> Result<Profile, BackendError> {
        let payload = self
            .call(Method::GET, &format!("profiles/by-user/{user_id}"))
            .await?;
        coerce_one(payload)
    }

    async fn update_profile(
        &self,
        id: &ProfileId,
        update: &ProfileUpdate,
    ) -> Result<(), BackendError> {
        self.call_with(Method::PUT, &format!("profiles/{id}"), update)
            .await?;
        Ok(())
    }
}
