use reqwest::{Client, Method, RequestBuilder, header};
use serde::Serialize;
use serde_json::Value;
use taskboard_core::model::bearer_header;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::repository::{AuthToken, BackendError};

mod auth_api;
mod payload;
mod project_api;
mod task_api;
mod user_api;

pub use payload::{coerce_list, coerce_one, error_message, extract_id, extract_token};

/// Backend reached over JSON/HTTP with bearer authentication.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: AuthToken,
}

impl HttpBackend {
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            token: AuthToken::new(),
        }
    }

    #[must_use]
    pub fn token(&self) -> AuthToken {
        self.token.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.token.get() {
            Some(token) => builder.header(header::AUTHORIZATION, bearer_header(&token)),
            None => builder,
        }
    }

    async fn call(&self, method: Method, path: &str) -> Result<Value, BackendError> {
        self.send(self.request(method, path)).await
    }

    async fn call_with<B>(&self, method: Method, path: &str, body: &B) -> Result<Value, BackendError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.send(self.request(method, path).json(body)).await
    }

    /// Send a request and decode its JSON body.
    ///
    /// Empty or non-JSON success bodies decode to `Value::Null`.
    async fn send(&self, request: RequestBuilder) -> Result<Value, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        let payload = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body).unwrap_or_else(|err| {
                warn!(%status, error = %err, "response body is not JSON");
                Value::Null
            })
        };

        if status.is_success() {
            debug!(%status, "backend call succeeded");
            return Ok(payload);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(BackendError::Unauthorized);
        }
        Err(BackendError::Status {
            status: status.as_u16(),
            message: error_message(&payload),
        })
    }
}
