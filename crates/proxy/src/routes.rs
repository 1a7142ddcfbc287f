use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use taskboard_core::model::parse_bearer;
use tracing::{debug, error, warn};

use crate::{error::ProxyError, state::ProxyState};

pub async fn login_handler(
    State(state): State<Arc<ProxyState>>,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let upstream = Upstream::new(Method::POST, "login", "Login failed");
    upstream.body(body).send(&state).await
}

/// Forwards to the backend's `/register`, the endpoint the client's own
/// sign-up uses, rather than creating the account through `POST /users`.
pub async fn register_handler(
    State(state): State<Arc<ProxyState>>,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let upstream = Upstream::new(Method::POST, "register", "Register failed");
    upstream.body(body).send(&state).await
}

pub async fn list_users_handler(
    State(state): State<Arc<ProxyState>>,
    headers: HeaderMap,
) -> Result<Response, ProxyError> {
    let authorization = authorization(&headers)?;
    Upstream::new(Method::GET, "users", "Failed to fetch users")
        .authorization(authorization)
        .send(&state)
        .await
}

pub async fn create_user_handler(
    State(state): State<Arc<ProxyState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let authorization = authorization(&headers)?;
    Upstream::new(Method::POST, "users", "Failed to create user")
        .authorization(authorization)
        .body(body)
        .send(&state)
        .await
}

/// The caller's `Authorization` header, checked for the `Bearer <token>` shape
/// and returned untouched.
fn authorization(headers: &HeaderMap) -> Result<String, ProxyError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(ProxyError::MissingToken)?;
    let raw = value.to_str().map_err(|_| ProxyError::InvalidTokenFormat)?;
    parse_bearer(raw).ok_or(ProxyError::InvalidTokenFormat)?;
    Ok(raw.to_owned())
}

struct Upstream {
    method: Method,
    path: &'static str,
    fallback: &'static str,
    authorization: Option<String>,
    body: Option<Bytes>,
}

impl Upstream {
    fn new(method: Method, path: &'static str, fallback: &'static str) -> Self {
        Self {
            method,
            path,
            fallback,
            authorization: None,
            body: None,
        }
    }

    fn authorization(mut self, value: String) -> Self {
        self.authorization = Some(value);
        self
    }

    fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    async fn send(self, state: &ProxyState) -> Result<Response, ProxyError> {
        let url = state.url(self.path);
        debug!("{} {url}", self.method);

        let mut request = state.client.request(self.method, &url);
        if let Some(value) = self.authorization {
            request = request.header(header::AUTHORIZATION, value);
        }
        if let Some(body) = self.body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let reply = request.send().await.inspect_err(|e| {
            error!("Backend unreachable at {url}: {e}");
        })?;
        let status = reply.status();
        let payload: Value = reply.json().await.inspect_err(|e| {
            error!("Undecodable reply from {url}: {e}");
        })?;

        if !status.is_success() {
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .unwrap_or(self.fallback)
                .to_owned();
            warn!("{url} answered {status}: {message}");
            return Err(ProxyError::Upstream { status, message });
        }

        Ok((status, Json(payload)).into_response())
    }
}
