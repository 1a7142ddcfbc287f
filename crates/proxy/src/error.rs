use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProxyError {
    #[error("Unauthorized")]
    MissingToken,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    /// Non-2xx answer from the backend, relayed as is.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid {key} value: {reason}")]
    Config { key: &'static str, reason: String },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl ProxyError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingToken | ProxyError::InvalidTokenFormat => StatusCode::UNAUTHORIZED,
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::Transport(_) | ProxyError::Config { .. } | ProxyError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_are_unauthorized() {
        assert_eq!(ProxyError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ProxyError::InvalidTokenFormat.to_string(),
            "Invalid token format"
        );
    }

    #[test]
    fn upstream_keeps_backend_status() {
        let err = ProxyError::Upstream {
            status: StatusCode::CONFLICT,
            message: "User already exists".into(),
        };
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "User already exists");
    }
}
