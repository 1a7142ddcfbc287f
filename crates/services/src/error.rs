//! Shared error types for the services crate.

use thiserror::Error;

use backend::BackendError;
use taskboard_core::model::UserError;

/// Errors emitted by the client-state stores.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Validation(#[from] UserError),
    #[error("not signed in")]
    NotSignedIn,
    #[error("task {0} is not on the board")]
    UnknownTask(String),
}

impl ServiceError {
    /// Text shown to the user in a notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Backend(BackendError::Unauthorized) => {
                "Session expired. Please login again.".to_owned()
            }
            ServiceError::Backend(BackendError::Status {
                message: Some(message),
                ..
            }) => message.clone(),
            ServiceError::Backend(BackendError::Status { status, .. }) => {
                format!("Request failed with status {status}")
            }
            ServiceError::Backend(BackendError::Transport(_)) => {
                "Could not reach the server".to_owned()
            }
            ServiceError::Backend(BackendError::Malformed(detail)) => detail.clone(),
            ServiceError::Backend(BackendError::NotFound) => "Not found".to_owned(),
            ServiceError::Backend(other) => other.to_string(),
            ServiceError::Validation(err) => err.to_string(),
            ServiceError::NotSignedIn => "Please sign in first".to_owned(),
            ServiceError::UnknownTask(_) => "Task no longer exists".to_owned(),
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ServiceError::Backend(BackendError::Unauthorized))
    }
}
