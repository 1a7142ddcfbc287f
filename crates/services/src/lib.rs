#![forbid(unsafe_code)]

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod app_services;
pub mod auth_service;
pub mod error;
pub mod notify;
pub mod pending_store;
pub mod profile_store;
pub mod project_store;
pub mod task_board;
pub mod user_store;

pub use taskboard_core::Clock;

pub use app_services::AppServices;
pub use auth_service::{AuthService, MemorySessionStore, SessionStore};
pub use error::ServiceError;
pub use notify::{Notification, NotificationKind, Notifier};
pub use pending_store::PendingTaskStore;
pub use profile_store::ProfileStore;
pub use project_store::ProjectStore;
pub use task_board::TaskBoard;
pub use user_store::UserStore;

/// Lock store state, recovering the guard from a poisoned mutex.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
