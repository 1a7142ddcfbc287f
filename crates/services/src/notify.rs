use std::sync::{Arc, Mutex};

use tracing::error;

use crate::error::ServiceError;
use crate::lock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A toast waiting to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

#[derive(Default)]
struct Queue {
    next_id: u64,
    items: Vec<Notification>,
}

/// Shared queue of user-facing notifications.
#[derive(Clone, Default)]
pub struct Notifier {
    queue: Arc<Mutex<Queue>>,
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, title: impl Into<String>, description: impl Into<String>) {
        self.push(NotificationKind::Success, title.into(), description.into());
    }

    /// Log a caught failure and queue exactly one error notification for it.
    pub fn report(&self, title: &str, err: &ServiceError) {
        error!(error = %err, "{title}");
        self.push(NotificationKind::Error, title.to_owned(), err.user_message());
    }

    /// Report the error of `result`, if any, and hand it back unchanged.
    ///
    /// # Errors
    ///
    /// Returns the error carried by `result`.
    pub fn capture<T>(
        &self,
        title: &str,
        result: Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        if let Err(err) = &result {
            self.report(title, err);
        }
        result
    }

    #[must_use]
    pub fn pending(&self) -> Vec<Notification> {
        lock(&self.queue).items.clone()
    }

    pub fn dismiss(&self, id: u64) {
        lock(&self.queue).items.retain(|item| item.id != id);
    }

    /// Take every queued notification.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut lock(&self.queue).items)
    }

    fn push(&self, kind: NotificationKind, title: String, description: String) {
        let mut queue = lock(&self.queue);
        queue.next_id += 1;
        let id = queue.next_id;
        queue.items.push(Notification {
            id,
            kind,
            title,
            description,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::BackendError;

    #[test]
    fn capture_reports_errors_once() {
        let notifier = Notifier::new();
        let ok: Result<u8, ServiceError> = Ok(1);
        assert!(notifier.capture("ignored", ok).is_ok());
        assert!(notifier.pending().is_empty());

        let failed: Result<u8, ServiceError> = Err(BackendError::Unauthorized.into());
        assert!(notifier.capture("Error fetching users", failed).is_err());
        let queued = notifier.drain();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].kind, NotificationKind::Error);
        assert_eq!(queued[0].description, "Session expired. Please login again.");
        assert!(notifier.pending().is_empty());
    }

    #[test]
    fn dismiss_removes_by_id() {
        let notifier = Notifier::new();
        notifier.success("One", "");
        notifier.success("Two", "");
        let first = notifier.pending()[0].id;
        notifier.dismiss(first);
        let left = notifier.pending();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].title, "Two");
    }
}
