use std::future::Future;
use std::sync::Arc;

use dioxus::prelude::*;
use services::{
    AppServices, AuthService, Clock, Notifier, PendingTaskStore, ProfileStore, ProjectStore,
    ServiceError, TaskBoard, UserStore,
};
use taskboard_core::Greeting;
use tracing::debug;

pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    fn notifier(&self) -> Notifier;

    fn auth(&self) -> Arc<AuthService>;
    fn projects(&self) -> Arc<ProjectStore>;
    fn board(&self) -> Arc<TaskBoard>;
    fn pending(&self) -> Arc<PendingTaskStore>;
    fn users(&self) -> Arc<UserStore>;
    fn profile(&self) -> Arc<ProfileStore>;
}

impl UiApp for AppServices {
    fn clock(&self) -> Clock {
        AppServices::clock(self)
    }

    fn notifier(&self) -> Notifier {
        AppServices::notifier(self)
    }

    fn auth(&self) -> Arc<AuthService> {
        AppServices::auth(self)
    }

    fn projects(&self) -> Arc<ProjectStore> {
        AppServices::projects(self)
    }

    fn board(&self) -> Arc<TaskBoard> {
        AppServices::board(self)
    }

    fn pending(&self) -> Arc<PendingTaskStore> {
        AppServices::pending(self)
    }

    fn users(&self) -> Arc<UserStore> {
        AppServices::users(self)
    }

    fn profile(&self) -> Arc<ProfileStore> {
        AppServices::profile(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    greeting: Greeting,
    notifier: Notifier,

    auth: Arc<AuthService>,
    projects: Arc<ProjectStore>,
    board: Arc<TaskBoard>,
    pending: Arc<PendingTaskStore>,
    users: Arc<UserStore>,
    profile: Arc<ProfileStore>,
}

impl AppContext {
    /// The greeting is chosen here, once per app start.
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let clock = app.clock();
        Self {
            clock,
            greeting: Greeting::for_hour(clock.hour()),
            notifier: app.notifier(),
            auth: app.auth(),
            projects: app.projects(),
            board: app.board(),
            pending: app.pending(),
            users: app.users(),
            profile: app.profile(),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn greeting(&self) -> Greeting {
        self.greeting
    }

    #[must_use]
    pub fn notifier(&self) -> Notifier {
        self.notifier.clone()
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn projects(&self) -> Arc<ProjectStore> {
        Arc::clone(&self.projects)
    }

    #[must_use]
    pub fn board(&self) -> Arc<TaskBoard> {
        Arc::clone(&self.board)
    }

    #[must_use]
    pub fn pending(&self) -> Arc<PendingTaskStore> {
        Arc::clone(&self.pending)
    }

    #[must_use]
    pub fn users(&self) -> Arc<UserStore> {
        Arc::clone(&self.users)
    }

    #[must_use]
    pub fn profile(&self) -> Arc<ProfileStore> {
        Arc::clone(&self.profile)
    }
}

/// Render counter bumped after every store mutation.
///
/// Store state lives outside Dioxus; components that read it subscribe here.
#[derive(Clone, Copy)]
pub struct Revision(Signal<u64>);

impl Revision {
    /// Subscribe the calling component to store changes.
    #[must_use]
    pub fn track(&self) -> u64 {
        (self.0)()
    }

    pub fn bump(&mut self) {
        *self.0.write() += 1;
    }

    /// Run a store action in the background and re-render once it settles.
    ///
    /// Failures were already reported by the store; they are only logged here.
    pub fn settle<T, F>(self, action: F)
    where
        T: 'static,
        F: Future<Output = Result<T, ServiceError>> + 'static,
    {
        let mut revision = self;
        spawn(async move {
            if let Err(err) = action.await {
                debug!(error = %err, "store action failed");
            }
            revision.bump();
        });
    }
}

/// Provide a fresh counter to the calling component's subtree.
pub fn use_revision_provider() -> Revision {
    use_context_provider(|| Revision(Signal::new(0)))
}

#[must_use]
pub fn use_revision() -> Revision {
    use_context::<Revision>()
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
