use std::sync::Arc;

use backend::Backend;

use crate::Clock;
use crate::auth_service::{AuthService, MemorySessionStore, SessionStore};
use crate::notify::Notifier;
use crate::pending_store::PendingTaskStore;
use crate::profile_store::ProfileStore;
use crate::project_store::ProjectStore;
use crate::task_board::TaskBoard;
use crate::user_store::UserStore;

/// Assembles every store over one backend and one notification queue.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    notifier: Notifier,
    auth: Arc<AuthService>,
    projects: Arc<ProjectStore>,
    board: Arc<TaskBoard>,
    pending: Arc<PendingTaskStore>,
    users: Arc<UserStore>,
    profile: Arc<ProfileStore>,
}

impl AppServices {
    #[must_use]
    pub fn new(backend: &Backend, clock: Clock, sessions: Arc<dyn SessionStore>) -> Self {
        let notifier = Notifier::new();
        let auth = Arc::new(AuthService::new(
            clock,
            Arc::clone(&backend.auth),
            Arc::clone(&backend.users),
            backend.token.clone(),
            sessions,
            notifier.clone(),
        ));
        let projects = Arc::new(ProjectStore::new(
            Arc::clone(&backend.projects),
            Arc::clone(&backend.tasks),
            notifier.clone(),
        ));
        let board = Arc::new(TaskBoard::new(
            clock,
            Arc::clone(&backend.tasks),
            Arc::clone(&projects),
            notifier.clone(),
        ));
        let pending = Arc::new(PendingTaskStore::new(
            clock,
            Arc::clone(&backend.tasks),
            Arc::clone(&projects),
            notifier.clone(),
        ));
        let users = Arc::new(UserStore::new(
            clock,
            Arc::clone(&backend.users),
            notifier.clone(),
        ));
        let profile = Arc::new(ProfileStore::new(
            Arc::clone(&backend.profiles),
            Arc::clone(&users),
            notifier.clone(),
        ));

        Self {
            clock,
            notifier,
            auth,
            projects,
            board,
            pending,
            users,
            profile,
        }
    }

    /// Services over an empty in-memory backend.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(
            &Backend::in_memory(),
            clock,
            Arc::new(MemorySessionStore::new()),
        )
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
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
