use std::sync::{Arc, Mutex};

use backend::{AuthApi, AuthToken, Credentials, UserApi};
use taskboard_core::model::{Role, Session, SessionPersistence, User, UserForm};
use tracing::{info, warn};

use crate::Clock;
use crate::error::ServiceError;
use crate::lock;
use crate::notify::Notifier;

/// Where the session token is kept between page loads.
pub trait SessionStore: Send + Sync {
    /// Stored token and the sign-in flow that issued it.
    fn load(&self) -> Option<(String, SessionPersistence)>;
    fn save(&self, token: &str, persistence: SessionPersistence);
    fn clear(&self);
}

/// Session store for tests and non-browser targets.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<(String, SessionPersistence)>>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn persistence(&self) -> Option<SessionPersistence> {
        lock(&self.slot).as_ref().map(|(_, persistence)| *persistence)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<(String, SessionPersistence)> {
        lock(&self.slot).clone()
    }

    fn save(&self, token: &str, persistence: SessionPersistence) {
        *lock(&self.slot) = Some((token.to_owned(), persistence));
    }

    fn clear(&self) {
        *lock(&self.slot) = None;
    }
}

#[derive(Default)]
struct AuthState {
    user: Option<User>,
    session: Option<Session>,
    loading: bool,
}

/// Sign-in, sign-up, session restore and sign-out.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    auth: Arc<dyn AuthApi>,
    users: Arc<dyn UserApi>,
    token: AuthToken,
    sessions: Arc<dyn SessionStore>,
    notifier: Notifier,
    state: Arc<Mutex<AuthState>>,
}

impl AuthService {
    #[must_use]
    pub fn new(
        clock: Clock,
        auth: Arc<dyn AuthApi>,
        users: Arc<dyn UserApi>,
        token: AuthToken,
        sessions: Arc<dyn SessionStore>,
        notifier: Notifier,
    ) -> Self {
        Self {
            clock,
            auth,
            users,
            token,
            sessions,
            notifier,
            state: Arc::new(Mutex::new(AuthState {
                loading: true,
                ..AuthState::default()
            })),
        }
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        lock(&self.state).user.clone()
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        lock(&self.state).session.clone()
    }

    /// True until the stored session has been checked.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        lock(&self.state).user.is_some()
    }

    /// Exchange credentials for a token, persist it and load the user.
    ///
    /// Any failure clears the session entirely.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` after reporting it.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        role: Option<Role>,
        persistence: SessionPersistence,
    ) -> Result<User, ServiceError> {
        let credentials = Credentials {
            email: email.trim().to_owned(),
            password: password.to_owned(),
            role,
        };
        let result = self.establish(&credentials, persistence).await;
        if result.is_err() {
            self.forget();
        }
        let user = self.notifier.capture("Sign in failed", result)?;
        info!(user = %user.id, "signed in");
        Ok(user)
    }

    async fn establish(
        &self,
        credentials: &Credentials,
        persistence: SessionPersistence,
    ) -> Result<User, ServiceError> {
        let token = self.auth.login(credentials).await?;
        self.token.set(Some(token.clone()));
        self.sessions.save(&token, persistence);
        let session = Session::issue(token, persistence, self.clock.now());
        lock(&self.state).session = Some(session);

        let user = self.users.current_user().await?;
        let mut state = lock(&self.state);
        state.user = Some(user.clone());
        state.loading = false;
        Ok(user)
    }

    /// Register an account, then sign in with it.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for an incomplete form, or
    /// `ServiceError::Backend`; both are reported.
    pub async fn sign_up(
        &self,
        form: &UserForm,
        persistence: SessionPersistence,
    ) -> Result<User, ServiceError> {
        let result = self.register(form).await;
        self.notifier.capture("Registration failed", result)?;
        self.notifier
            .success("Account created", "Signing you in");
        self.sign_in(&form.email, &form.password, Some(form.role), persistence)
            .await
    }

    async fn register(&self, form: &UserForm) -> Result<(), ServiceError> {
        form.validate_new()?;
        self.auth.register(form).await?;
        Ok(())
    }

    /// Validate a stored token against the backend.
    ///
    /// The restored session keeps the lifetime of the flow that issued it.
    /// A rejected or unreachable session is cleared without a notification.
    pub async fn restore(&self) -> Option<User> {
        let Some((token, persistence)) = self.sessions.load() else {
            lock(&self.state).loading = false;
            return None;
        };
        self.token.set(Some(token.clone()));

        match self.users.current_user().await {
            Ok(user) => {
                let mut state = lock(&self.state);
                state.session = Some(Session::issue(token, persistence, self.clock.now()));
                state.user = Some(user.clone());
                state.loading = false;
                info!(user = %user.id, "session restored");
                Some(user)
            }
            Err(err) => {
                warn!(error = %err, "stored session rejected");
                self.forget();
                None
            }
        }
    }

    pub fn sign_out(&self) {
        self.forget();
        info!("signed out");
    }

    fn forget(&self) {
        self.token.set(None);
        self.sessions.clear();
        let mut state = lock(&self.state);
        state.user = None;
        state.session = None;
        state.loading = false;
    }
}
