use std::sync::{Arc, Mutex};

use backend::UserApi;
use taskboard_core::model::{Role, User, UserForm, UserId, filter_by_role};
use taskboard_core::summary::new_this_week;
use tracing::info;

use crate::Clock;
use crate::error::ServiceError;
use crate::lock;
use crate::notify::Notifier;

#[derive(Default)]
struct UserState {
    users: Vec<User>,
    loading: bool,
    role_filter: Role,
    viewing: Option<UserId>,
}

/// Team roster with a role toggle; every write is followed by a re-fetch.
#[derive(Clone)]
pub struct UserStore {
    clock: Clock,
    users: Arc<dyn UserApi>,
    notifier: Notifier,
    state: Arc<Mutex<UserState>>,
}

impl UserStore {
    #[must_use]
    pub fn new(clock: Clock, users: Arc<dyn UserApi>, notifier: Notifier) -> Self {
        Self {
            clock,
            users,
            notifier,
            state: Arc::new(Mutex::new(UserState::default())),
        }
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Backend` after reporting it; the roster is kept.
    pub async fn refresh(&self) -> Result<(), ServiceError> {
        lock(&self.state).loading = true;
        let result = self.users.list_users().await.map_err(ServiceError::from);
        let mut state = lock(&self.state);
        state.loading = false;
        match result {
            Ok(users) => {
                info!(count = users.len(), "roster loaded");
                state.users = users;
                Ok(())
            }
            Err(err) => {
                drop(state);
                self.notifier.report("Error fetching users", &err);
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn users(&self) -> Vec<User> {
        lock(&self.state).users.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    #[must_use]
    pub fn role_filter(&self) -> Role {
        lock(&self.state).role_filter
    }

    pub fn set_role_filter(&self, role: Role) {
        lock(&self.state).role_filter = role;
    }

    /// Switch between `SE` and `SCE`; returns the new filter.
    pub fn toggle_role_filter(&self) -> Role {
        let mut state = lock(&self.state);
        state.role_filter = state.role_filter.toggled();
        state.role_filter
    }

    /// Member whose tasks are open in the detail panel.
    #[must_use]
    pub fn viewing(&self) -> Option<UserId> {
        lock(&self.state).viewing.clone()
    }

    pub fn show_tasks(&self, user: Option<UserId>) {
        lock(&self.state).viewing = user;
    }

    /// Users matching the current role filter.
    #[must_use]
    pub fn filtered(&self) -> Vec<User> {
        let state = lock(&self.state);
        filter_by_role(&state.users, state.role_filter)
    }

    #[must_use]
    pub fn new_this_week(&self) -> usize {
        new_this_week(&lock(&self.state).users, self.clock.now())
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for an incomplete form, or
    /// `ServiceError::Backend`; both are reported.
    pub async fn add_user(&self, form: &UserForm) -> Result<(), ServiceError> {
        let result = self.create(form).await;
        self.notifier.capture("Error adding user", result)?;
        self.notifier.success(
            "User added",
            format!("{} has been added successfully", form.display_name()),
        );
        self.refresh().await
    }

    async fn create(&self, form: &UserForm) -> Result<(), ServiceError> {
        form.validate_new()?;
        self.users.create_user(form).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for a blank email, or
    /// `ServiceError::Backend`; both are reported.
    pub async fn update_user(&self, id: &UserId, form: &UserForm) -> Result<(), ServiceError> {
        let result = self.update(id, form).await;
        self.notifier.capture("Error updating user", result)?;
        self.notifier.success(
            "User updated",
            format!("{} has been updated successfully", form.display_name()),
        );
        self.refresh().await
    }

    async fn update(&self, id: &UserId, form: &UserForm) -> Result<(), ServiceError> {
        form.validate_update()?;
        self.users.update_user(id, form).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Backend` after reporting it.
    pub async fn delete_user(&self, id: &UserId) -> Result<(), ServiceError> {
        let result = self.users.delete_user(id).await.map_err(ServiceError::from);
        self.notifier.capture("Error deleting user", result)?;
        self.notifier
            .success("User deleted", "User has been removed successfully");
        {
            let mut state = lock(&self.state);
            if state.viewing.as_ref() == Some(id) {
                state.viewing = None;
            }
        }
        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::InMemoryBackend;
    use taskboard_core::time::{fixed_clock, fixed_now};

    fn user(id: &str, role: Role) -> User {
        User {
            id: UserId::new(id),
            email: format!("{id}@corp.io"),
            full_name: None,
            role,
            created_at: Some(fixed_now()),
        }
    }

    fn store() -> (UserStore, InMemoryBackend, Notifier) {
        let repo = InMemoryBackend::with_clock(fixed_clock());
        repo.seed_user(user("a", Role::Se), "secret1").unwrap();
        repo.seed_user(user("b", Role::Sce), "secret1").unwrap();
        repo.seed_user(user("c", Role::Se), "secret1").unwrap();
        let notifier = Notifier::new();
        let store = UserStore::new(fixed_clock(), Arc::new(repo.clone()), notifier.clone());
        (store, repo, notifier)
    }

    #[tokio::test]
    async fn toggle_twice_restores_filter() {
        let (store, _, _) = store();
        store.refresh().await.unwrap();

        let se: Vec<UserId> = store.filtered().into_iter().map(|u| u.id).collect();
        assert_eq!(se, [UserId::new("a"), UserId::new("c")]);

        assert_eq!(store.toggle_role_filter(), Role::Sce);
        assert!(store.filtered().iter().all(|u| u.role == Role::Sce));
        store.toggle_role_filter();
        let again: Vec<UserId> = store.filtered().into_iter().map(|u| u.id).collect();
        assert_eq!(again, se);
        assert_eq!(store.new_this_week(), 3);
    }

    #[tokio::test]
    async fn short_password_is_reported_not_sent() {
        let (store, repo, notifier) = store();
        let form = UserForm {
            email: "new@corp.io".into(),
            full_name: "New".into(),
            password: "123".into(),
            role: Role::Se,
        };
        let err = store.add_user(&form).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(notifier.drain().len(), 1);
        assert_eq!(backend::UserApi::list_users(&repo).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn writes_refetch_the_roster() {
        let (store, _, _) = store();
        let form = UserForm {
            email: "d@corp.io".into(),
            full_name: "Dina".into(),
            password: "secret1".into(),
            role: Role::Sce,
        };
        store.add_user(&form).await.unwrap();
        assert_eq!(store.users().len(), 4);

        store.delete_user(&UserId::new("a")).await.unwrap();
        assert_eq!(store.users().len(), 3);
    }

    #[tokio::test]
    async fn deleting_the_viewed_member_closes_their_tasks() {
        let (store, _, _) = store();
        store.refresh().await.unwrap();
        store.show_tasks(Some(UserId::new("b")));
        assert_eq!(store.viewing(), Some(UserId::new("b")));

        store.delete_user(&UserId::new("a")).await.unwrap();
        assert_eq!(store.viewing(), Some(UserId::new("b")));
        store.delete_user(&UserId::new("b")).await.unwrap();
        assert_eq!(store.viewing(), None);
    }
}
