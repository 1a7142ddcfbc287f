use std::sync::{Arc, Mutex};

use backend::{ProfileApi, ProfileUpdate};
use taskboard_core::model::{Profile, Role, UserId};

use crate::error::ServiceError;
use crate::lock;
use crate::notify::Notifier;
use crate::user_store::UserStore;

#[derive(Default)]
struct ProfileState {
    profile: Option<Profile>,
    loading: bool,
}

/// Profile of the signed-in user.
#[derive(Clone)]
pub struct ProfileStore {
    profiles: Arc<dyn ProfileApi>,
    users: Arc<UserStore>,
    notifier: Notifier,
    state: Arc<Mutex<ProfileState>>,
}

impl ProfileStore {
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileApi>, users: Arc<UserStore>, notifier: Notifier) -> Self {
        Self {
            profiles,
            users,
            notifier,
            state: Arc::new(Mutex::new(ProfileState::default())),
        }
    }

    /// Load the profile; an `SCE` profile switches the roster filter to `SCE`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Backend` after reporting it.
    pub async fn load(&self, user_id: &UserId) -> Result<(), ServiceError> {
        lock(&self.state).loading = true;
        let result = self
            .profiles
            .profile_by_user(user_id)
            .await
            .map_err(ServiceError::from);
        lock(&self.state).loading = false;
        let profile = self.notifier.capture("Error loading profile", result)?;
        if profile.role == Role::Sce {
            self.users.set_role_filter(Role::Sce);
        }
        lock(&self.state).profile = Some(profile);
        Ok(())
    }

    #[must_use]
    pub fn profile(&self) -> Option<Profile> {
        lock(&self.state).profile.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    /// Name used in the header greeting.
    #[must_use]
    pub fn greeting_name(&self) -> String {
        lock(&self.state)
            .profile
            .as_ref()
            .map_or("User", Profile::greeting_name)
            .to_owned()
    }

    /// Save changes and reload the profile.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotSignedIn` before a profile is loaded, or
    /// `ServiceError::Backend`; both are reported.
    pub async fn update(&self, update: &ProfileUpdate) -> Result<(), ServiceError> {
        let current = self.profile();
        let result = match &current {
            Some(profile) => self
                .profiles
                .update_profile(&profile.id, update)
                .await
                .map_err(ServiceError::from),
            None => Err(ServiceError::NotSignedIn),
        };
        self.notifier.capture("Error updating profile", result)?;
        self.notifier.success("Profile updated", "");
        match current {
            Some(profile) => self.load(&profile.user_id).await,
            None => Ok(()),
        }
    }
}
