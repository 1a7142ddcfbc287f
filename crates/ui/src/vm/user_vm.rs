use chrono::{DateTime, Utc};
use taskboard_core::model::{Role, User, UserId};

use crate::vm::time_fmt::format_joined;

/// One roster row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRowVm {
    pub id: UserId,
    pub initial: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub joined: String,
    pub is_new: bool,
}

impl UserRowVm {
    #[must_use]
    pub fn new(user: &User, now: DateTime<Utc>) -> Self {
        Self {
            id: user.id.clone(),
            initial: user.initial(),
            name: user.display_name().to_owned(),
            email: user.email.clone(),
            role: user.role,
            joined: format_joined(user.created_at),
            is_new: user.is_new_since(now),
        }
    }
}

#[must_use]
pub fn map_user_rows(users: &[User], now: DateTime<Utc>) -> Vec<UserRowVm> {
    users.iter().map(|user| UserRowVm::new(user, now)).collect()
}
