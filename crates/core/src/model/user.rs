use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::{ProfileId, UserId};

/// Minimum password length accepted by the roster form.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters long")]
    PasswordTooShort,
    #[error("Email is required")]
    MissingEmail,
}

/// Tenant-specific user category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    #[serde(rename = "SE")]
    Se,
    #[serde(rename = "SCE")]
    Sce,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Se, Role::Sce];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Se => "SE",
            Role::Sce => "SCE",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == raw)
    }

    /// The other role; used by the roster toggle.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Role::Se => Role::Sce,
            Role::Sce => Role::Se,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.email)
    }

    /// Avatar initial: first char of the full name, else the upper-cased
    /// first char of the email.
    #[must_use]
    pub fn initial(&self) -> String {
        if let Some(first) = self
            .full_name
            .as_deref()
            .and_then(|name| name.chars().next())
        {
            return first.to_string();
        }
        self.email
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }

    /// True when the user was created within the seven days before `now`.
    #[must_use]
    pub fn is_new_since(&self, now: DateTime<Utc>) -> bool {
        self.created_at
            .is_some_and(|created| created > now - Duration::days(7))
    }
}

/// Profile record attached to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub user_id: UserId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("User")
    }
}

/// Form data for adding or editing a roster entry, and for registration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct UserForm {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub role: Role,
}

impl UserForm {
    /// Validation applied before creating a user.
    ///
    /// # Errors
    ///
    /// Returns `UserError` when email/password are missing or the password is too short.
    pub fn validate_new(&self) -> Result<(), UserError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(UserError::MissingCredentials);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(UserError::PasswordTooShort);
        }
        Ok(())
    }

    /// Validation applied before updating a user; the password is optional.
    ///
    /// # Errors
    ///
    /// Returns `UserError::MissingEmail` when the email is blank.
    pub fn validate_update(&self) -> Result<(), UserError> {
        if self.email.trim().is_empty() {
            return Err(UserError::MissingEmail);
        }
        Ok(())
    }

    /// Pre-fill the form from an existing user for editing.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            full_name: user.full_name.clone().unwrap_or_default(),
            password: String::new(),
            role: user.role,
        }
    }

    /// Label used in confirmation messages.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }
}

/// Keep only users whose role matches `role`.
#[must_use]
pub fn filter_by_role(users: &[User], role: Role) -> Vec<User> {
    users.iter().filter(|user| user.role == role).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn user(id: &str, role: Role) -> User {
        User {
            id: UserId::new(id),
            email: format!("{id}@example.com"),
            full_name: None,
            role,
            created_at: None,
        }
    }

    #[test]
    fn role_filter_and_double_toggle() {
        let users = vec![user("a", Role::Se), user("b", Role::Sce), user("c", Role::Se)];
        let role = Role::Se;
        let se = filter_by_role(&users, role);
        assert!(se.iter().all(|u| u.role == Role::Se));
        assert_eq!(se.len(), 2);

        let sce = filter_by_role(&users, role.toggled());
        assert_eq!(sce.len(), 1);
        assert_eq!(sce[0].id, UserId::new("b"));

        assert_eq!(filter_by_role(&users, role.toggled().toggled()), se);
    }

    #[test]
    fn role_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&Role::Sce).unwrap(), "\"SCE\"");
        assert_eq!(Role::parse("SE"), Some(Role::Se));
        assert_eq!(Role::parse("se"), None);
    }

    #[test]
    fn initial_prefers_full_name() {
        let mut u = user("zed", Role::Se);
        assert_eq!(u.initial(), "Z");
        u.full_name = Some("amy".into());
        assert_eq!(u.initial(), "a");
        assert_eq!(u.display_name(), "amy");
    }

    #[test]
    fn new_since_uses_seven_day_window() {
        let now = fixed_now();
        let mut u = user("a", Role::Se);
        assert!(!u.is_new_since(now));
        u.created_at = Some(now - Duration::days(2));
        assert!(u.is_new_since(now));
        u.created_at = Some(now - Duration::days(8));
        assert!(!u.is_new_since(now));
    }

    #[test]
    fn form_validation() {
        let mut form = UserForm {
            email: "a@b.c".into(),
            ..UserForm::default()
        };
        assert_eq!(form.validate_new(), Err(UserError::MissingCredentials));
        form.password = "12345".into();
        assert_eq!(form.validate_new(), Err(UserError::PasswordTooShort));
        form.password = "123456".into();
        assert_eq!(form.validate_new(), Ok(()));
        assert_eq!(form.display_name(), "a@b.c");
    }
}
