//! Users as seen by this service: authenticated actors and their stored profiles.

use crate::config::{PLACEHOLDER_FULL_NAMES, UNKNOWN_LEAD_NAME, UNKNOWN_USER_NAME};

/// The authenticated caller of an operation.
///
/// Built from verified token claims and passed explicitly into every
/// operation that records authorship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl Actor {
    pub fn new(id: i32, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }
}

/// Locally stored copy of an identity-provider user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserProfile {
    /// Full name when it is meaningful, otherwise the username.
    pub fn display_name(&self) -> String {
        let full_name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full_name = full_name.trim();

        if full_name.is_empty() || PLACEHOLDER_FULL_NAMES.contains(&full_name) {
            self.username.clone()
        } else {
            full_name.to_string()
        }
    }
}

impl From<&Actor> for UserProfile {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            username: actor.username.clone(),
            first_name: actor.first_name.clone(),
            last_name: actor.last_name.clone(),
        }
    }
}

/// Display name for an activity author that may no longer be resolvable
pub fn user_display_name(user: Option<&UserProfile>) -> String {
    user.map(UserProfile::display_name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_USER_NAME.to_string())
}

/// Display name for a lead that may no longer be resolvable
pub fn lead_display_name(full_name: Option<String>) -> String {
    full_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_LEAD_NAME.to_string())
}
