//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    pub fn new(id: Uuid, name: String, email: String, password_hash: String) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
        }
    }

    /// Overwrite every field the patch supplies. The password is never touched.
    pub fn apply(&mut self, patch: UserPatch) {
        let UserPatch { name, email } = patch.normalized();
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
    }
}

/// Candidate for a new user. Carries no identity: one is assigned on create.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// Plain text, hashed before it reaches storage
    pub password: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Partial update. A field counts as supplied only when present and not blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    pub fn new(name: Option<String>, email: Option<String>) -> Self {
        Self { name, email }
    }

    /// Trim both fields and drop blank ones, so that `Some("  ")` behaves like `None`.
    pub fn normalized(self) -> Self {
        let keep = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            name: keep(self.name),
            email: keep(self.email),
        }
    }

    /// True when neither name nor email is supplied
    pub fn is_empty(&self) -> bool {
        self.name().is_none() && self.email().is_none()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    /// User display name
    #[serde(rename = "nome")]
    pub name: String,
    /// User email address
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
