use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Permission;

/// A role as embedded in the session payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    /// Role identifier.
    #[serde(alias = "_id")]
    pub id: String,

    /// Role name, e.g. `admin`, `manager`, `supervisor`.
    pub name: String,

    /// Capability tokens granted by this role.
    #[serde(default)]
    pub permissions: BTreeSet<Permission>,
}

impl Role {
    /// Whether the role carries `permission`.
    #[must_use]
    pub fn grants(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

/// The signed-in user as returned by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier for the user.
    #[serde(alias = "_id")]
    pub id: String,

    /// The user's email address.
    pub email: String,

    /// The user's display name.
    pub username: String,

    /// Legacy approval flag. Informational only; gating always goes through the role.
    #[serde(default)]
    pub can_approve: bool,

    /// The user's role and its permissions.
    pub role: Role,
}

/// Credentials posted to `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Body returned by `/auth/login` and `/auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Short-lived bearer token.
    pub access_token: String,
    /// The authenticated user snapshot.
    pub user: User,
}
