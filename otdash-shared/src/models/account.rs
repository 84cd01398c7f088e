use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Permission;

/// A role as managed on the Roles & Permissions screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleRecord {
    /// Role identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Role name.
    pub name: String,
    /// Granted tokens.
    #[serde(default)]
    pub permissions: BTreeSet<Permission>,
}

impl RoleRecord {
    /// Add `permission` if absent, remove it if present.
    pub fn toggle(&mut self, permission: &Permission) {
        if !self.permissions.remove(permission.as_str()) {
            self.permissions.insert(permission.clone());
        }
    }
}

/// Payload for `POST /roles` and `PATCH /roles/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleRequest {
    /// Role name.
    pub name: String,
    /// Full replacement permission list.
    pub permissions: Vec<Permission>,
}

/// A dashboard login account as listed on the Users screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Login email.
    pub email: String,
    /// Display name.
    pub username: String,
    /// Legacy approval flag.
    #[serde(default)]
    pub can_approve: bool,
    /// Disabled accounts cannot sign in.
    #[serde(default)]
    pub is_active: bool,
    /// The populated role.
    #[serde(rename = "roleId")]
    pub role: RoleRecord,
    /// Creation timestamp (ISO-8601).
    #[serde(default)]
    pub created_at: String,
}

/// Payload for `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// Login email.
    pub email: String,
    /// Display name.
    pub username: String,
    /// Initial password; at least eight characters.
    pub password: String,
    /// Role to assign.
    pub role_id: String,
    /// Legacy approval flag.
    pub can_approve: bool,
}

/// Payload for `PATCH /users/{id}` when editing profile fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    /// Login email.
    pub email: String,
    /// Display name.
    pub username: String,
    /// Role to assign.
    pub role_id: String,
    /// Legacy approval flag.
    pub can_approve: bool,
}

/// Payload for `PATCH /users/{id}` when enabling or disabling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveRequest {
    /// New active flag.
    pub is_active: bool,
}

/// Payload for `PATCH /users/{id}/password`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResetPasswordRequest {
    /// Replacement password; at least eight characters.
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_reads_populated_role() {
        let json = r#"{
            "_id": "u1", "email": "a@b.c", "username": "ann", "canApprove": false,
            "isActive": true, "createdAt": "2025-01-01",
            "roleId": {"_id": "r1", "name": "manager", "permissions": ["users.read"]}
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.role.name, "manager");
        assert!(account.role.permissions.contains("users.read"));
        assert!(account.is_active);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut role = RoleRecord {
            id: "r1".to_string(),
            name: "ops".to_string(),
            permissions: BTreeSet::new(),
        };
        role.toggle(&Permission::OT_READ);
        assert!(role.permissions.contains("ot.read"));
        role.toggle(&Permission::OT_READ);
        assert!(role.permissions.is_empty());
    }

    #[test]
    fn create_request_uses_role_id_key() {
        let request = CreateAccountRequest {
            email: "a@b.c".to_string(),
            username: "ann".to_string(),
            password: "password1".to_string(),
            role_id: "r1".to_string(),
            can_approve: true,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["roleId"], "r1");
        assert_eq!(json["canApprove"], true);
    }
}
