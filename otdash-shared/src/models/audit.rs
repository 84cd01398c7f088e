use serde::{Deserialize, Serialize};

/// The actor recorded on an audit entry, when it could be populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AuditActor {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl AuditActor {
    /// Username, else email, else a dash.
    #[must_use]
    pub fn display(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("-")
    }
}

/// One audit log row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// When the action happened (ISO-8601).
    pub created_at: String,
    /// Who performed it.
    #[serde(rename = "actorUserId", default)]
    pub actor: Option<AuditActor>,
    /// Action verb, e.g. `OT_APPROVE`.
    pub action: String,
    /// Kind of entity touched, see [`AUDIT_ENTITY_TYPES`].
    pub entity_type: String,
    /// Identifier of the entity touched.
    pub entity_id: String,
    /// Free-form context captured by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Actor label for tables.
    #[must_use]
    pub fn actor_label(&self) -> &str {
        self.actor.as_ref().map_or("-", AuditActor::display)
    }
}

/// Entity type filter options as `(label, value)`; the empty value means all types.
pub const AUDIT_ENTITY_TYPES: &[(&str, &str)] = &[
    ("All Types", ""),
    ("OT Entry", "OT_ENTRY"),
    ("Employee", "EMPLOYEE"),
    ("User", "USER"),
    ("Role", "ROLE"),
    ("Triple OT", "TRIPLE_OT"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_label_falls_back_to_email_then_dash() {
        let json = r#"{"_id":"a1","createdAt":"2025-01-01T00:00:00Z","actorUserId":{"email":"x@y.z"},
            "action":"EMPLOYEE_CREATE","entityType":"EMPLOYEE","entityId":"e1"}"#;
        let entry: AuditEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.actor_label(), "x@y.z");

        let orphan = AuditEntry {
            actor: None,
            ..entry
        };
        assert_eq!(orphan.actor_label(), "-");
    }

    #[test]
    fn null_actor_is_accepted() {
        let json = r#"{"_id":"a2","createdAt":"t","actorUserId":null,"action":"A","entityType":"ROLE","entityId":"r"}"#;
        let entry: AuditEntry = serde_json::from_str(json).unwrap();
        assert!(entry.actor.is_none());
    }
}
