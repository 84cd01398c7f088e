use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Which decision a canned reason applies to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonType {
    #[default]
    Approve,
    Reject,
}

impl ReasonType {
    /// Tab label on the Decision Reasons screen.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Approve => "Approve Reasons",
            Self::Reject => "Reject Reasons",
        }
    }
}

/// A canned approve/reject reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DecisionReason {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "type")]
    pub reason_type: ReasonType,
    pub label: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub sort: i32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Payload for `POST /decision-reasons`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateReasonRequest {
    #[serde(rename = "type")]
    pub reason_type: ReasonType,
    pub label: String,
    pub active: bool,
    pub sort: i32,
}

/// Payload for `PATCH /decision-reasons/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UpdateReasonRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_uses_type_key() {
        let json = r#"{"_id":"d1","type":"REJECT","label":"Duplicate","active":true,"sort":2}"#;
        let reason: DecisionReason = serde_json::from_str(json).unwrap();
        assert_eq!(reason.reason_type, ReasonType::Reject);
        assert_eq!(reason.sort, 2);
    }

    #[test]
    fn partial_update_skips_absent_fields() {
        let patch = UpdateReasonRequest {
            active: Some(false),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"active":false}"#);
    }
}
