use serde::{Deserialize, Serialize};

/// A calendar day on which overtime is paid at the triple rate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TripleOtDate {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Day (`YYYY-MM-DD`).
    pub date: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// Payload for `POST /triple-ot`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTripleOtRequest {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
