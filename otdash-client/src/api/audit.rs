use serde::Serialize;
use shared::models::{AuditEntry, Page};

use super::ApiClient;
use crate::download::{Download, XLSX_CONTENT_TYPE};
use crate::error::ClientResult;
use crate::transport::ApiRequest;

/// Filters for `GET /audit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl Default for AuditQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            entity_type: None,
            entity_id: None,
            from: None,
            to: None,
        }
    }
}

impl AuditQuery {
    /// The trail of one record, as opened from an OT row.
    pub fn for_entity(entity_id: &str) -> Self {
        Self {
            limit: 50,
            entity_id: Some(entity_id.to_string()),
            ..Self::default()
        }
    }
}

impl ApiClient {
    pub async fn list_audit(&self, query: &AuditQuery) -> ClientResult<Page<AuditEntry>> {
        self.fetch(ApiRequest::get("/audit").query(query)?).await
    }

    /// Spreadsheet of every entry matching `query`, ignoring paging.
    pub async fn export_audit(&self, query: &AuditQuery) -> ClientResult<Download> {
        let filters = AuditQuery {
            page: 1,
            limit: self.config().lookup_limit,
            ..query.clone()
        };
        let response = self
            .send(ApiRequest::get("/audit/export").query(&filters)?)
            .await?;
        Ok(Download::from_response(
            response,
            "audit_logs.xlsx".to_string(),
            XLSX_CONTENT_TYPE,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_trail_filters_by_id_only() {
        let request = ApiRequest::get("/audit").query(&AuditQuery::for_entity("ot-9")).unwrap();
        assert_eq!(request.query_value("entityId"), Some("ot-9"));
        assert_eq!(request.query_value("entityType"), None);
        assert_eq!(request.query_value("limit"), Some("50"));
    }
}
