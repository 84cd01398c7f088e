use serde::Serialize;
use shared::models::{CreateReasonRequest, DecisionReason, Page, ReasonType, UpdateReasonRequest};

use super::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::transport::ApiRequest;

#[derive(Debug, Serialize)]
struct ReasonFilter {
    #[serde(rename = "type")]
    reason_type: ReasonType,
    #[serde(skip_serializing_if = "Option::is_none")]
    active: Option<bool>,
}

impl ApiClient {
    /// Reasons of one type, optionally only the active ones (as offered in the
    /// approve and reject dialogs).
    pub async fn list_reasons(
        &self,
        reason_type: ReasonType,
        active_only: bool,
    ) -> ClientResult<Vec<DecisionReason>> {
        let filter = ReasonFilter {
            reason_type,
            active: active_only.then_some(true),
        };
        let page: Page<DecisionReason> = self
            .fetch(ApiRequest::get("/decision-reasons").query(&filter)?)
            .await?;
        Ok(page.items)
    }

    pub async fn create_reason(&self, request: &CreateReasonRequest) -> ClientResult<()> {
        if request.label.trim().is_empty() {
            return Err(ClientError::invalid("Label is required"));
        }
        self.send_unit(ApiRequest::post("/decision-reasons").json(request)?)
            .await
    }

    pub async fn update_reason(&self, id: &str, request: &UpdateReasonRequest) -> ClientResult<()> {
        if request
            .label
            .as_deref()
            .is_some_and(|label| label.trim().is_empty())
        {
            return Err(ClientError::invalid("Label is required"));
        }
        self.send_unit(ApiRequest::patch(format!("/decision-reasons/{id}")).json(request)?)
            .await
    }

    /// Flip the `active` flag of `reason`.
    pub async fn toggle_reason(&self, reason: &DecisionReason) -> ClientResult<()> {
        let request = UpdateReasonRequest {
            active: Some(!reason.active),
            ..UpdateReasonRequest::default()
        };
        self.update_reason(&reason.id, &request).await
    }

    pub async fn delete_reason(&self, id: &str) -> ClientResult<()> {
        self.send_unit(ApiRequest::delete(format!("/decision-reasons/{id}")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_sends_type_and_optional_active() {
        let request = ApiRequest::get("/decision-reasons").query(&ReasonFilter {
            reason_type: ReasonType::Reject,
            active: Some(true),
        })
        .unwrap();
        assert_eq!(request.query_value("type"), Some("REJECT"));
        assert_eq!(request.query_value("active"), Some("true"));

        let request = ApiRequest::get("/decision-reasons").query(&ReasonFilter {
            reason_type: ReasonType::Approve,
            active: None,
        })
        .unwrap();
        assert_eq!(request.query_value("active"), None);
    }
}
