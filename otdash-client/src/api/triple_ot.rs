use shared::models::{CreateTripleOtRequest, Page, TripleOtDate};

use super::{ApiClient, non_empty};
use crate::calendar::parse_day;
use crate::error::{ClientError, ClientResult};
use crate::transport::ApiRequest;

impl ApiClient {
    pub async fn list_triple_ot(&self) -> ClientResult<Vec<TripleOtDate>> {
        let page: Page<TripleOtDate> = self.fetch(ApiRequest::get("/triple-ot")).await?;
        Ok(page.items)
    }

    /// Mark `date` (`YYYY-MM-DD`) as paid at the triple rate.
    pub async fn create_triple_ot(&self, date: &str, note: &str) -> ClientResult<()> {
        if parse_day(date).is_none() {
            return Err(ClientError::invalid("Pick a date"));
        }
        let request = CreateTripleOtRequest {
            date: date.to_string(),
            note: non_empty(note),
        };
        self.send_unit(ApiRequest::post("/triple-ot").json(&request)?)
            .await
    }

    pub async fn delete_triple_ot(&self, id: &str) -> ClientResult<()> {
        self.send_unit(ApiRequest::delete(format!("/triple-ot/{id}")))
            .await
    }
}
