use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{LogView, OtEntry, OtStatus, OtSummaryRow, Page, ReportScope};

use super::ApiClient;
use crate::calendar::format_day;
use crate::download::{Download, XLSX_CONTENT_TYPE};
use crate::error::ClientResult;
use crate::transport::ApiRequest;

/// Filters shared by the OT logs records, summary and export endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtLogQuery {
    pub scope: ReportScope,
    /// Start of the period; see [`crate::calendar::normalize_anchor`].
    pub anchor: NaiveDate,
    pub employee_id: Option<String>,
    pub status: Option<OtStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogParams<'a> {
    scope: ReportScope,
    anchor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    employee_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<OtStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<LogView>,
}

/// The summary endpoint answers either with a page envelope or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SummaryBody {
    Paged(Page<OtSummaryRow>),
    Bare(Vec<OtSummaryRow>),
}

impl OtLogQuery {
    fn params(&self, limit: Option<u32>, mode: Option<LogView>) -> LogParams<'_> {
        LogParams {
            scope: self.scope,
            anchor: format_day(self.anchor),
            employee_id: self.employee_id.as_deref(),
            status: self.status,
            page: limit.map(|_| 1),
            limit,
            mode,
        }
    }

    /// `ot_weekly_2025-03-03_summary.xlsx`
    pub fn export_file_name(&self, view: LogView) -> String {
        format!("ot_{}_{}_{}.xlsx", self.scope, format_day(self.anchor), view)
    }
}

impl ApiClient {
    pub async fn ot_log_records(&self, query: &OtLogQuery) -> ClientResult<Vec<OtEntry>> {
        let params = query.params(Some(self.config().lookup_limit), None);
        let page: Page<OtEntry> = self
            .fetch(ApiRequest::get("/ot/logs").query(&params)?)
            .await?;
        Ok(page.items)
    }

    pub async fn ot_log_summary(&self, query: &OtLogQuery) -> ClientResult<Vec<OtSummaryRow>> {
        let params = query.params(Some(self.config().lookup_limit), None);
        let body: SummaryBody = self
            .fetch(ApiRequest::get("/ot/logs/summary").query(&params)?)
            .await?;
        Ok(match body {
            SummaryBody::Paged(page) => page.items,
            SummaryBody::Bare(rows) => rows,
        })
    }

    /// Spreadsheet of the records or summary view.
    pub async fn export_ot_logs(&self, query: &OtLogQuery, view: LogView) -> ClientResult<Download> {
        let params = query.params(None, Some(view));
        let response = self
            .send(ApiRequest::get("/ot/logs/export").query(&params)?)
            .await?;
        Ok(Download::from_response(
            response,
            query.export_file_name(view),
            XLSX_CONTENT_TYPE,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> OtLogQuery {
        OtLogQuery {
            scope: ReportScope::Weekly,
            anchor: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            employee_id: None,
            status: Some(OtStatus::Approved),
        }
    }

    #[test]
    fn export_params_carry_mode_but_no_paging() {
        let request =
            ApiRequest::get("/ot/logs/export").query(&query().params(None, Some(LogView::Summary))).unwrap();
        assert_eq!(request.query_value("scope"), Some("weekly"));
        assert_eq!(request.query_value("anchor"), Some("2025-03-03"));
        assert_eq!(request.query_value("status"), Some("APPROVED"));
        assert_eq!(request.query_value("mode"), Some("summary"));
        assert_eq!(request.query_value("page"), None);
        assert_eq!(request.query_value("employeeId"), None);
    }

    #[test]
    fn fallback_export_name() {
        assert_eq!(
            query().export_file_name(LogView::Records),
            "ot_weekly_2025-03-03_records.xlsx"
        );
    }

    #[test]
    fn summary_accepts_both_shapes() {
        let paged: SummaryBody = serde_json::from_str(r#"{"items":[{"_id":"E1","count":1}]}"#).unwrap();
        let bare: SummaryBody = serde_json::from_str(r#"[{"_id":"E1","count":1}]"#).unwrap();
        assert!(matches!(paged, SummaryBody::Paged(page) if page.items.len() == 1));
        assert!(matches!(bare, SummaryBody::Bare(rows) if rows.len() == 1));
    }
}
