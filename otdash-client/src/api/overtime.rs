use serde::Serialize;
use shared::models::{
    ApproveOtRequest, BulkOtRequest, BulkOtResult, BulkOtRow, DayStats, OtEntry, Page,
    RejectOtRequest, Shift, UpdateOtRequest,
};

use super::{ApiClient, non_empty};
use crate::error::{ClientError, ClientResult};
use crate::transport::ApiRequest;

/// Filters for `GET /ot`. Dates are inclusive `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtQuery {
    pub from: String,
    pub to: String,
    pub page: u32,
    pub limit: u32,
}

impl OtQuery {
    /// Every entry of a single day.
    pub fn day(date: &str) -> Self {
        Self {
            from: date.to_string(),
            to: date.to_string(),
            page: 1,
            limit: 2000,
        }
    }
}

#[derive(Debug, Serialize)]
struct DateParam<'a> {
    date: &'a str,
}

#[derive(Debug, Serialize)]
struct RangeParams<'a> {
    from: &'a str,
    to: &'a str,
}

fn blank_times(shift: Shift, in_time: &str, out_time: &str) -> (String, String) {
    if shift.requires_times() {
        (in_time.to_string(), out_time.to_string())
    } else {
        (String::new(), String::new())
    }
}

/// Validate bulk rows and normalize them for submission.
///
/// Every row needs an employee, and clock times unless the shift is `NO_SHIFT`,
/// in which case the times are sent blank. Empty reasons are dropped.
pub fn prepare_bulk_rows(rows: &[BulkOtRow]) -> ClientResult<Vec<BulkOtRow>> {
    if rows.is_empty() {
        return Err(ClientError::invalid("Add at least one row"));
    }

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let number = index + 1;
            if row.employee_id.trim().is_empty() {
                return Err(ClientError::invalid(format!("Row {number}: select employee")));
            }
            if row.shift.requires_times() {
                if row.in_time.is_empty() {
                    return Err(ClientError::invalid(format!("Row {number}: in time required")));
                }
                if row.out_time.is_empty() {
                    return Err(ClientError::invalid(format!(
                        "Row {number}: out time required"
                    )));
                }
            }
            let (in_time, out_time) = blank_times(row.shift, &row.in_time, &row.out_time);
            Ok(BulkOtRow {
                employee_id: row.employee_id.clone(),
                shift: row.shift,
                in_time,
                out_time,
                reason: row.reason.as_deref().and_then(non_empty),
            })
        })
        .collect()
}

impl ApiClient {
    pub async fn list_ot(&self, query: &OtQuery) -> ClientResult<Page<OtEntry>> {
        self.fetch(ApiRequest::get("/ot").query(query)?).await
    }

    /// Create one entry per row for `work_date`. A result with nothing inserted
    /// and a server error message is returned as an error.
    pub async fn create_ot_bulk(
        &self,
        work_date: &str,
        rows: &[BulkOtRow],
    ) -> ClientResult<BulkOtResult> {
        let request = BulkOtRequest {
            work_date: work_date.to_string(),
            rows: prepare_bulk_rows(rows)?,
        };
        let result: BulkOtResult = self
            .fetch(ApiRequest::post("/ot/bulk").json(&request)?)
            .await?;
        match result.first_error() {
            Some(message) => Err(ClientError::invalid(message)),
            None => Ok(result),
        }
    }

    pub async fn update_ot(&self, id: &str, request: &UpdateOtRequest) -> ClientResult<()> {
        if request.shift.requires_times() {
            if request.in_time.is_empty() {
                return Err(ClientError::invalid("In time required"));
            }
            if request.out_time.is_empty() {
                return Err(ClientError::invalid("Out time required"));
            }
        }
        let (in_time, out_time) = blank_times(request.shift, &request.in_time, &request.out_time);
        let payload = UpdateOtRequest {
            shift: request.shift,
            in_time,
            out_time,
            reason: request.reason.as_deref().and_then(non_empty),
        };
        self.send_unit(ApiRequest::patch(format!("/ot/{id}")).json(&payload)?)
            .await
    }

    pub async fn approve_ot(&self, id: &str, request: &ApproveOtRequest) -> ClientResult<()> {
        let payload = ApproveOtRequest {
            reason: request.reason.as_deref().and_then(non_empty),
            ..request.clone()
        };
        self.send_unit(ApiRequest::patch(format!("/ot/{id}/approve")).json(&payload)?)
            .await
    }

    pub async fn reject_ot(&self, id: &str, reason: &str) -> ClientResult<()> {
        let payload = RejectOtRequest {
            reason: non_empty(reason),
        };
        self.send_unit(ApiRequest::patch(format!("/ot/{id}/reject")).json(&payload)?)
            .await
    }

    pub async fn day_stats(&self, date: &str) -> ClientResult<DayStats> {
        self.fetch(ApiRequest::get("/ot/stats/day").query(&DateParam { date })?)
            .await
    }

    pub async fn week_stats(&self, from: &str, to: &str) -> ClientResult<Vec<DayStats>> {
        let page: Page<DayStats> = self
            .fetch(ApiRequest::get("/ot/stats/week").query(&RangeParams { from, to })?)
            .await?;
        Ok(page.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(employee: &str, shift: Shift, in_time: &str, out_time: &str) -> BulkOtRow {
        BulkOtRow {
            employee_id: employee.to_string(),
            shift,
            in_time: in_time.to_string(),
            out_time: out_time.to_string(),
            reason: Some("  ".to_string()),
        }
    }

    #[test]
    fn rows_need_an_employee() {
        let err = prepare_bulk_rows(&[row("e1", Shift::Shift1, "17:00", "19:00"), row("", Shift::Shift1, "", "")])
            .unwrap_err();
        assert_eq!(err, ClientError::InvalidRequest("Row 2: select employee".to_string()));
    }

    #[test]
    fn working_shifts_need_both_times() {
        let err = prepare_bulk_rows(&[row("e1", Shift::Shift2, "17:00", "")]).unwrap_err();
        assert_eq!(err.user_message(), "Row 1: out time required");
    }

    #[test]
    fn no_shift_rows_are_sent_without_times() {
        let rows = prepare_bulk_rows(&[row("e1", Shift::NoShift, "08:00", "09:00")]).unwrap();
        assert_eq!(rows[0].in_time, "");
        assert_eq!(rows[0].out_time, "");
        assert_eq!(rows[0].reason, None);
    }

    #[test]
    fn empty_submission_is_rejected() {
        assert!(prepare_bulk_rows(&[]).is_err());
    }

    #[test]
    fn day_query_spans_one_day() {
        let request = ApiRequest::get("/ot").query(&OtQuery::day("2025-03-03")).unwrap();
        assert_eq!(request.query_value("from"), Some("2025-03-03"));
        assert_eq!(request.query_value("to"), Some("2025-03-03"));
    }
}
