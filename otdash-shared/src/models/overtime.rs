use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::EmployeeRef;

/// Shift an OT entry is recorded against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, Display, AsRefStr, EnumString,
)]
pub enum Shift {
    /// No scheduled shift; in/out times are left blank.
    #[serde(rename = "NO_SHIFT")]
    #[strum(serialize = "NO_SHIFT")]
    NoShift,
    #[default]
    #[serde(rename = "Shift 1")]
    #[strum(serialize = "Shift 1")]
    Shift1,
    #[serde(rename = "Shift 2")]
    #[strum(serialize = "Shift 2")]
    Shift2,
}

impl Shift {
    /// Human label for selects.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NoShift => "NO Shift",
            Self::Shift1 => "Shift 1",
            Self::Shift2 => "Shift 2",
        }
    }

    /// Whether rows on this shift carry in/out times.
    #[must_use]
    pub fn requires_times(self) -> bool {
        !matches!(self, Self::NoShift)
    }
}

/// Approval workflow state of an OT entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OtStatus {
    Pending,
    Approved,
    Rejected,
}

/// One overtime entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OtEntry {
    /// Entry identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// The employee the entry belongs to.
    #[serde(rename = "employeeId")]
    pub employee: EmployeeRef,
    /// Day the overtime was worked (`YYYY-MM-DD` prefix).
    pub work_date: String,
    /// Shift worked.
    pub shift: Shift,
    /// Clock-in time (`HH:MM`), blank for [`Shift::NoShift`].
    #[serde(default)]
    pub in_time: String,
    /// Clock-out time (`HH:MM`), blank for [`Shift::NoShift`].
    #[serde(default)]
    pub out_time: String,
    /// Free-text justification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Minutes at the normal rate as computed by the server.
    #[serde(default)]
    pub normal_minutes: u32,
    /// Minutes at the double rate.
    #[serde(default)]
    pub double_minutes: u32,
    /// Minutes at the triple rate.
    #[serde(default)]
    pub triple_minutes: u32,
    /// Whether the entry crosses the night window.
    #[serde(default)]
    pub is_night: bool,
    /// Approved normal minutes, once approved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_normal_minutes: Option<u32>,
    /// Approved double minutes, once approved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_double_minutes: Option<u32>,
    /// Approved triple minutes, once approved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_triple_minutes: Option<u32>,
    /// Approved total, once approved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_total_minutes: Option<u32>,
    /// Whether the approver overrode the computed minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_approved_override: Option<bool>,
    /// Workflow state.
    pub status: OtStatus,
}

impl OtEntry {
    /// Computed minutes across all three rates.
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        self.normal_minutes + self.double_minutes + self.triple_minutes
    }

    /// Only pending entries may be edited, approved, or rejected.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == OtStatus::Pending
    }
}

/// Hour totals per rate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct HoursBreakdown {
    #[serde(default)]
    pub normal: f64,
    #[serde(default)]
    pub double: f64,
    #[serde(default)]
    pub triple: f64,
}

impl HoursBreakdown {
    /// Sum across rates.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.normal + self.double + self.triple
    }
}

/// Per-day counters from `/ot/stats/day` and `/ot/stats/week`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DayStats {
    /// Day (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub pending: u32,
    #[serde(default)]
    pub approved: u32,
    #[serde(default)]
    pub rejected: u32,
    #[serde(default)]
    pub hours: HoursBreakdown,
}

/// One row of `/ot/logs/summary`. The grouping key shape depends on scope, so it stays opaque.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OtSummaryRow {
    /// Grouping key as returned by the server.
    #[serde(rename = "_id", default)]
    pub key: serde_json::Value,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub normal_minutes: u32,
    #[serde(default)]
    pub double_minutes: u32,
    #[serde(default)]
    pub triple_minutes: u32,
    #[serde(default)]
    pub approved_total_minutes: u32,
}

impl OtSummaryRow {
    /// Computed minutes across all three rates.
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        self.normal_minutes + self.double_minutes + self.triple_minutes
    }

    /// A printable rendition of the grouping key.
    #[must_use]
    pub fn key_label(&self) -> String {
        match &self.key {
            serde_json::Value::String(text) => text.clone(),
            serde_json::Value::Object(map) => map
                .values()
                .map(|value| match value {
                    serde_json::Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(" / "),
            serde_json::Value::Null => "-".to_string(),
            other => other.to_string(),
        }
    }
}

/// One row of a bulk OT submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BulkOtRow {
    /// Employee record identifier.
    pub employee_id: String,
    /// Shift worked.
    pub shift: Shift,
    /// Clock-in (`HH:MM`).
    pub in_time: String,
    /// Clock-out (`HH:MM`).
    pub out_time: String,
    /// Optional justification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Payload for `POST /ot/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BulkOtRequest {
    /// Day every row applies to.
    pub work_date: String,
    /// Rows to create.
    pub rows: Vec<BulkOtRow>,
}

/// Outcome of `POST /ot/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BulkOtResult {
    #[serde(default)]
    pub inserted_count: u32,
    #[serde(default)]
    pub duplicates: u32,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl BulkOtResult {
    /// Nothing was inserted and the server explained why.
    #[must_use]
    pub fn first_error(&self) -> Option<&str> {
        if self.inserted_count == 0 {
            self.errors.first().map(String::as_str)
        } else {
            None
        }
    }

    /// Toast text for a successful submission.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.duplicates > 0 {
            format!(
                "Saved {}. Skipped {} duplicates.",
                self.inserted_count, self.duplicates
            )
        } else {
            format!("Saved {} entries", self.inserted_count)
        }
    }
}

/// Payload for `PATCH /ot/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOtRequest {
    pub shift: Shift,
    pub in_time: String,
    pub out_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Payload for `PATCH /ot/{id}/approve`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApproveOtRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub approved_normal_minutes: u32,
    pub approved_double_minutes: u32,
    pub approved_triple_minutes: u32,
}

/// Payload for `PATCH /ot/{id}/reject`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RejectOtRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Reporting period for the OT logs screen.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportScope {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Records vs. aggregated view on the OT logs screen.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogView {
    #[default]
    Records,
    Summary,
}

/// One pending entry in the approver's notification dropdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PendingNotification {
    pub id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub work_date: String,
    #[serde(default)]
    pub shift: String,
    #[serde(default)]
    pub in_time: String,
    #[serde(default)]
    pub out_time: String,
    #[serde(default)]
    pub employee: Option<NotificationEmployee>,
}

/// Employee summary inside a [`PendingNotification`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEmployee {
    pub emp_id: String,
    pub name: String,
}

/// Body of `/ot/notifications/count`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NotificationCount {
    #[serde(default)]
    pub pending: u32,
}

/// Body of `/ot/notifications/pending`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PendingNotifications {
    #[serde(default)]
    pub pending_count: u32,
    #[serde(default)]
    pub items: Vec<PendingNotification>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn shift_uses_server_spelling() {
        assert_eq!(serde_json::to_string(&Shift::NoShift).unwrap(), r#""NO_SHIFT""#);
        assert_eq!(serde_json::to_string(&Shift::Shift2).unwrap(), r#""Shift 2""#);
        assert_eq!(Shift::from_str("Shift 1").unwrap(), Shift::Shift1);
        assert!(!Shift::NoShift.requires_times());
    }

    #[test]
    fn ot_entry_deserializes_populated_employee() {
        let json = r#"{
            "_id": "ot1",
            "employeeId": {"_id": "e1", "empId": "E001", "name": "Ann"},
            "workDate": "2025-03-04",
            "shift": "Shift 1",
            "inTime": "17:00",
            "outTime": "19:30",
            "normalMinutes": 90,
            "doubleMinutes": 60,
            "tripleMinutes": 0,
            "isNight": false,
            "status": "PENDING"
        }"#;
        let entry: OtEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.employee.emp_id, "E001");
        assert_eq!(entry.total_minutes(), 150);
        assert!(entry.is_pending());
        assert_eq!(entry.approved_total_minutes, None);
    }

    #[test]
    fn bulk_result_reports_first_error_only_when_nothing_inserted() {
        let failed = BulkOtResult {
            inserted_count: 0,
            duplicates: 0,
            errors: vec!["Row 1: unknown employee".to_string()],
        };
        assert_eq!(failed.first_error(), Some("Row 1: unknown employee"));

        let partial = BulkOtResult {
            inserted_count: 2,
            duplicates: 1,
            errors: vec!["ignored".to_string()],
        };
        assert_eq!(partial.first_error(), None);
        assert_eq!(partial.summary(), "Saved 2. Skipped 1 duplicates.");
    }

    #[test]
    fn summary_key_label_flattens_objects() {
        let row: OtSummaryRow = serde_json::from_str(
            r#"{"_id":{"empId":"E1","name":"Ann"},"count":2,"normalMinutes":60}"#,
        )
        .unwrap();
        assert_eq!(row.key_label(), "E1 / Ann");
        assert_eq!(row.total_minutes(), 60);
    }

    #[test]
    fn report_scope_query_value() {
        assert_eq!(ReportScope::Weekly.as_ref(), "weekly");
        assert_eq!(LogView::Summary.to_string(), "summary");
    }

    #[test]
    fn pending_notifications_defaults() {
        let body: PendingNotifications = serde_json::from_str("{}").unwrap();
        assert_eq!(body.pending_count, 0);
        assert!(body.items.is_empty());
    }
}
