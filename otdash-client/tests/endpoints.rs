//! Typed endpoints against the fake API.

mod common;

use chrono::{NaiveDate, TimeDelta, Utc};
use client::api::{NotificationFeed, OtLogQuery, fingerprint_download};
use client::{ClientError, ErrorKind};
use common::signed_in;
use serde_json::json;
use shared::models::{BulkOtRow, CreateEmployeeRequest, LogView, ReportScope, Shift};

fn row(employee: &str) -> BulkOtRow {
    BulkOtRow {
        employee_id: employee.to_string(),
        shift: Shift::Shift1,
        in_time: "17:00".to_string(),
        out_time: "20:00".to_string(),
        reason: None,
    }
}

#[tokio::test]
async fn bulk_entry_reports_inserted_and_duplicates() {
    let (server, client) = signed_in(&["ot.create"]).await;
    server.route(
        "/ot/bulk",
        json!({ "insertedCount": 2, "duplicates": 1, "errors": [] }),
    );

    let result = client
        .create_ot_bulk("2025-03-03", &[row("e1"), row("e2"), row("e3")])
        .await
        .unwrap();

    assert_eq!(result.summary(), "Saved 2. Skipped 1 duplicates.");
    let sent = server.requests_to("/ot/bulk");
    assert_eq!(sent.len(), 1);
}

#[tokio::test]
async fn bulk_entry_with_nothing_inserted_surfaces_the_server_error() {
    let (server, client) = signed_in(&["ot.create"]).await;
    server.route(
        "/ot/bulk",
        json!({ "insertedCount": 0, "errors": ["Employee e1 is deleted"] }),
    );

    let err = client
        .create_ot_bulk("2025-03-03", &[row("e1")])
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Employee e1 is deleted");
}

#[tokio::test]
async fn invalid_bulk_rows_never_reach_the_server() {
    let (server, client) = signed_in(&["ot.create"]).await;

    let err = client
        .create_ot_bulk("2025-03-03", &[row("e1"), row("")])
        .await
        .unwrap_err();

    assert_eq!(err, ClientError::InvalidRequest("Row 2: select employee".to_string()));
    assert!(server.requests_to("/ot/bulk").is_empty());
}

#[tokio::test]
async fn employee_lookup_asks_for_everything() {
    let (server, client) = signed_in(&["employees.read"]).await;
    server.route(
        "/employees",
        json!({ "items": [{ "_id": "e1", "empId": "E001", "name": "Ann" }], "total": 1 }),
    );

    let employees = client.employee_lookup().await.unwrap();

    assert_eq!(employees.len(), 1);
    let sent = server.requests_to("/employees");
    assert_eq!(sent[0].query_value("limit"), Some("5000"));
    assert_eq!(sent[0].query_value("includeDeleted"), None);
}

#[tokio::test]
async fn blank_employee_fields_are_rejected_locally() {
    let (server, client) = signed_in(&["employees.create"]).await;

    let err = client
        .create_employee(&CreateEmployeeRequest {
            emp_id: " ".to_string(),
            name: "Ann".to_string(),
            email: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NetworkOrServerError);
    assert!(server.requests_to("/employees").is_empty());
}

#[tokio::test]
async fn empty_fingerprint_result_is_an_error() {
    let (server, client) = signed_in(&["ot.read"]).await;
    server.route("/fingerprint/process", json!({ "logs": [], "csv": "" }));

    let err = client
        .process_fingerprint("punches.dat", b"garbage".to_vec())
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Invalid file or empty log file.");
    let sent = server.requests_to("/fingerprint/process");
    assert!(matches!(
        &sent[0].body,
        client::transport::RequestBody::Multipart(part) if part.field == "file"
    ));
}

#[tokio::test]
async fn fingerprint_csv_can_drop_the_type_column() {
    let (server, client) = signed_in(&["ot.read"]).await;
    server.route(
        "/fingerprint/process",
        json!({
            "logs": [{ "empId": "7", "date": "2025-01-01", "time": "08:00", "type": "IN" }],
            "csv": "EmpID,Date,Time,Type\n7,2025-01-01,08:00,IN\n"
        }),
    );

    let result = client
        .process_fingerprint("punches.dat", b"raw".to_vec())
        .await
        .unwrap();
    let download = fingerprint_download(&result, false).unwrap();

    assert_eq!(download.file_name, "fingerprint_logs.csv");
    assert_eq!(
        String::from_utf8(download.bytes).unwrap(),
        "EmpID,Date,Time\n7,2025-01-01,08:00\n"
    );
}

#[tokio::test]
async fn ot_log_export_prefers_the_server_file_name() {
    let (server, client) = signed_in(&["ot.read"]).await;
    server.route_header(
        "/ot/logs/export",
        "content-disposition",
        r#"attachment; filename="ot_march.xlsx""#,
    );
    let query = OtLogQuery {
        scope: ReportScope::Monthly,
        anchor: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        employee_id: None,
        status: None,
    };

    let download = client.export_ot_logs(&query, LogView::Summary).await.unwrap();

    assert_eq!(download.file_name, "ot_march.xlsx");
    let sent = server.requests_to("/ot/logs/export");
    assert_eq!(sent[0].query_value("mode"), Some("summary"));
    assert_eq!(sent[0].query_value("anchor"), Some("2025-03-01"));
}

#[tokio::test]
async fn ot_log_summary_accepts_a_bare_array() {
    let (server, client) = signed_in(&["ot.read"]).await;
    server.route(
        "/ot/logs/summary",
        json!([{ "_id": "E001", "count": 2, "normalMinutes": 120 }]),
    );
    let query = OtLogQuery {
        scope: ReportScope::Daily,
        anchor: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
        employee_id: Some("e1".to_string()),
        status: None,
    };

    let rows = client.ot_log_summary(&query).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].count, 2);
}

#[tokio::test]
async fn notification_feed_is_throttled() {
    let (server, client) = signed_in(&["ot.approve"]).await;
    server.route(
        "/ot/notifications/pending",
        json!({ "pendingCount": 1, "items": [{ "id": "ot1", "workDate": "2025-03-03" }] }),
    );
    let feed = NotificationFeed::new(client);
    let now = Utc::now();

    let first = feed.refresh_at(now).await.unwrap();
    let throttled = feed.refresh_at(now + TimeDelta::milliseconds(300)).await.unwrap();
    let later = feed.refresh_at(now + TimeDelta::seconds(1)).await.unwrap();

    assert_eq!(first.map(|body| body.pending_count), Some(1));
    assert!(throttled.is_none());
    assert!(later.is_some());
    let sent = server.requests_to("/ot/notifications/pending");
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].query_value("limit"), Some("8"));
}

#[tokio::test]
async fn notification_count_reads_pending() {
    let (server, client) = signed_in(&["ot.approve"]).await;
    server.route("/ot/notifications/count", json!({ "pending": 4 }));

    assert_eq!(client.notification_count().await.unwrap(), 4);
}
