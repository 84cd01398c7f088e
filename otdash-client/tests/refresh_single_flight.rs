//! Refresh-on-401 behaviour of the request pipeline.

mod common;

use client::{ApiRequest, ClientError, ErrorKind, LoadProgress};
use common::{FakeApi, LOGIN_TOKEN, init_tracing, signed_in};
use futures::future::join_all;
use serde_json::json;

#[tokio::test]
async fn bearer_token_is_attached_to_resource_calls() {
    let (server, client) = signed_in(&["employees.read"]).await;
    server.route("/employees", json!({ "items": [], "total": 0 }));

    client.send(ApiRequest::get("/employees")).await.unwrap();

    let sent = server.requests_to("/employees");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].bearer.as_deref(), Some(LOGIN_TOKEN));
    let login = server.requests_to("/auth/login");
    assert_eq!(login[0].bearer, None);
}

#[tokio::test]
async fn concurrent_401s_share_one_refresh() {
    let (server, client) = signed_in(&["ot.read"]).await;
    server.expire_token();

    let calls = (0..5).map(|_| client.send(ApiRequest::get("/ot")));
    let results = join_all(calls).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(server.refresh_calls(), 1);
    assert_eq!(client.session().access_token().as_deref(), Some("token-2"));

    let retries: Vec<_> = server
        .requests_to("/ot")
        .into_iter()
        .filter(ApiRequest::is_retried)
        .collect();
    assert_eq!(retries.len(), 5);
    assert!(
        retries
            .iter()
            .all(|request| request.bearer.as_deref() == Some("token-2"))
    );
}

#[tokio::test]
async fn a_new_refresh_starts_after_the_previous_one_settled() {
    let (server, client) = signed_in(&["ot.read"]).await;

    server.expire_token();
    client.send(ApiRequest::get("/ot")).await.unwrap();
    server.expire_token();
    client.send(ApiRequest::get("/ot")).await.unwrap();

    assert_eq!(server.refresh_calls(), 2);
    assert_eq!(client.session().access_token().as_deref(), Some("token-3"));
}

#[tokio::test]
async fn retried_request_is_not_retried_again() {
    let (server, client) = signed_in(&["audit.read"]).await;
    server.reject_always("/audit");

    let err = client.send(ApiRequest::get("/audit")).await.unwrap_err();

    assert_eq!(err, ClientError::AuthExpired);
    assert_eq!(server.refresh_calls(), 1);
    assert_eq!(server.requests_to("/audit").len(), 2);
    // The refresh itself succeeded, so the session stays.
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn auth_endpoints_never_trigger_a_refresh() {
    init_tracing();
    let server = FakeApi::new(&[]);
    let client = server.client();

    let err = client
        .session()
        .login("sup@example.com", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
    assert_eq!(err.user_message(), "Invalid credentials");
    assert_eq!(server.refresh_calls(), 0);
}

#[tokio::test]
async fn failed_refresh_expires_the_session() {
    let (server, client) = signed_in(&["employees.read"]).await;
    server.expire_token();
    server.fail_refresh();

    let results = join_all((0..3).map(|_| client.send(ApiRequest::get("/employees")))).await;

    for result in results {
        assert_eq!(result.unwrap_err().kind(), ErrorKind::AuthExpired);
    }
    assert_eq!(server.refresh_calls(), 1);
    let session = client.session().snapshot();
    assert!(!session.is_authenticated());
    assert!(session.access_token().is_none());
    assert_eq!(session.progress(), LoadProgress::EXPIRED);
}

#[tokio::test]
async fn successful_refresh_reports_progress() {
    let (server, client) = signed_in(&["ot.read"]).await;
    server.expire_token();

    client.send(ApiRequest::get("/ot")).await.unwrap();

    assert_eq!(client.session().snapshot().progress().label, "Session refreshed");
}

#[tokio::test]
async fn request_during_bootstrap_joins_the_bootstrap_refresh() {
    init_tracing();
    let server = FakeApi::new(&["ot.read"]);
    let client = server.client();

    let (_, response) = futures::join!(
        client.session().bootstrap(),
        client.send(ApiRequest::get("/ot"))
    );

    assert!(response.is_ok());
    assert_eq!(server.refresh_calls(), 1);
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn forbidden_is_not_an_expired_session() {
    let (server, client) = signed_in(&[]).await;
    server.forbid("/users");

    let err = client.send(ApiRequest::get("/users")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    assert_eq!(err.user_message(), "Missing permission users.read");
    assert_eq!(server.refresh_calls(), 0);
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn connectivity_failures_are_network_errors() {
    let (server, client) = signed_in(&[]).await;
    server.go_offline("/ot/stats/day");

    let err = client.day_stats("2025-01-01").await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(err.kind(), ErrorKind::NetworkOrServerError);
    assert!(client.session().is_authenticated());
}
