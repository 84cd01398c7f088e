//! Bootstrap, login and logout transitions of the session manager.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use client::{ApiRequest, ClientError, LoadProgress, RouteDecision, Screen};
use client::navigation::resolve;
use common::{FakeApi, LOGIN_TOKEN, PASSWORD, init_tracing, signed_in};

#[tokio::test]
async fn bootstrap_restores_a_session_from_the_cookie() {
    init_tracing();
    let server = FakeApi::new(&["ot.read"]);
    let client = server.client();
    assert!(client.session().is_loading());

    client.session().bootstrap().await;

    let session = client.session().snapshot();
    assert!(!session.is_loading());
    assert!(session.is_authenticated());
    assert_eq!(session.access_token(), Some("token-2"));
    assert_eq!(session.progress(), LoadProgress::READY);
    assert!(client.session().has("ot.read"));
}

#[tokio::test]
async fn bootstrap_without_cookie_ends_signed_out() {
    init_tracing();
    let server = FakeApi::new(&[]);
    server.fail_refresh();
    let client = server.client();

    client.session().bootstrap().await;

    let session = client.session().snapshot();
    assert!(!session.is_loading());
    assert!(!session.is_authenticated());
    assert_eq!(session.progress().label, "Not logged in");
    assert_eq!(
        resolve("/ot/logs", &session),
        RouteDecision::Render(Screen::Login)
    );
}

#[tokio::test]
async fn login_installs_token_and_user_together() {
    let (_server, client) = signed_in(&["users.read"]).await;

    let session = client.session().snapshot();
    assert_eq!(session.access_token(), Some(LOGIN_TOKEN));
    assert_eq!(session.user().map(|user| user.username.as_str()), Some("supervisor"));
    assert_eq!(session.progress(), LoadProgress::LOGGED_IN);
    assert_eq!(
        resolve("/login", &session),
        RouteDecision::Render(Screen::Dashboard)
    );
}

#[tokio::test]
async fn rejected_login_leaves_the_session_untouched() {
    init_tracing();
    let server = FakeApi::new(&[]);
    server.fail_refresh();
    let client = server.client();
    client.session().bootstrap().await;
    let before = client.session().snapshot();

    let result = client.session().login("sup@example.com", "nope").await;

    assert!(result.is_err());
    assert_eq!(client.session().snapshot(), before);
}

#[tokio::test]
async fn logout_clears_the_session_even_when_the_server_fails() {
    let (server, client) = signed_in(&["ot.read"]).await;
    server.fail_logout();

    client.session().logout().await;

    let session = client.session().snapshot();
    assert!(!session.is_authenticated());
    assert!(!session.has("ot.read"));
    assert_eq!(session.progress(), LoadProgress::LOGGED_OUT);
    assert_eq!(server.requests_to("/auth/logout").len(), 1);
}

#[tokio::test]
async fn logout_survives_an_unreachable_server() {
    let (server, client) = signed_in(&[]).await;
    server.go_offline("/auth/logout");

    client.session().logout().await;

    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn subscribers_see_every_transition() {
    init_tracing();
    let server = FakeApi::new(&[]);
    let client = server.client();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let id = {
        let seen = Rc::clone(&seen);
        client
            .session()
            .subscribe(move |session| seen.borrow_mut().push(session.progress().label))
    };

    client.session().login("sup@example.com", PASSWORD).await.unwrap();
    client.session().unsubscribe(id);
    client.session().logout().await;

    let labels = seen.borrow().clone();
    assert_eq!(labels.first(), Some(&"Logging in"));
    assert_eq!(labels.last(), Some(&"Logged in"));
    assert!(!labels.contains(&"Logged out"));
}

#[tokio::test]
async fn logout_wins_over_a_refresh_still_in_flight() {
    let (server, client) = signed_in(&["ot.read"]).await;
    server.expire_token();

    let (request, ()) = futures::join!(client.send(ApiRequest::get("/ot")), async {
        tokio::task::yield_now().await;
        client.session().logout().await;
    });

    assert_eq!(server.refresh_calls(), 1);
    assert_eq!(request.unwrap_err(), ClientError::AuthExpired);
    let session = client.session().snapshot();
    assert!(!session.is_authenticated());
    assert!(session.access_token().is_none());
    assert!(!session.has("ot.read"));
    assert_eq!(session.progress(), LoadProgress::LOGGED_OUT);
}

#[tokio::test]
async fn login_during_a_failing_bootstrap_keeps_the_new_session() {
    init_tracing();
    let server = FakeApi::new(&["ot.read"]);
    server.fail_refresh();
    let client = server.client();

    let ((), login) = futures::join!(client.session().bootstrap(), async {
        tokio::task::yield_now().await;
        client.session().login("sup@example.com", PASSWORD).await
    });

    assert!(login.is_ok());
    assert_eq!(server.refresh_calls(), 1);
    let session = client.session().snapshot();
    assert!(!session.is_loading());
    assert_eq!(session.access_token(), Some(LOGIN_TOKEN));
    assert!(session.has("ot.read"));
    assert_eq!(session.progress(), LoadProgress::LOGGED_IN);
}

#[tokio::test]
async fn refresh_after_a_completed_logout_still_applies() {
    let (server, client) = signed_in(&["ot.read"]).await;
    client.session().logout().await;
    client.session().bootstrap().await;

    assert_eq!(server.refresh_calls(), 1);
    assert!(client.session().has("ot.read"));
    assert_eq!(client.session().snapshot().progress(), LoadProgress::READY);
}
