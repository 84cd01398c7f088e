//! `has` and the gated navigation across session transitions.

mod common;

use client::gate::{OtCapabilities, navigation, shows_notification_bell};
use client::navigation::resolve;
use client::{ApiRequest, RouteDecision, Screen};
use common::{FakeApi, PASSWORD, init_tracing, signed_in};

const GRANTED: [&str; 3] = ["ot.read", "ot.approve", "employees.read"];

#[tokio::test]
async fn has_matches_the_role_right_after_login() {
    let (_server, client) = signed_in(&GRANTED).await;

    for token in GRANTED {
        assert!(client.session().has(token), "{token} should be granted");
    }
    for token in ["ot.reject", "users.read", "audit.read", "ot"] {
        assert!(!client.session().has(token), "{token} should be denied");
    }
}

#[tokio::test]
async fn has_is_false_for_everything_after_logout() {
    let (_server, client) = signed_in(&GRANTED).await;

    client.session().logout().await;

    for token in GRANTED {
        assert!(!client.session().has(token));
    }
    assert!(navigation(&client.session().snapshot())
        .iter()
        .all(|group| group.label == "Overview"));
}

#[tokio::test]
async fn failed_bootstrap_grants_nothing() {
    init_tracing();
    let server = FakeApi::new(&GRANTED);
    server.fail_refresh();
    let client = server.client();

    client.session().bootstrap().await;

    assert!(!client.session().has("ot.read"));
    assert!(!shows_notification_bell(&client.session().snapshot()));
}

#[tokio::test]
async fn can_approve_flag_does_not_stand_in_for_the_permission() {
    init_tracing();
    let server = FakeApi::new(&["ot.read"]);
    server.flag_can_approve();
    let client = server.client();
    client.session().login("sup@example.com", PASSWORD).await.unwrap();

    let session = client.session().snapshot();
    assert_eq!(session.user().map(|user| user.can_approve), Some(true));
    assert!(!session.has("ot.approve"));
    assert!(!OtCapabilities::of(&session).approve);
    assert!(!shows_notification_bell(&session));
}

#[tokio::test]
async fn refresh_rejection_sends_protected_routes_to_login() {
    let (server, client) = signed_in(&GRANTED).await;
    server.expire_token();
    server.fail_refresh();

    let _ = client.send(ApiRequest::get("/ot")).await;

    let session = client.session().snapshot();
    assert!(!session.has("ot.read"));
    assert_eq!(
        resolve(Screen::OtEntry.path(), &session),
        RouteDecision::Render(Screen::Login)
    );
}

#[tokio::test]
async fn permission_set_follows_a_refresh() {
    let (server, client) = signed_in(&GRANTED).await;
    server.expire_token();

    client.send(ApiRequest::get("/ot")).await.unwrap();

    assert!(client.session().has("ot.approve"));
    let session = client.session().snapshot();
    let screens: Vec<Screen> = navigation(&session)
        .iter()
        .flat_map(|group| group.items.iter().map(|item| item.screen))
        .collect();
    assert!(screens.contains(&Screen::OtLogs));
    assert!(screens.contains(&Screen::Employees));
    assert!(!screens.contains(&Screen::Users));
}
