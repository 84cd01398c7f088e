//! In-memory stand-in for the OT Dashboard API.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use client::{ApiClient, ApiRequest, ApiResponse, ClientConfig, HttpTransport, TransportError};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{Value, json};

pub const PASSWORD: &str = "correct-horse";
pub const LOGIN_TOKEN: &str = "login-token";

/// Route a test log line through the test harness writer.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("client=debug")
        .with_test_writer()
        .try_init();
}

pub fn user_json(permissions: &[&str], can_approve: bool) -> Value {
    json!({
        "id": "u1",
        "email": "sup@example.com",
        "username": "supervisor",
        "canApprove": can_approve,
        "role": { "_id": "r1", "name": "supervisor", "permissions": permissions }
    })
}

/// A fake server that checks bearer tokens and issues new ones on refresh.
///
/// Refresh sleeps for `refresh_delay` before answering, which keeps it in flight
/// long enough for concurrent callers to pile up behind it.
#[derive(Debug)]
pub struct FakeApi {
    valid_token: RefCell<Option<String>>,
    refresh_calls: Cell<usize>,
    refresh_ok: Cell<bool>,
    refresh_delay: Duration,
    logout_ok: Cell<bool>,
    can_approve: Cell<bool>,
    permissions: Vec<String>,
    requests: RefCell<Vec<ApiRequest>>,
    routes: RefCell<HashMap<String, Value>>,
    headers: RefCell<HashMap<String, Vec<(&'static str, String)>>>,
    always_unauthorized: RefCell<HashSet<String>>,
    forbidden: RefCell<HashSet<String>>,
    offline: RefCell<HashSet<String>>,
}

impl FakeApi {
    pub fn new(permissions: &[&str]) -> Rc<Self> {
        Rc::new(Self {
            valid_token: RefCell::new(None),
            refresh_calls: Cell::new(0),
            refresh_ok: Cell::new(true),
            refresh_delay: Duration::from_millis(20),
            logout_ok: Cell::new(true),
            can_approve: Cell::new(false),
            permissions: permissions.iter().map(ToString::to_string).collect(),
            requests: RefCell::new(Vec::new()),
            routes: RefCell::new(HashMap::new()),
            headers: RefCell::new(HashMap::new()),
            always_unauthorized: RefCell::new(HashSet::new()),
            forbidden: RefCell::new(HashSet::new()),
            offline: RefCell::new(HashSet::new()),
        })
    }

    pub fn client(self: &Rc<Self>) -> ApiClient {
        ApiClient::with_transport(
            ClientConfig::new().with_base_url("http://fake/api"),
            Rc::clone(self) as Rc<dyn HttpTransport>,
        )
    }

    /// Answer `path` with `body` for any authorized request.
    pub fn route(&self, path: &str, body: Value) {
        self.routes.borrow_mut().insert(path.to_string(), body);
    }

    pub fn route_header(&self, path: &str, name: &'static str, value: &str) {
        self.headers
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push((name, value.to_string()));
    }

    /// Invalidate whatever token the client currently holds.
    pub fn expire_token(&self) {
        *self.valid_token.borrow_mut() = Some("rotated-elsewhere".to_string());
    }

    pub fn fail_refresh(&self) {
        self.refresh_ok.set(false);
    }

    /// Report the user with `canApprove: true`, whatever the role grants.
    pub fn flag_can_approve(&self) {
        self.can_approve.set(true);
    }

    pub fn fail_logout(&self) {
        self.logout_ok.set(false);
    }

    pub fn reject_always(&self, path: &str) {
        self.always_unauthorized.borrow_mut().insert(path.to_string());
    }

    pub fn forbid(&self, path: &str) {
        self.forbidden.borrow_mut().insert(path.to_string());
    }

    pub fn go_offline(&self, path: &str) {
        self.offline.borrow_mut().insert(path.to_string());
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.get()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.path == path)
            .cloned()
            .collect()
    }

    fn auth_body(&self, token: &str) -> Value {
        let permissions: Vec<&str> = self.permissions.iter().map(String::as_str).collect();
        json!({ "accessToken": token, "user": user_json(&permissions, self.can_approve.get()) })
    }

    fn issue(&self, token: String) -> ApiResponse {
        let body = self.auth_body(&token);
        *self.valid_token.borrow_mut() = Some(token);
        respond(StatusCode::OK, &body)
    }

    async fn refresh(&self) -> ApiResponse {
        let call = self.refresh_calls.get() + 1;
        self.refresh_calls.set(call);
        tokio::time::sleep(self.refresh_delay).await;
        if self.refresh_ok.get() {
            self.issue(format!("token-{}", call + 1))
        } else {
            respond(
                StatusCode::UNAUTHORIZED,
                &json!({ "message": "Refresh token missing" }),
            )
        }
    }

    fn login(&self, request: &ApiRequest) -> ApiResponse {
        let password = match &request.body {
            client::transport::RequestBody::Json(body) => body["password"].as_str(),
            _ => None,
        };
        if password == Some(PASSWORD) {
            self.issue(LOGIN_TOKEN.to_string())
        } else {
            respond(
                StatusCode::UNAUTHORIZED,
                &json!({ "message": "Invalid credentials" }),
            )
        }
    }

    fn resource(&self, request: &ApiRequest) -> ApiResponse {
        let authorized = request.bearer.is_some()
            && request.bearer.as_deref() == self.valid_token.borrow().as_deref();
        if !authorized || self.always_unauthorized.borrow().contains(&request.path) {
            return respond(
                StatusCode::UNAUTHORIZED,
                &json!({ "message": "Token expired" }),
            );
        }
        if self.forbidden.borrow().contains(&request.path) {
            return respond(
                StatusCode::FORBIDDEN,
                &json!({ "message": "Missing permission users.read" }),
            );
        }

        let body = self
            .routes
            .borrow()
            .get(&request.path)
            .cloned()
            .unwrap_or_else(|| json!({}));
        let mut response = respond(StatusCode::OK, &body);
        if let Some(extra) = self.headers.borrow().get(&request.path) {
            for (name, value) in extra {
                response
                    .headers
                    .insert(*name, HeaderValue::from_str(value).unwrap());
            }
        }
        response
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeApi {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        if self.offline.borrow().contains(&request.path) {
            return Err(TransportError::new("connection refused"));
        }

        let response = match request.path.as_str() {
            "/auth/refresh" => self.refresh().await,
            "/auth/login" => self.login(request),
            "/auth/logout" if self.logout_ok.get() => {
                *self.valid_token.borrow_mut() = None;
                respond(StatusCode::OK, &json!({ "ok": true }))
            }
            "/auth/logout" => respond(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({ "message": "boom" }),
            ),
            _ => self.resource(request),
        };
        Ok(response)
    }
}

pub fn respond(status: StatusCode, body: &Value) -> ApiResponse {
    let mut headers = HeaderMap::new();
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    ApiResponse {
        status,
        headers,
        body: serde_json::to_vec(body).unwrap(),
    }
}

/// Client already signed in with [`LOGIN_TOKEN`].
pub async fn signed_in(permissions: &[&str]) -> (Rc<FakeApi>, ApiClient) {
    init_tracing();
    let server = FakeApi::new(permissions);
    let client = server.client();
    client
        .session()
        .login("sup@example.com", PASSWORD)
        .await
        .unwrap();
    (server, client)
}
