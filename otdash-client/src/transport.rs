//! The single I/O seam of the client: one request in, one response out.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::models::ErrorResponse;
use thiserror::Error;

use crate::error::{ClientError, ClientResult};

pub(crate) const AUTH_LOGIN: &str = "/auth/login";
pub(crate) const AUTH_REFRESH: &str = "/auth/refresh";
pub(crate) const AUTH_LOGOUT: &str = "/auth/logout";
const AUTH_ENDPOINTS: [&str; 3] = [AUTH_LOGIN, AUTH_REFRESH, AUTH_LOGOUT];

/// Connectivity-level failure: nothing usable came back from the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A file attached to a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(FilePart),
}

/// A request as seen by the pipeline, relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// Bearer token attached by the pipeline right before dispatch.
    pub bearer: Option<String>,
    retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            bearer: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> ClientResult<Self> {
        let value = serde_json::to_value(payload)
            .map_err(|err| ClientError::invalid(format!("cannot encode request: {err}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Append the fields of a flat struct as query parameters. `None` fields are skipped.
    pub fn query<T: Serialize + ?Sized>(mut self, params: &T) -> ClientResult<Self> {
        let value = serde_json::to_value(params)
            .map_err(|err| ClientError::invalid(format!("cannot encode query: {err}")))?;
        let Value::Object(map) = value else {
            return Err(ClientError::invalid("query parameters must be a struct"));
        };
        for (key, value) in map {
            let rendered = match value {
                Value::Null => continue,
                Value::String(text) => text,
                other => other.to_string(),
            };
            self.query.push((key, rendered));
        }
        Ok(self)
    }

    #[must_use]
    pub fn multipart(mut self, part: FilePart) -> Self {
        self.body = RequestBody::Multipart(part);
        self
    }

    /// Whether this request already went through one refresh-and-retry cycle.
    pub fn is_retried(&self) -> bool {
        self.retried
    }

    pub(crate) fn mark_retried(&mut self) {
        self.retried = true;
    }

    /// Path without query string or surrounding slashes.
    fn endpoint(&self) -> &str {
        self.path
            .split_once('?')
            .map_or(self.path.as_str(), |(path, _)| path)
            .trim_matches('/')
    }

    fn targets(&self, endpoint: &str) -> bool {
        self.endpoint() == endpoint.trim_start_matches('/')
    }

    /// Login, refresh and logout are never retried and never carry a bearer token.
    pub fn is_auth_endpoint(&self) -> bool {
        AUTH_ENDPOINTS.iter().any(|endpoint| self.targets(endpoint))
    }

    pub(crate) fn is_login(&self) -> bool {
        self.targets(AUTH_LOGIN)
    }

    /// Value looked up in the query string, mostly useful to test doubles.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        serde_json::from_slice(&self.body).map_err(ClientError::from)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// The `message` of a server `ErrorResponse` body, when there is one.
    pub fn error_message(&self) -> Option<String> {
        serde_json::from_slice::<ErrorResponse>(&self.body)
            .ok()
            .map(|body| body.message)
            .filter(|message| !message.is_empty())
    }
}

/// Sends requests to the API. Implemented by [`ReqwestTransport`] and by test doubles.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Production transport backed by `reqwest`.
///
/// In the browser the refresh cookie only travels with `credentials: include`;
/// natively a cookie store plays the same role.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: String,
    client: Client,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.cookie_store(true);
        let client = builder
            .build()
            .map_err(|err| TransportError::new(err.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.clone(), self.api_url(&request.path));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        #[cfg(target_arch = "wasm32")]
        {
            builder = builder.fetch_credentials_include();
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(part) => {
                let file = reqwest::multipart::Part::bytes(part.bytes.clone())
                    .file_name(part.file_name.clone());
                builder.multipart(reqwest::multipart::Form::new().part(part.field.clone(), file))
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|err| TransportError::new(err.to_string()))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|err| TransportError::new(err.to_string()))?
            .to_vec();

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Filters {
        page: u32,
        search: Option<String>,
        include_deleted: bool,
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("no representation"))
        }
    }

    #[test]
    fn query_skips_absent_fields() {
        let request = ApiRequest::get("/employees")
            .query(&Filters {
                page: 2,
                search: None,
                include_deleted: true,
            })
            .unwrap();
        assert_eq!(request.query_value("page"), Some("2"));
        assert_eq!(request.query_value("includeDeleted"), Some("true"));
        assert_eq!(request.query_value("search"), None);
    }

    #[test]
    fn auth_endpoints_are_recognised() {
        assert!(ApiRequest::post("/auth/refresh").is_auth_endpoint());
        assert!(ApiRequest::post("auth/logout").is_auth_endpoint());
        assert!(ApiRequest::post("/auth/login").is_login());
        assert!(!ApiRequest::get("/employees").is_auth_endpoint());
    }

    #[test]
    fn auth_matching_is_by_whole_path() {
        assert!(ApiRequest::post("/auth/refresh?silent=1").is_auth_endpoint());
        assert!(!ApiRequest::get("/oauth/login-history").is_auth_endpoint());
        assert!(!ApiRequest::get("/oauth/login-history").is_login());
        assert!(!ApiRequest::get("/audit/auth/logout/events").is_auth_endpoint());
        assert!(!ApiRequest::post("/auth/login-attempts").is_login());
    }

    #[test]
    fn unencodable_query_is_an_error() {
        let err = ApiRequest::get("/employees").query(&Unencodable).unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(message) if message.contains("no representation")));

        let err = ApiRequest::get("/employees").query(&[1, 2]).unwrap_err();
        assert_eq!(
            err,
            ClientError::InvalidRequest("query parameters must be a struct".to_string())
        );
    }

    #[test]
    fn fresh_requests_are_not_retried() {
        let mut request = ApiRequest::get("/ot");
        assert!(!request.is_retried());
        request.mark_retried();
        assert!(request.is_retried());
    }

    #[test]
    fn api_url_joins_without_double_slashes() {
        let transport = ReqwestTransport::new("http://localhost:4000/api/").unwrap();
        assert_eq!(
            transport.api_url("/employees"),
            "http://localhost:4000/api/employees"
        );
    }

    #[test]
    fn error_message_ignores_non_json_bodies() {
        let response = ApiResponse {
            status: StatusCode::BAD_GATEWAY,
            headers: HeaderMap::new(),
            body: b"bad gateway".to_vec(),
        };
        assert_eq!(response.error_message(), None);
    }
}
