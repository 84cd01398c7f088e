//! Typed access to the OT Dashboard REST API.
//!
//! Every call goes through the [`AuthPipeline`], so bearer tokens and the
//! refresh-on-401 retry apply uniformly.

mod audit;
mod employees;
mod fingerprint;
mod notifications;
mod ot_logs;
mod overtime;
mod reasons;
mod roles;
mod triple_ot;
mod users;

use std::rc::Rc;

use serde::de::DeserializeOwned;

pub use audit::AuditQuery;
pub use employees::EmployeeQuery;
pub use fingerprint::{fingerprint_download, project_csv};
pub use notifications::NotificationFeed;
pub use ot_logs::OtLogQuery;
pub use overtime::{OtQuery, prepare_bulk_rows};
pub use users::{MIN_PASSWORD_LEN, UserQuery};

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::pipeline::AuthPipeline;
use crate::session::SessionManager;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};

/// The dashboard's API client: session manager plus typed endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    pipeline: AuthPipeline,
}

impl ApiClient {
    /// Client talking to `config.api_base_url` over HTTP.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let transport = ReqwestTransport::new(config.api_base_url())?;
        Ok(Self::with_transport(config, Rc::new(transport)))
    }

    /// Client over an arbitrary transport.
    pub fn with_transport(config: ClientConfig, transport: Rc<dyn HttpTransport>) -> Self {
        let session = SessionManager::new(transport);
        Self {
            config,
            pipeline: AuthPipeline::new(session),
        }
    }

    pub fn session(&self) -> &SessionManager {
        self.pipeline.session()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a request through the pipeline and return the raw response.
    pub async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        self.pipeline.execute(request).await
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        self.send(request).await?.json()
    }

    pub(crate) async fn send_unit(&self, request: ApiRequest) -> ClientResult<()> {
        self.send(request).await.map(|_| ())
    }
}

/// Trim `value` and turn an empty result into `None`, for optional filters.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_filters_blank_input() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" E042 "), Some("E042".to_string()));
    }
}
