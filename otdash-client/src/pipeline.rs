use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::session::SessionManager;
use crate::transport::{ApiRequest, ApiResponse};

/// Request middleware: bearer token on the way out, refresh-and-retry on a 401.
///
/// A 401 from a non-auth endpoint joins the single refresh in flight (or starts
/// it), then re-sends the request once with the new token. A request that was
/// already retried, or that targets login/refresh/logout, fails straight away.
#[derive(Debug, Clone)]
pub struct AuthPipeline {
    session: SessionManager,
}

impl AuthPipeline {
    pub fn new(session: SessionManager) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Send `request` and return the successful response, or the mapped error.
    pub async fn execute(&self, mut request: ApiRequest) -> ClientResult<ApiResponse> {
        let response = self.dispatch(&mut request).await?;
        if response.status.is_success() {
            return Ok(response);
        }

        if response.status != StatusCode::UNAUTHORIZED
            || request.is_auth_endpoint()
            || request.is_retried()
        {
            return Err(ClientError::from_response(&request, &response));
        }

        request.mark_retried();
        info!(path = %request.path, "access token rejected");

        if let Err(err) = self.session.refresh_after_unauthorized().await {
            warn!(path = %request.path, error = %err, "refresh failed, session cleared");
            return Err(ClientError::AuthExpired);
        }

        let retry = self.dispatch(&mut request).await?;
        if retry.status.is_success() {
            Ok(retry)
        } else {
            Err(ClientError::from_response(&request, &retry))
        }
    }

    async fn dispatch(&self, request: &mut ApiRequest) -> ClientResult<ApiResponse> {
        request.bearer = if request.is_auth_endpoint() {
            None
        } else {
            self.session.access_token()
        };

        debug!(
            method = %request.method,
            path = %request.path,
            retried = request.is_retried(),
            "sending request"
        );
        let response = self.session.transport().send(request).await?;
        debug!(
            path = %request.path,
            status = response.status.as_u16(),
            "response received"
        );
        Ok(response)
    }
}
