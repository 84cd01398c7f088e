use reqwest::StatusCode;
use thiserror::Error;

use crate::transport::{ApiRequest, ApiResponse, TransportError};

pub type ClientResult<T> = Result<T, ClientError>;

/// Coarse category used by the UI to decide how to react to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The session is gone; the user must sign in again.
    AuthExpired,
    /// The login endpoint rejected the email/password pair.
    InvalidCredentials,
    /// The server refused the action for the current role.
    PermissionDenied,
    /// Anything else: connectivity, server faults, bad payloads.
    NetworkOrServerError,
}

/// Every failure the dashboard client can surface.
///
/// One refresh outcome is cloned into every request that joined it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("session expired")]
    AuthExpired,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("{0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Map a non-success response onto the error taxonomy.
    pub(crate) fn from_response(request: &ApiRequest, response: &ApiResponse) -> Self {
        let status = response.status;
        let message = response
            .error_message()
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

        match status {
            StatusCode::UNAUTHORIZED if request.is_login() => Self::InvalidCredentials,
            StatusCode::UNAUTHORIZED => Self::AuthExpired,
            StatusCode::FORBIDDEN => Self::PermissionDenied { message },
            _ => Self::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthExpired => ErrorKind::AuthExpired,
            Self::InvalidCredentials => ErrorKind::InvalidCredentials,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::Api { .. } | Self::Network(_) | Self::Decode(_) | Self::InvalidRequest(_) => {
                ErrorKind::NetworkOrServerError
            }
        }
    }

    /// Text suitable for a toast or an inline form error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthExpired => "Your session has expired. Please sign in again.".to_string(),
            Self::InvalidCredentials => "Invalid credentials".to_string(),
            Self::PermissionDenied { message } => {
                if message.is_empty() || message == "Forbidden" {
                    "You do not have permission to do that.".to_string()
                } else {
                    message.clone()
                }
            }
            Self::Api { message, .. } => message.clone(),
            Self::Network(_) => "Cannot reach the server. Check your connection.".to_string(),
            Self::Decode(_) => "The server sent an unexpected response.".to_string(),
            Self::InvalidRequest(message) => message.clone(),
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
