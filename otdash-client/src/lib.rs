//! Platform-neutral core of the OT Dashboard.
//!
//! The [`SessionManager`] owns the access token and the signed-in user, the
//! [`AuthPipeline`] attaches bearer tokens and renews them on a 401, and the
//! [`gate`] and [`navigation`] modules decide what the signed-in role may see.
//! [`ApiClient`] exposes the REST endpoints on top of all that.
//!
//! The crate compiles both for `wasm32` (the web front end) and natively, where
//! its tests run on a current-thread tokio runtime against fake transports.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod calendar;
pub mod config;
pub mod download;
pub mod error;
pub mod gate;
pub mod generation;
pub mod navigation;
pub mod pipeline;
pub mod session;
pub mod transport;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use download::Download;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use generation::{GenerationTicket, RequestGeneration};
pub use navigation::{RouteDecision, Screen};
pub use pipeline::AuthPipeline;
pub use session::{LoadProgress, Session, SessionManager, SubscriptionId};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport, TransportError};
