//! Network transport abstraction.
//!
//! Adapters never talk to the network themselves: they hand a
//! [`SiteRequest`] to a [`Transport`] and parse what comes back. Session
//! handling (cookies, login) lives entirely behind this trait.

mod http;

pub use http::{HttpTransport, HttpTransportConfig};

use async_trait::async_trait;
use thiserror::Error;

use crate::query::SiteRequest;

/// Errors that can occur while performing a request.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// A response payload as received from the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// A 200 response carrying `body` as JSON.
    pub fn json(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: Some("application/json".to_string()),
            body: body.into(),
        }
    }

}

/// Sends site requests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Name for logging.
    fn name(&self) -> &str;

    /// Perform one request. Non-success statuses are errors.
    async fn send(&self, request: SiteRequest) -> Result<RawResponse, TransportError>;
}

