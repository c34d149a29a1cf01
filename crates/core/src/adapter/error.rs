use thiserror::Error;

use crate::taxonomy::CategoryMapError;
use crate::transport::TransportError;

/// Errors returned by an adapter.
#[derive(Debug, Clone, Error)]
pub enum AdapterError {
    /// The adapter cannot work as configured.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl From<CategoryMapError> for AdapterError {
    fn from(e: CategoryMapError) -> Self {
        AdapterError::Configuration(e.to_string())
    }
}

/// A response that did not match the site's expected schema.
///
/// Adapters never return this to callers: a search whose response fails to
/// parse yields no entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ParseError {
    pub reason: String,
}

impl ParseError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Describe a JSON decoding failure, mentioning the content type when the
    /// site did not answer with JSON (typically a login page).
    pub fn from_json(e: serde_json::Error, content_type: Option<&str>) -> Self {
        match content_type {
            Some(ct) if !ct.to_ascii_lowercase().contains("json") => {
                Self::new(format!("Unexpected content type {}: {}", ct, e))
            }
            _ => Self::new(format!("Invalid response: {}", e)),
        }
    }
}
