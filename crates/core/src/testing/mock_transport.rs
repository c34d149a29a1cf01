//! Mock transport for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::query::SiteRequest;
use crate::transport::{RawResponse, Transport, TransportError};

/// Mock implementation of the Transport trait.
///
/// Provides controllable behavior for testing:
/// - Queue canned responses or errors, served in order
/// - Fall back to a fixed response once the queue is empty
/// - Track sent requests for assertions
/// - Simulate slow sites
///
/// # Example
///
/// ```rust,ignore
/// use scour_core::testing::{MockTransport, fixtures};
///
/// let transport = MockTransport::new();
/// transport.push_response(RawResponse::json(fixtures::shiza_response(vec![]))).await;
///
/// let entries = adapter.search(&UniversalQuery::search("naruto")).await?;
/// assert_eq!(transport.request_count().await, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    /// Queued outcomes, served front first.
    queue: Arc<RwLock<VecDeque<Result<RawResponse, TransportError>>>>,
    /// Served when the queue is empty.
    fallback: Arc<RwLock<Option<RawResponse>>>,
    /// Recorded requests.
    requests: Arc<RwLock<Vec<SiteRequest>>>,
    /// Simulated latency per request.
    delay: Arc<RwLock<Option<Duration>>>,
}

impl MockTransport {
    /// Create a new mock transport with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that answers every request with `response`.
    pub async fn always(response: RawResponse) -> Self {
        let transport = Self::new();
        transport.set_fallback(response).await;
        transport
    }

    /// Queue a response.
    pub async fn push_response(&self, response: RawResponse) {
        self.queue.write().await.push_back(Ok(response));
    }

    /// Queue a JSON body as a 200 response.
    pub async fn push_json(&self, body: Vec<u8>) {
        self.push_response(RawResponse::json(body)).await;
    }

    /// Queue an error.
    pub async fn push_error(&self, error: TransportError) {
        self.queue.write().await.push_back(Err(error));
    }

    /// Set the response served once the queue is exhausted.
    pub async fn set_fallback(&self, response: RawResponse) {
        *self.fallback.write().await = Some(response);
    }

    /// Delay every request by `delay`.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Get the number of requests sent.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// The most recent request, if any.
    pub async fn last_request(&self) -> Option<SiteRequest> {
        self.requests.read().await.last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, request: SiteRequest) -> Result<RawResponse, TransportError> {
        self.requests.write().await.push(request);

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(outcome) = self.queue.write().await.pop_front() {
            return outcome;
        }

        match self.fallback.read().await.clone() {
            Some(response) => Ok(response),
            None => Err(TransportError::Request(
                "MockTransport: no response queued".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_queue_in_order() {
        let transport = MockTransport::new();
        transport.push_json(b"1".to_vec()).await;
        transport.push_error(TransportError::Timeout).await;

        let first = transport.send(SiteRequest::get("https://a/")).await.unwrap();
        assert_eq!(first.body, b"1");
        assert!(matches!(
            transport.send(SiteRequest::get("https://b/")).await,
            Err(TransportError::Timeout)
        ));
        assert!(transport.send(SiteRequest::get("https://c/")).await.is_err());

        assert_eq!(transport.request_count().await, 3);
        assert_eq!(transport.last_request().await.unwrap().url, "https://c/");
    }

    #[tokio::test]
    async fn test_fallback() {
        let transport = MockTransport::always(RawResponse::json("{}")).await;
        for _ in 0..3 {
            assert!(transport.send(SiteRequest::get("https://a/")).await.is_ok());
        }
    }
}
