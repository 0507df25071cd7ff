//! # Transport
//!
//! The single seam between the explorer and the network: "GET this URL, give me JSON".
//!
//! Everything above this trait is generic over it, so tests swap the HTTP
//! implementation for [`MockTransport`](crate::framework::mock::MockTransport) without
//! touching client or view code.

use crate::framework::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

/// Issues a read-only GET and returns the decoded JSON document.
///
/// Implementations perform exactly one attempt per call and must not cache.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn get(&self, url: &Url) -> Result<Value, TransportError>;
}

/// [`Transport`] backed by a shared `reqwest` client.
///
/// Timeouts are left at the `reqwest` defaults.
#[derive(Clone, Default)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self), fields(url = %url))]
    async fn get(&self, url: &Url) -> Result<Value, TransportError> {
        debug!("Sending request");
        let response = self
            .http
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Request rejected");
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}
