//! Outbound call to the best-sellers API.
//!
//! The handler only sees [`BooksApi`], so tests can swap the network for
//! an in-memory fake.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::books::proxy::UpstreamRequest;
use crate::books::types::UpstreamError;
use crate::config::TimeoutConfig;

/// What came back from the upstream once a full response was received.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamBody {
    /// HTTP status, recorded for logging only.
    pub status: u16,
    /// Parsed body; `Null` when the body was not JSON.
    pub json: Value,
}

#[async_trait]
pub trait BooksApi: Send + Sync {
    /// Perform exactly one call. No retries.
    async fn best_sellers_history(
        &self,
        request: &UpstreamRequest,
    ) -> Result<UpstreamBody, UpstreamError>;
}

/// [`BooksApi`] over a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpBooksApi {
    client: reqwest::Client,
}

impl HttpBooksApi {
    /// Build a client bounded by the configured connect and total timeouts.
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.upstream_connect_secs))
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BooksApi for HttpBooksApi {
    async fn best_sellers_history(
        &self,
        request: &UpstreamRequest,
    ) -> Result<UpstreamBody, UpstreamError> {
        let response = self
            .client
            .get(request.endpoint().clone())
            .query(request.params())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        // The body is part of the call: a reset mid-body is a transport failure.
        let bytes = response.bytes().await?;
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        Ok(UpstreamBody { status, json })
    }
}
