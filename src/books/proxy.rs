//! The books search pipeline.
//!
//! ```text
//! Received → Validating → Rejected (422)
//!                       → Forwarding → Failed (422)
//!                                    → Succeeded (200)
//! ```
//!
//! One upstream attempt per request; nothing is shared between requests
//! except the immutable handler.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use url::Url;

use crate::books::mapper::map_results;
use crate::books::params::QueryParams;
use crate::books::types::{BookQuery, BooksError};
use crate::books::upstream::BooksApi;
use crate::books::validator::validate;
use crate::config::UpstreamConfig;
use crate::observability::metrics::{self, Outcome};

/// Path appended to the configured base URL.
pub const HISTORY_PATH: &str = "lists/best-sellers/history.json";

/// Separator the upstream expects between several ISBNs.
pub const ISBN_SEPARATOR: &str = ";";

/// Build the history endpoint from a base URL, with or without trailing `/`.
pub fn history_endpoint(base_url: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(HISTORY_PATH)
}

/// One outbound call, derived from a validated query and the config.
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    endpoint: Url,
    params: Vec<(&'static str, String)>,
}

impl UpstreamRequest {
    /// Absent fields are left out entirely; `offset` defaults to 0.
    pub fn new(query: &BookQuery, endpoint: &Url, api_key: &str) -> Self {
        let mut params = vec![("api-key", api_key.to_string())];
        if let Some(author) = &query.author {
            params.push(("author", author.clone()));
        }
        if let Some(title) = &query.title {
            params.push(("title", title.clone()));
        }
        if let Some(isbn) = &query.isbn {
            params.push(("isbn", isbn.join(ISBN_SEPARATOR)));
        }
        params.push(("offset", query.offset.unwrap_or(0).to_string()));

        Self {
            endpoint: endpoint.clone(),
            params,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

// Keeps the api key out of logs.
impl std::fmt::Debug for UpstreamRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params: Vec<_> = self
            .params
            .iter()
            .map(|(key, value)| match *key {
                "api-key" => (*key, "<redacted>"),
                _ => (*key, value.as_str()),
            })
            .collect();
        f.debug_struct("UpstreamRequest")
            .field("endpoint", &self.endpoint.as_str())
            .field("params", &params)
            .finish()
    }
}

/// Validates, forwards, and maps one books search.
pub struct ProxyHandler {
    api: Arc<dyn BooksApi>,
    endpoint: Url,
    api_key: String,
}

impl ProxyHandler {
    pub fn new(api: Arc<dyn BooksApi>, config: &UpstreamConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            api,
            endpoint: history_endpoint(&config.base_url)?,
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Run the pipeline. The success value is the upstream `results`.
    pub async fn search(&self, params: &QueryParams) -> Result<Value, BooksError> {
        let query = match validate(params) {
            Ok(query) => query,
            Err(errors) => {
                tracing::debug!(fields = %errors, "Rejected books query");
                metrics::record_request(Outcome::Rejected);
                return Err(BooksError::Validation(errors));
            }
        };

        let request = UpstreamRequest::new(&query, &self.endpoint, &self.api_key);
        tracing::debug!(request = ?request, "Forwarding books query");

        let start = Instant::now();
        let result = self.api.best_sellers_history(&request).await;
        metrics::record_upstream_duration(start);

        match result {
            Ok(body) => {
                if !(200..300).contains(&body.status) {
                    tracing::warn!(status = body.status, "Upstream returned non-success status");
                }
                let books = map_results(body.json);
                tracing::info!(
                    status = body.status,
                    results = books.as_array().map(Vec::len).unwrap_or(0),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Books query served"
                );
                metrics::record_request(Outcome::Succeeded);
                Ok(books)
            }
            Err(e) => {
                tracing::error!(error = %e, "Upstream unavailable");
                metrics::record_request(Outcome::Failed);
                Err(BooksError::UpstreamUnavailable(e))
            }
        }
    }
}
