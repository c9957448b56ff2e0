//! Configuration validation.
//!
//! Serde handles the syntactic side; this module checks values.
//! Every problem is reported, not just the first one.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::BooksConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("upstream.base_url `{0}` is not an http(s) URL")]
    BaseUrl(String),

    #[error("upstream.api_key must be set")]
    MissingApiKey,

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    /// The inbound deadline must outlast the upstream call.
    #[error("timeouts.request_secs ({request_secs}) must be greater than timeouts.upstream_secs ({upstream_secs})")]
    RequestDeadline { request_secs: u64, upstream_secs: u64 },

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),
}

/// Check a configuration, returning every problem found.
pub fn validate_config(config: &BooksConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::BaseUrl(config.upstream.base_url.clone())),
    }

    if config.upstream.api_key.trim().is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }

    let timeouts = [
        ("request_secs", config.timeouts.request_secs),
        ("upstream_connect_secs", config.timeouts.upstream_connect_secs),
        ("upstream_secs", config.timeouts.upstream_secs),
    ];
    for (name, value) in timeouts {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    let request_secs = config.timeouts.request_secs;
    let upstream_secs = config.timeouts.upstream_secs;
    if request_secs > 0 && upstream_secs > 0 && request_secs <= upstream_secs {
        errors.push(ValidationError::RequestDeadline {
            request_secs,
            upstream_secs,
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
