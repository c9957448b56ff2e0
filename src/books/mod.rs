//! Books search: validation, upstream forwarding, response shaping.
//!
//! # Data Flow
//! ```text
//! raw query string
//!     → params.rs (decode scalars and `key[]` arrays)
//!     → validator.rs (field rules, accumulate all findings)
//!     → proxy.rs (build UpstreamRequest, one call through BooksApi)
//!     → upstream.rs (reqwest, bounded by timeouts)
//!     → mapper.rs (`results` or [])
//! ```
//!
//! # Design Decisions
//! - Validation failures stop the request before any outbound call
//! - Transport failures are values (`UpstreamError`), not panics
//! - Upstream status codes are not interpreted; only `results` is read

pub mod mapper;
pub mod params;
pub mod proxy;
pub mod types;
pub mod upstream;
pub mod validator;

pub use params::{ParamValue, QueryParams};
pub use proxy::{ProxyHandler, UpstreamRequest};
pub use types::{BookQuery, BooksError, UpstreamError, ValidationErrors};
pub use upstream::{BooksApi, HttpBooksApi, UpstreamBody};
