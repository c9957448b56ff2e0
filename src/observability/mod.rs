//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events, EnvFilter)
//!     → metrics.rs (request outcomes, upstream latency)
//!
//! Consumers:
//!     → stdout log aggregation
//!     → Prometheus scrape endpoint (when enabled)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the trace span of each request
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
