//! NYT best-sellers books search proxy.
//!
//! Validates book-search query parameters, forwards valid searches to the
//! upstream best-sellers history API and returns its `results` array.

pub mod books;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use books::ProxyHandler;
pub use config::BooksConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
