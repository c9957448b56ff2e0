//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, books route)
//!     → request.rs (request ID assigned and propagated)
//!     → books::ProxyHandler (validate, forward, map)
//!     → response.rs (BooksError → 422 payloads)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError, BOOKS_PATH};
