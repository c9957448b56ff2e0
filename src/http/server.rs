//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the books endpoint
//! - Wire up middleware (tracing, request timeout, request ID)
//! - Build the upstream client and proxy handler from config
//! - Serve until the shutdown coordinator fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{RawQuery, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::Instrument;

use crate::books::{BooksApi, BooksError, HttpBooksApi, ProxyHandler, QueryParams};
use crate::config::BooksConfig;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::lifecycle::shutdown::wait as wait_for_shutdown;

/// Public path of the books search.
pub const BOOKS_PATH: &str = "/api/v1/nyt/books";

/// Errors building the server from configuration.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid upstream base URL: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<ProxyHandler>,
}

/// HTTP server for the books proxy.
pub struct HttpServer {
    router: Router,
    config: BooksConfig,
}

impl HttpServer {
    /// Create a server that talks to the configured upstream over HTTP.
    pub fn new(config: BooksConfig) -> Result<Self, ServerError> {
        let api = Arc::new(HttpBooksApi::new(&config.timeouts)?);
        Self::with_api(config, api)
    }

    /// Create a server around any [`BooksApi`] implementation.
    pub fn with_api(config: BooksConfig, api: Arc<dyn BooksApi>) -> Result<Self, ServerError> {
        let handler = Arc::new(ProxyHandler::new(api, &config.upstream)?);
        let router = Self::build_router(&config, AppState { handler });
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &BooksConfig, state: AppState) -> Router {
        Router::new()
            .route(BOOKS_PATH, get(books_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for driving without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &BooksConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// `GET /api/v1/nyt/books`
///
/// The raw query is decoded by hand so `isbn=x` and `isbn[]=x` stay
/// distinguishable.
async fn books_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Json<Value>, BooksError> {
    let params = QueryParams::parse(query.as_deref().unwrap_or(""));
    let span = tracing::info_span!("books", request_id = %request_id(&headers));

    state.handler.search(&params).instrument(span).await.map(Json)
}
