//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use books_proxy::config::BooksConfig;
use books_proxy::{HttpServer, Shutdown};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const API_KEY: &str = "test-key";
pub const HISTORY_PATH: &str = "/svc/books/v3/lists/best-sellers/history.json";

/// A raw-TCP upstream that records request lines and answers with a fixed response.
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    /// Base URL in the shape the proxy expects.
    pub fn base_url(&self) -> String {
        format!("http://{}/svc/books/v3/", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Request lines, e.g. `GET /svc/...?api-key=... HTTP/1.1`.
    pub fn request_lines(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Path and query of the only request received.
    pub fn only_target(&self) -> String {
        let lines = self.request_lines();
        assert_eq!(lines.len(), 1, "expected exactly one upstream call: {lines:?}");
        lines[0]
            .split_whitespace()
            .nth(1)
            .expect("request target")
            .to_string()
    }
}

/// Start a mock upstream replying `status` with `body` as JSON.
pub async fn start_mock_upstream(status: u16, body: String) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();
    let body = Arc::new(body);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let recorded = recorded.clone();
                    let body = body.clone();
                    tokio::spawn(async move {
                        let line = read_request_line(&mut socket).await;
                        recorded.lock().unwrap().push(line);

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_line(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockUpstream { addr, requests }
}

/// Start an upstream that accepts connections but never answers.
pub async fn start_silent_upstream() -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let recorded = recorded.clone();
            tokio::spawn(async move {
                let line = read_request_line(&mut socket).await;
                recorded.lock().unwrap().push(line);
                tokio::time::sleep(Duration::from_secs(30)).await;
                drop(socket);
            });
        }
    });

    MockUpstream { addr, requests }
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

async fn read_request_line(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buf)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

fn status_line(status: u16) -> String {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or_else(|| panic!("mock upstream has no reason phrase for status {status}"));
    format!("{status} {reason}")
}

/// Config pointing at `base_url` with short upstream timeouts.
pub fn test_config(base_url: String) -> BooksConfig {
    let mut config = BooksConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = base_url;
    config.upstream.api_key = API_KEY.into();
    config.timeouts.upstream_connect_secs = 1;
    config.timeouts.upstream_secs = 1;
    config
}

/// Run the real server on an ephemeral port.
pub async fn start_proxy(config: BooksConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// The single record the upstream fixture returns.
pub fn book_sample() -> Value {
    json!({
        "title": "AMERICAN GROWN",
        "description": "The story of the White House kitchen garden and gardens across the country.",
        "contributor": "by Michelle Obama",
        "author": "Michelle Obama",
        "contributor_note": "",
        "price": "30.00",
        "age_group": "",
        "publisher": "Crown",
        "isbns": {
            "isbn10": "0307956024",
            "isbn13": "9780307956026"
        },
        "ranks_history": [],
        "reviews": {
            "book_review_link": "",
            "first_chapter_link": "",
            "sunday_review_link": "",
            "article_chapter_link": ""
        }
    })
}

/// Full upstream body around [`book_sample`].
pub fn history_fixture() -> String {
    json!({
        "status": "OK",
        "copyright": "Copyright (c) 2022 The New York Times Company.  All Rights Reserved.",
        "num_results": 1,
        "results": [book_sample()]
    })
    .to_string()
}
