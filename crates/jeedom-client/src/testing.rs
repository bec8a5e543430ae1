//! Test utilities for jeedom-client
//!
//! [`MockJeedom`] serves the control endpoint on a random local port with a
//! programmable reply and records every request it receives.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use parking_lot::Mutex;
use tokio::net::TcpListener;

use crate::config::ConfigOverrides;
use crate::types::API_PATH;
use crate::{JeedomClient, Result};

/// API key the default mock client is configured with
pub const TEST_API_KEY: &str = "test-api-key";

/// A request captured by [`MockJeedom`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Query pairs in the order they were sent
    pub query: Vec<(String, String)>,
    /// Headers with lowercase names
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    /// First value of a query parameter
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Header value, looked up case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
struct Reply {
    status: u16,
    body: String,
}

#[derive(Clone)]
struct MockState {
    reply: Arc<Mutex<Reply>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn handle_api(
    State(state): State<MockState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let query: Vec<(String, String)> = query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default();
    let headers: Vec<(String, String)> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    state.requests.lock().push(RecordedRequest { query, headers });

    let reply = state.reply.lock().clone();
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, reply.body).into_response()
}

/// A mock Jeedom server that automatically shuts down when dropped
pub struct MockJeedom {
    pub addr: SocketAddr,
    pub client: JeedomClient,
    state: MockState,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl MockJeedom {
    /// Start a mock server replying `200` with an empty body
    ///
    /// # Example
    ///
    /// ```ignore
    /// use jeedom_client::testing::MockJeedom;
    ///
    /// let server = MockJeedom::start().await?;
    /// server.reply(201, "jeedom");
    ///
    /// assert_eq!(server.client.command(4).await?, "jeedom");
    /// assert_eq!(server.last_request().unwrap().query_value("id"), Some("4"));
    /// ```
    pub async fn start() -> Result<Self> {
        Self::start_with(ConfigOverrides::new().api_key(TEST_API_KEY)).await
    }

    /// Start a mock server; the client is built from `overrides` with the
    /// base URL pointed at the server
    pub async fn start_with(overrides: ConfigOverrides) -> Result<Self> {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let state = MockState {
            reply: Arc::new(Mutex::new(Reply {
                status: 200,
                body: String::new(),
            })),
            requests: Arc::new(Mutex::new(Vec::new())),
        };

        let router = Router::new()
            .route(API_PATH, get(handle_api))
            .with_state(state.clone());

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        let client = JeedomClient::from_overrides(overrides.base_url(format!("http://{}", addr)))?;

        Ok(Self {
            addr,
            client,
            state,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Set the status and body returned for every subsequent request
    pub fn reply(&self, status: u16, body: impl Into<String>) {
        *self.state.reply.lock() = Reply {
            status,
            body: body.into(),
        };
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().last().cloned()
    }

    /// Get the base URL of the mock server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for MockJeedom {
    fn drop(&mut self) {
        // Send shutdown signal if not already done
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        // Abort the task if still running
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Base URL of a local port with nothing listening on it
pub async fn unreachable_base_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", addr))
}
