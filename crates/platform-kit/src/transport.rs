//! # Transport Seam
//!
//! The resource client never talks to the network directly. It builds an
//! [`HttpRequest`] and hands it to a [`Transport`]. Production code uses
//! [`ReqwestTransport`]; tests substitute [`MockTransport`](crate::mock::MockTransport)
//! or point a real transport at a local stub server.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Method;
use url::Url;

/// A fully resolved request, ready to be dispatched.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

/// Status and materialized body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Body as text, or `None` if empty. Invalid UTF-8 is replaced, not dropped.
    pub fn body_text(&self) -> Option<String> {
        if self.body.is_empty() {
            return None;
        }
        Some(String::from_utf8_lossy(&self.body).into_owned())
    }
}

/// Network-level failures where no response was obtained.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_body() || e.is_decode() {
            TransportError::Body(e.to_string())
        } else {
            TransportError::Other(e.to_string())
        }
    }
}

/// Executes a single request/response exchange.
///
/// Implementations must be cancel-safe: dropping the returned future aborts
/// the exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse { status, body })
    }
}
