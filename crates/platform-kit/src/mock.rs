//! # Mock Framework & Testing Guide
//!
//! Test doubles for code built on the platform kit.
//!
//! - [`MockTransport`] is a scripted [`Transport`]. It replays queued responses
//!   in order, records every request it receives and can verify that all
//!   expectations were consumed.
//! - [`RecordingAnalytics`] is an [`Analytics`] sink that keeps every event
//!   for later assertions.
//!
//! ## When to use MockTransport vs a stub server
//!
//! | Feature | MockTransport | wiremock server |
//! |---------|---------------|-----------------|
//! | **Speed** | Instant (in-memory) | Fast (local socket) |
//! | **Exercises reqwest** | No | Yes |
//! | **Records requests** | Yes (`requests()`) | Yes (`received_requests()`) |
//! | **Error injection** | `fail(..)`, `hang()` | Status codes and delays |
//!
//! ## Example
//!
//! ```rust
//! use platform_kit::mock::MockTransport;
//! use platform_kit::ResourceSchema;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Todo { id: i64, title: String }
//!
//! impl ResourceSchema for Todo {
//!     type Id = i64;
//!     const COLLECTION: &'static str = "todos";
//!     fn id(&self) -> Option<i64> { Some(self.id) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_get("https://bff.test/todos/1")
//!         .respond(200, r#"{"id":1,"title":"write tests"}"#);
//!
//!     let client = mock.client("https://bff.test");
//!     let todo: Todo = client.fetch_single("todos/1").await.unwrap();
//!     assert_eq!(todo.title, "write tests");
//!
//!     mock.verify(); // Ensures all expectations were met
//! }
//! ```

use crate::analytics::{Analytics, AnalyticsEvent};
use crate::client::ResourceClient;
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Reply {
    Respond(HttpResponse),
    Fail(TransportError),
    Hang,
}

/// Represents an expected request and the scripted reply.
struct Expectation {
    method: Method,
    url: String,
    reply: Reply,
}

/// A scripted transport with expectation tracking.
///
/// Clones share the same expectation queue and request log.
#[derive(Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    /// Creates a new mock transport with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a `ResourceClient` for `base` that dispatches through this mock.
    ///
    /// # Panics
    /// Panics if `base` is not a valid http(s) URL.
    pub fn client(&self, base: &str) -> ResourceClient {
        ResourceClient::with_transport(base, Arc::new(self.clone()))
            .unwrap_or_else(|e| panic!("invalid mock base {base:?}: {e}"))
    }

    /// Expects a request with `method` to the absolute `url`.
    pub fn expect(&self, method: Method, url: &str) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            url: url.to_string(),
            expectations: Arc::clone(&self.expectations),
        }
    }

    /// Expects a `GET` request.
    pub fn expect_get(&self, url: &str) -> ExpectationBuilder {
        self.expect(Method::GET, url)
    }

    /// Expects a `PUT` request.
    pub fn expect_put(&self, url: &str) -> ExpectationBuilder {
        self.expect(Method::PUT, url)
    }

    /// Expects a `DELETE` request.
    pub fn expect_delete(&self, url: &str) -> ExpectationBuilder {
        self.expect(Method::DELETE, url)
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// Number of requests that reached the transport.
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = lock(&self.expectations);
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = request.method.clone();
        let url = request.url.to_string();
        lock(&self.requests).push(request);

        let expectation = lock(&self.expectations).pop_front();
        match expectation {
            Some(exp) if exp.method == method && exp.url == url => match exp.reply {
                Reply::Respond(response) => Ok(response),
                Reply::Fail(error) => Err(error),
                Reply::Hang => std::future::pending().await,
            },
            Some(exp) => Err(TransportError::Other(format!(
                "unexpected request {method} {url}, expected {} {}",
                exp.method, exp.url
            ))),
            None => Err(TransportError::Other(format!(
                "unexpected request {method} {url}, no expectations left"
            ))),
        }
    }
}

/// Builder that completes an expectation with its reply.
pub struct ExpectationBuilder {
    method: Method,
    url: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    fn push(self, reply: Reply) {
        lock(&self.expectations).push_back(Expectation {
            method: self.method,
            url: self.url,
            reply,
        });
    }

    /// Replies with `status` and a raw body.
    pub fn respond(self, status: u16, body: impl Into<Vec<u8>>) {
        self.push(Reply::Respond(HttpResponse {
            status,
            body: body.into(),
        }));
    }

    /// Replies with `status` and `value` serialized as JSON.
    pub fn respond_json<S: Serialize>(self, status: u16, value: &S) {
        let body = serde_json::to_vec(value).unwrap_or_else(|e| panic!("unserializable mock body: {e}"));
        self.respond(status, body);
    }

    /// Fails the exchange with a transport error.
    pub fn fail(self, error: TransportError) {
        self.push(Reply::Fail(error));
    }

    /// Never replies. Useful for cancellation tests.
    pub fn hang(self) {
        self.push(Reply::Hang);
    }
}

// =============================================================================
// ANALYTICS
// =============================================================================

/// Analytics sink that records every event it receives.
#[derive(Clone, Default)]
pub struct RecordingAnalytics {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl RecordingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        lock(&self.events).clone()
    }

    /// Canonical names of the recorded events, in order.
    pub fn names(&self) -> Vec<&'static str> {
        lock(&self.events).iter().map(AnalyticsEvent::name).collect()
    }
}

impl Analytics for RecordingAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        lock(&self.events).push(event.clone());
    }
}
