//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! Thin wrapper around `wiremock` for declarative stubbing of the open-data
//! API in integration tests.
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::common::http_mock::MockHttpServer;
//!
//! #[tokio::test]
//! async fn test_external_api_call() {
//!     let server = MockHttpServer::start().await;
//!
//!     server
//!         .expect_get("/meps/show-current")
//!         .with_query("format", "application/ld+json")
//!         .respond_with_json(json!({"data": []}))
//!         .mount()
//!         .await;
//!
//!     let client = HttpEuroparlClient::new(server.url());
//! }
//! ```
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)` or `.respond_with_body(string)`
//! - **Error response**: `.respond_with_status(500)`
//! - **Request verification**: `.expect_times(1)` to assert call count

#![allow(dead_code)]

use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A running stub server. Unmatched requests get a 404.
pub struct MockHttpServer {
    server: MockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to hand to the client under test.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    pub fn expect_get(&self, request_path: &str) -> StubBuilder<'_> {
        StubBuilder {
            server: &self.server,
            path: request_path.to_string(),
            query: Vec::new(),
            status: 200,
            body: None,
            times: None,
        }
    }
}

enum Body {
    Json(Value),
    Raw(String),
}

pub struct StubBuilder<'a> {
    server: &'a MockServer,
    path: String,
    query: Vec<(String, String)>,
    status: u16,
    body: Option<Body>,
    times: Option<u64>,
}

impl StubBuilder<'_> {
    /// Only match requests carrying this (decoded) query parameter.
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.body = Some(Body::Json(body));
        self
    }

    pub fn respond_with_body(mut self, body: &str) -> Self {
        self.body = Some(Body::Raw(body.to_string()));
        self
    }

    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    pub async fn mount(self) {
        let mut builder = Mock::given(method("GET")).and(path(self.path.as_str()));
        for (key, value) in &self.query {
            builder = builder.and(query_param(key.as_str(), value.as_str()));
        }

        let mut template = ResponseTemplate::new(self.status);
        template = match self.body {
            Some(Body::Json(value)) => template.set_body_json(value),
            Some(Body::Raw(text)) => template.set_body_string(text),
            None => template,
        };

        let mut mock = builder.respond_with(template);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }
        mock.mount(self.server).await;
    }
}
