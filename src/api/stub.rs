//! A recording transport for unit tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;
use serde_json::{json, Value};

use super::{
    client::EmChat,
    config::ClientConfig,
    error::{EmChatError, Result},
    http_client::{ApiRequest, ApiResponse, Transport},
};

/// Replays queued responses in order and records every request it sees.
/// Once the queue runs dry it answers `200 {}`.
#[derive(Default)]
pub struct StubTransport {
    responses: Mutex<VecDeque<Result<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: StatusCode, body: Value) -> Self {
        self.responses
            .lock()
            .push_back(Ok(ApiResponse::json(status, &body)));
        self
    }

    pub fn respond_raw(self, response: ApiResponse) -> Self {
        self.responses.lock().push_back(Ok(response));
        self
    }

    /// Fails the next request without producing any HTTP response.
    pub fn respond_err(self, err: EmChatError) -> Self {
        self.responses.lock().push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn token_requests(&self) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|request| request.url.path().ends_with("/token"))
            .count()
    }

    /// The last request sent, which is the substantive one in most tests.
    pub fn last(&self) -> ApiRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("at least one request should have been sent")
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::json(StatusCode::OK, &json!({}))))
    }
}

/// A genuine `reqwest::Error`, as produced when a request cannot be built.
pub fn transport_error() -> EmChatError {
    let err = reqwest::Client::new()
        .get("http://[::1")
        .build()
        .expect_err("an unterminated IPv6 host should not parse");
    EmChatError::Transport(err)
}

/// A client for org `o`, app `a` holding the token `T`.
pub fn seeded_client() -> EmChat<StubTransport> {
    seeded_client_with(StubTransport::new())
}

pub fn seeded_client_with(transport: StubTransport) -> EmChat<StubTransport> {
    let config = ClientConfig::new("o", "a", "i", "s")
        .with_api_url("http://api.test")
        .with_access_token("T");
    EmChat::with_transport(config, transport)
}

/// A client for org `o`, app `a` with no token yet.
pub fn unseeded_client_with(transport: StubTransport) -> EmChat<StubTransport> {
    let config = ClientConfig::new("o", "a", "i", "s").with_api_url("http://api.test");
    EmChat::with_transport(config, transport)
}
