use async_trait::async_trait;
use reqwest::{header::HeaderMap, Method, StatusCode};
use serde_json::Value;
use url::Url;

use super::error::Result;

/// A single outbound request, fully composed by the client.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

/// What came back over the wire, before any normalization.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Convenience for responses carrying a JSON document.
    #[cfg(test)]
    pub(crate) fn json(status: StatusCode, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }
}

/// Executes composed requests against the network.
///
/// The client performs all URL, header and body composition itself.
/// Implementations only move bytes.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// The default transport, backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuses an existing client, e.g. one configured with timeouts or a proxy.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        // We serialize ourselves; the content type header has already been set.
        if let Some(body) = request.body {
            builder = builder.body(serde_json::to_vec(&body)?);
        }

        // We read the body whatever the status; deciding what counts as a
        // failure is left to the client, which needs the error document too.
        let result = builder.send().await?;
        let status = result.status();
        let body = result.bytes().await?.to_vec();
        Ok(ApiResponse { status, body })
    }
}
