use parking_lot::RwLock;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

use super::{
    config::ClientConfig,
    error::{EmChatError, Result},
    http_client::{ApiRequest, ApiResponse, HttpTransport, Transport},
};

/// Client for a single organization/application pair.
///
/// Every public operation first makes sure a bearer token is held,
/// fetching one with the client credentials if necessary.
#[derive(Debug)]
pub struct EmChat<T = HttpTransport> {
    pub(super) config: ClientConfig,
    /// The bearer token across API requests.
    ///
    /// The lock is never held across an await. Concurrent callers that both
    /// find it empty will both fetch a token, and the last one stored wins.
    /// Tokens are interchangeable, so that race is harmless.
    pub(super) access_token: RwLock<Option<String>>,
    pub(super) transport: T,
}

impl EmChat<HttpTransport> {
    /// Creates a client talking to the default API host over reqwest.
    pub fn new(
        org_name: impl Into<String>,
        app_name: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        let config = ClientConfig::new(org_name, app_name, client_id, client_secret);
        Self::with_transport(config, HttpTransport::new())
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }
}

impl<T: Transport> EmChat<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let access_token = RwLock::new(config.access_token.clone());
        Self {
            config,
            access_token,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The bearer token currently held, if any.
    pub fn access_token(&self) -> Option<String> {
        self.access_token.read().clone()
    }

    /// Produces `{api_url}/{org}/{app}/{path}`.
    /// The path always ends up with exactly one leading slash.
    ///
    /// `path` is split on `/`, so it must only ever be one of our own fixed
    /// paths. Caller-supplied identifiers go through `compose_segments`.
    pub fn compose_url(&self, path: &str) -> Result<Url> {
        self.compose_segments(path.trim_start_matches('/').split('/'))
    }

    /// Appends each segment to `{api_url}/{org}/{app}`, percent-encoding it,
    /// so an identifier can never escape into another path, query or fragment.
    pub(crate) fn compose_segments<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_url)?;
        url.path_segments_mut()
            .map_err(|_| EmChatError::BaseUrl(self.config.api_url.clone()))?
            // A trailing slash on the base would otherwise leave us with `//`.
            .pop_if_empty()
            .push(&self.config.org_name)
            .push(&self.config.app_name)
            .extend(segments);
        Ok(url)
    }

    /// Merges caller headers with our defaults.
    ///
    /// Defaults are applied last so callers can never replace the content
    /// type or the authorization header.
    pub fn compose_headers(&self, extra: Option<HeaderMap>) -> Result<HeaderMap> {
        let mut headers = extra.unwrap_or_default();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        match self.access_token.read().as_deref() {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            None => {
                headers.remove(AUTHORIZATION);
            }
        }

        Ok(headers)
    }

    pub(crate) async fn get(&self, path: &[&str]) -> Result<Value> {
        self.guarded(Method::GET, path, &[], None, None).await
    }

    pub(crate) async fn get_with_query(
        &self,
        path: &[&str],
        query: &[(&str, String)],
    ) -> Result<Value> {
        self.guarded(Method::GET, path, query, None, None).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(&self, path: &[&str], body: &B) -> Result<Value> {
        let body = serde_json::to_value(body)?;
        self.guarded(Method::POST, path, &[], Some(body), None).await
    }

    /// POSTs an empty JSON object, for endpoints that take no payload.
    ///
    /// We send `{}` rather than nothing at all, as the API expects a JSON
    /// document whenever the content type says so.
    pub(crate) async fn post_empty(&self, path: &[&str]) -> Result<Value> {
        self.guarded(Method::POST, path, &[], Some(json!({})), None)
            .await
    }

    pub(crate) async fn put<B: Serialize + ?Sized>(&self, path: &[&str], body: &B) -> Result<Value> {
        let body = serde_json::to_value(body)?;
        self.guarded(Method::PUT, path, &[], Some(body), None).await
    }

    pub(crate) async fn delete(&self, path: &[&str]) -> Result<Value> {
        self.guarded(Method::DELETE, path, &[], None, None).await
    }

    pub(crate) async fn delete_with_query(
        &self,
        path: &[&str],
        query: &[(&str, String)],
    ) -> Result<Value> {
        self.guarded(Method::DELETE, path, query, None, None).await
    }

    /// A guarded GET whose successful body is handed back untouched.
    pub(crate) async fn get_bytes(&self, path: &[&str], headers: HeaderMap) -> Result<Vec<u8>> {
        self.ensure_token().await?;
        let request = self.build_request(Method::GET, path, &[], None, Some(headers))?;
        let response = self.send(request).await?;
        if response.status.is_success() {
            Ok(response.body)
        } else {
            Err(api_error(response))
        }
    }

    async fn guarded(
        &self,
        method: Method,
        path: &[&str],
        query: &[(&str, String)],
        body: Option<Value>,
        headers: Option<HeaderMap>,
    ) -> Result<Value> {
        self.ensure_token().await?;
        let request = self.build_request(method, path, query, body, headers)?;
        let response = self.send(request).await?;
        normalize(response)
    }

    fn build_request(
        &self,
        method: Method,
        path: &[&str],
        query: &[(&str, String)],
        body: Option<Value>,
        headers: Option<HeaderMap>,
    ) -> Result<ApiRequest> {
        // `extend` silently skips `.` and `..`, which would quietly retarget
        // the request at the parent collection, so we refuse them outright.
        if let Some(segment) = path
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(EmChatError::InvalidPathSegment(segment.to_string()));
        }

        let mut url = self.compose_segments(path.iter().copied())?;
        if !query.is_empty() {
            // Form encoding: spaces travel as `+`, and a literal `+` as `%2B`.
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }

        Ok(ApiRequest {
            method,
            url,
            headers: self.compose_headers(headers)?,
            body,
        })
    }

    pub(super) async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        debug!(method = %request.method, url = %request.url, "sending API request");
        self.transport.execute(request).await
    }
}

/// Splits a transport response into the success value or a structured error.
pub(super) fn normalize(response: ApiResponse) -> Result<Value> {
    if !response.status.is_success() {
        return Err(api_error(response));
    }

    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&response.body)?)
}

fn api_error(response: ApiResponse) -> EmChatError {
    let body = if response.body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&response.body).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&response.body).into_owned())
        })
    };

    warn!(status = %response.status, %body, "API request failed");
    EmChatError::Api {
        status: response.status,
        body,
    }
}
