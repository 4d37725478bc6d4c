use reqwest::{header::InvalidHeaderValue, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Possible error types while talking to the messaging API.
///
/// A failed token fetch is surfaced as whichever variant the fetch itself
/// produced, so callers of a guarded operation see the same error they
/// would have seen calling `request_token` directly.
#[derive(Debug, Error)]
pub enum EmChatError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The API answered with a non-2xx status.
    /// `body` is the decoded JSON error body, the raw text, or `null`.
    #[error("API responded with {status}: {body}")]
    Api { status: StatusCode, body: Value },
    #[error("unable to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),
    /// The base URL cannot carry a path, e.g. `mailto:` or `data:` URLs.
    #[error("API URL cannot be used as a base: {0}")]
    BaseUrl(String),
    /// An identifier that would not name exactly one resource.
    #[error("invalid path segment: {0:?}")]
    InvalidPathSegment(String),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

impl EmChatError {
    /// The structured body the API returned alongside an error status, if any.
    pub fn api_body(&self) -> Option<&Value> {
        match self {
            EmChatError::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The HTTP status of an API error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            EmChatError::Api { status, .. } => Some(*status),
            EmChatError::Transport(err) => err.status(),
            _ => None,
        }
    }
}

pub type Result<T, E = EmChatError> = std::result::Result<T, E>;
