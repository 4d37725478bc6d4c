use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Method,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{
    client::{normalize, EmChat},
    error::Result,
    http_client::{ApiRequest, Transport},
};

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
}

/// A successful response from the token endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TokenGrant {
    pub access_token: String,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub application: Option<String>,
}

impl<T: Transport> EmChat<T> {
    /// Exchanges the client credentials for a bearer token and stores it.
    ///
    /// This always hits the network, even when a token is already held.
    pub async fn request_token(&self) -> Result<TokenGrant> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let body = serde_json::to_value(TokenRequest {
            grant_type: "client_credentials",
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
        })?;

        let request = ApiRequest {
            method: Method::POST,
            url: self.compose_url("/token")?,
            headers,
            body: Some(body),
        };

        let response = self.send(request).await?;
        let grant: TokenGrant = serde_json::from_value(normalize(response)?)?;

        *self.access_token.write() = Some(grant.access_token.clone());
        info!(
            org = %self.config.org_name,
            app = %self.config.app_name,
            expires_in = ?grant.expires_in,
            "obtained access token"
        );

        Ok(grant)
    }

    /// If necessary, obtains a token before a guarded request goes out.
    pub(crate) async fn ensure_token(&self) -> Result<()> {
        if self.access_token.read().is_some() {
            return Ok(());
        }

        self.request_token().await?;
        Ok(())
    }
}
