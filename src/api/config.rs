/// The API host used when no other base URL is configured.
pub const DEFAULT_API_URL: &str = "https://a1.easemob.com";

/// Tenant identity and client credentials for a single application.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub org_name: String,
    pub app_name: String,
    pub client_id: String,
    pub client_secret: String,
    /// Base URL every request path is composed onto.
    pub api_url: String,
    /// A token obtained elsewhere. When present, no token fetch is made.
    pub access_token: Option<String>,
}

impl ClientConfig {
    pub fn new(
        org_name: impl Into<String>,
        app_name: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            org_name: org_name.into(),
            app_name: app_name.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_url: DEFAULT_API_URL.to_string(),
            access_token: None,
        }
    }

    /// Pre-seeds the bearer token.
    /// Empty tokens are treated as absent.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.access_token = if token.is_empty() { None } else { Some(token) };
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}
