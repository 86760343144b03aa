//! HTTP client for the MentorHub API.

use anyhow::{Context, Result};
use url::Url;

use super::types::{AuthUser, MeResponse, Session, SessionFilter, SessionsResponse};
use crate::config::Config;

/// Production API endpoint. Tests must never talk to this host.
pub const DEFAULT_BASE_URL: &str = "https://api.mentorhub.app";

/// MentorHub API client.
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client from the loaded configuration.
    ///
    /// # Panics
    /// - In test builds (`#[cfg(test)]`), panics if `base_url` is the production API.
    /// - At runtime, panics if `MHUB_BLOCK_REAL_API=1` and `base_url` is the production API.
    ///
    /// This prevents tests from accidentally making real network requests.
    /// Point `api.base_url` at a mock server instead.
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.api.base_url.trim_end_matches('/').to_string();

        // Compile-time guard for unit tests
        #[cfg(test)]
        if base_url == DEFAULT_BASE_URL {
            panic!(
                "Tests must not use the production MentorHub API!\n\
                 Set api.base_url to a mock server (e.g., wiremock).\n\
                 Found base_url: {base_url}"
            );
        }

        // Runtime guard for integration tests (set MHUB_BLOCK_REAL_API=1 in test harness)
        #[cfg(not(test))]
        if std::env::var("MHUB_BLOCK_REAL_API").is_ok_and(|v| v == "1")
            && base_url == DEFAULT_BASE_URL
        {
            panic!(
                "MHUB_BLOCK_REAL_API=1 but trying to use production MentorHub API!\n\
                 Set api.base_url to a mock server.\n\
                 Found base_url: {base_url}"
            );
        }

        Url::parse(&base_url).with_context(|| format!("Invalid api.base_url: {base_url}"))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url,
            token: config.auth_token(),
            http,
        })
    }

    /// Fetches the viewer's sessions for the given filter.
    ///
    /// The filter maps to at most one query parameter; see
    /// [`SessionFilter::query_param`]. A response without `data.sessions`
    /// is an empty list.
    pub async fn fetch_sessions(&self, filter: SessionFilter) -> Result<Vec<Session>> {
        let url = format!("{}/sessions", self.base_url);
        let mut request = self.http.get(&url);
        if let Some(param) = filter.query_param() {
            request = request.query(&[param]);
        }

        let response = self
            .authorize(request)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url}"))?;

        let envelope: SessionsResponse = response
            .json()
            .await
            .with_context(|| format!("Decode response from {url}"))?;
        Ok(envelope.into_sessions())
    }

    /// Fetches the authenticated user.
    pub async fn fetch_me(&self) -> Result<AuthUser> {
        let url = format!("{}/auth/me", self.base_url);
        let response = self
            .authorize(self.http.get(&url))
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .context("Authentication failed (set api.token in the config, or MHUB_TOKEN)")?;

        let envelope: MeResponse = response
            .json()
            .await
            .with_context(|| format!("Decode response from {url}"))?;
        envelope
            .into_user()
            .context("Response from /auth/me did not contain a user")
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_config(base_url: &str) -> Config {
        let mut config = Config::default();
        config.api.base_url = base_url.to_string();
        config
    }

    #[test]
    fn test_client_rejects_invalid_base_url() {
        let config = test_config("not a url");
        assert!(ApiClient::new(&config).is_err());
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let config = test_config("http://127.0.0.1:9999/");
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    #[should_panic(expected = "production MentorHub API")]
    fn test_client_panics_on_production_url_in_tests() {
        let config = test_config(DEFAULT_BASE_URL);
        let _ = ApiClient::new(&config);
    }
}
