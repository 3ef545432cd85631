//! Jama API client.
//!
//! Low-level HTTP client that handles the OAuth token exchange and raw
//! requests. Entity lookups are implemented via traits on model types.

use std::env;
use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::error::{JamaError, Result};
use crate::models::{Item, ItemLocator, ItemQuery};
use crate::traits::Get;

const TOKEN_PATH: &str = "/rest/oauth/token";
const USER_AGENT: &str = concat!("jamapi/", env!("CARGO_PKG_VERSION"));

/// Low-level Jama API client.
///
/// Holds the REST endpoint and, once [`authenticate`](Self::authenticate)
/// has succeeded, a bearer token. The token is kept in memory only and is
/// never refreshed; Jama expires it after about an hour, after which the
/// caller must authenticate again.
///
/// # Example
///
/// ```no_run
/// use jamapi::{ItemQuery, JamaClient};
///
/// # async fn example() -> jamapi::Result<()> {
/// let mut client = JamaClient::new("https://example.jamacloud.com/rest/v1")?;
/// client.authenticate("client-id", "client-secret").await?;
///
/// let item = client.get_item(ItemQuery::in_project(42, "PRJ-REQ-1")).await?;
/// println!("{}", item.render_summary());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct JamaClient {
    http: Client,
    base_url: Arc<Url>,
    token_url: Arc<Url>,
    access_token: Option<String>,
}

impl std::fmt::Debug for JamaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JamaClient")
            .field("base_url", &self.base_url.as_str())
            .field("token_url", &self.token_url.as_str())
            .field("authenticated", &self.access_token.is_some())
            .finish()
    }
}

/// Body of a successful token exchange.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl JamaClient {
    /// Create a client from environment variables.
    ///
    /// Uses `JAMA_API_URL` for the REST endpoint and optionally
    /// `JAMA_TOKEN_URL` for the OAuth token endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `JAMA_API_URL` is not set or either URL is invalid.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("JAMA_API_URL").map_err(|_| {
            JamaError::ConfigMissing("JAMA_API_URL environment variable not set".to_string())
        })?;

        let client = Self::new(&base_url)?;
        match env::var("JAMA_TOKEN_URL") {
            Ok(token_url) => client.with_token_url(&token_url),
            Err(_) => Ok(client),
        }
    }

    /// Create a new, unauthenticated client.
    ///
    /// The token endpoint defaults to `/rest/oauth/token` on the same host
    /// as `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - REST endpoint (e.g., `https://example.jamacloud.com/rest/v1`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;
        let token_url = base_url.join(TOKEN_PATH)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(|e| JamaError::ConfigMissing(format!("HTTP client unavailable: {e}")))?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token_url: Arc::new(token_url),
            access_token: None,
        })
    }

    /// Use a different OAuth token endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn with_token_url(mut self, token_url: &str) -> Result<Self> {
        self.token_url = Arc::new(Url::parse(token_url)?);
        Ok(self)
    }

    /// Get the REST endpoint.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the OAuth token endpoint.
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// Whether a bearer token has been obtained.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Exchange API client credentials for a bearer token.
    ///
    /// The credentials are generated in the Jama web interface. On success
    /// the token replaces any previously stored one; on failure the client
    /// is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`JamaError::Authentication`] if either credential is empty,
    /// the request fails, the server rejects the credentials, or the
    /// response carries no token.
    #[tracing::instrument(skip(self, client_secret))]
    pub async fn authenticate(&mut self, client_id: &str, client_secret: &str) -> Result<()> {
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(JamaError::auth("client id and client secret must not be empty"));
        }

        let response = self
            .http
            .post(self.token_url.as_str())
            .query(&[("grant_type", "client_credentials")])
            .basic_auth(client_id, Some(client_secret))
            .send()
            .await
            .map_err(|e| JamaError::auth(format!("token request failed: {e}")))?;

        let response = Self::check_response(response).await.map_err(|(message, status)| {
            JamaError::Authentication {
                message,
                status_code: Some(status.as_u16()),
            }
        })?;

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| JamaError::auth(format!("malformed token response: {e}")))?;

        if token.access_token.is_empty() {
            return Err(JamaError::auth("token response carried an empty access_token"));
        }

        tracing::debug!(expires_in = token.expires_in, "obtained access token");
        self.access_token = Some(token.access_token);
        Ok(())
    }

    /// Fetch a single item.
    ///
    /// Shorthand for [`Item::get`].
    ///
    /// # Errors
    ///
    /// * [`JamaError::NotAuthenticated`] before a successful `authenticate`
    /// * [`JamaError::InvalidArguments`] if `query` names no complete address
    /// * [`JamaError::Fetch`] if the request fails or nothing matches
    pub async fn get_item(&self, query: ItemQuery) -> Result<Item> {
        Item::get(self, query).await
    }

    /// The stored token, or `NotAuthenticated`.
    pub(crate) fn require_token(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .ok_or(JamaError::NotAuthenticated)
    }

    /// `GET abstractitems` for one locator.
    ///
    /// Only project-scoped lookups send the bearer token.
    #[tracing::instrument(skip(self))]
    pub(crate) async fn get_abstract_items(&self, locator: &ItemLocator) -> Result<Response> {
        let url = self.base_url.join("abstractitems")?;

        let mut request = self.http.get(url).query(&locator.query());
        if locator.requires_auth() {
            request = request.bearer_auth(self.require_token()?);
        }

        let response = request
            .send()
            .await
            .map_err(|e| JamaError::fetch(format!("item request failed: {e}")))?;

        Self::check_response(response)
            .await
            .map_err(|(message, status)| JamaError::Fetch {
                message,
                status_code: Some(status.as_u16()),
            })
    }

    /// Check response status, returning the error message and status on failure.
    async fn check_response(
        response: Response,
    ) -> core::result::Result<Response, (String, StatusCode)> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = Self::extract_error_message(response, status).await;
        Err((message, status))
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) if !b.trim().is_empty() => b,
            _ => return format!("HTTP {status}"),
        };

        // Jama nests messages under "meta"; OAuth errors use "error_description".
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            let candidates = [
                json.pointer("/meta/message"),
                json.get("message"),
                json.get("error_description"),
                json.get("error"),
            ];
            if let Some(msg) = candidates.into_iter().flatten().find_map(|m| m.as_str()) {
                return format!("HTTP {status}: {msg}");
            }
        }

        format!("HTTP {status}: {body}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let mut client = JamaClient::new("https://example.jamacloud.com/rest/v1").unwrap();
        client.access_token = Some("secret-token".to_string());
        let debug = format!("{:?}", client);
        assert!(debug.contains("JamaClient"));
        assert!(debug.contains("base_url"));
        assert!(debug.contains("authenticated: true"));
        // Token should not be in debug output
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = JamaClient::new("https://example.jamacloud.com/rest/v1").unwrap();
        let client2 = JamaClient::new("https://example.jamacloud.com/rest/v1/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_token_url_derived_from_host() {
        let client = JamaClient::new("https://example.jamacloud.com/rest/v1").unwrap();
        assert_eq!(
            client.token_url().as_str(),
            "https://example.jamacloud.com/rest/oauth/token"
        );
    }

    #[test]
    fn test_token_url_override() {
        let client = JamaClient::new("https://example.jamacloud.com/rest/v1")
            .unwrap()
            .with_token_url("https://auth.example.com/oauth/token")
            .unwrap();
        assert_eq!(client.token_url().host_str(), Some("auth.example.com"));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = JamaClient::new("not a url").unwrap_err();
        assert!(matches!(err, JamaError::UrlError(_)));
    }

    #[test]
    fn test_new_client_is_unauthenticated() {
        let client = JamaClient::new("https://example.jamacloud.com/rest/v1").unwrap();
        assert!(!client.is_authenticated());
        assert!(matches!(
            client.require_token(),
            Err(JamaError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_empty_credentials_rejected_locally() {
        let mut client = JamaClient::new("http://127.0.0.1:9/rest/v1").unwrap();
        let err = client.authenticate("", "secret").await.unwrap_err();
        assert!(matches!(err, JamaError::Authentication { .. }));
        assert!(!client.is_authenticated());
    }
}
