//! Kraken Spot REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::{Credentials, IncreasingNonce, NonceProvider, encode_private_body, sign_request};
use crate::error::{ApiError, KrakenError};
use crate::rest::endpoints::KRAKEN_BASE_URL;

/// Default timeout for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

// Longest body excerpt kept in error messages.
const BODY_EXCERPT_LEN: usize = 256;

/// The Kraken Spot REST API client.
///
/// Handles request encoding, authentication and envelope parsing. Results
/// are returned as raw JSON so tools can pass them through unchanged.
///
/// # Example
///
/// ```rust,no_run
/// use kraken_mcp_tools::rest::RestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = RestClient::builder().build()?;
///     let time = client.server_time().await?;
///     println!("Server time: {}", time["unixtime"]);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Option<Arc<Credentials>>,
    nonce_provider: Arc<dyn NonceProvider>,
}

impl RestClient {
    /// Create a new client builder.
    pub fn builder() -> RestClientBuilder {
        RestClientBuilder::new()
    }

    /// Whether private endpoints can be called.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a public GET request with query parameters.
    pub(crate) async fn public_get<Q>(&self, endpoint: &str, params: &Q) -> Result<Value, KrakenError>
    where
        Q: serde::Serialize + ?Sized,
    {
        let query_string = serde_urlencoded::to_string(params)
            .map_err(|e| KrakenError::Internal(format!("Failed to encode query: {e}")))?;
        let url = if query_string.is_empty() {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.base_url, endpoint, query_string)
        };

        debug!(endpoint, "public request");
        let response = self.http_client.get(&url).send().await?;
        self.parse_response(endpoint, response).await
    }

    /// Make an authenticated POST request.
    ///
    /// The body is encoded once; the same string is signed and sent.
    pub(crate) async fn private_post<P>(&self, endpoint: &str, params: &P) -> Result<Value, KrakenError>
    where
        P: serde::Serialize + ?Sized,
    {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            KrakenError::Config("API key and secret required for private endpoints".to_string())
        })?;

        let nonce = self.nonce_provider.next_nonce();
        let form_data = encode_private_body(nonce, params)?;
        let signature = sign_request(credentials, endpoint, nonce, &form_data)?;

        debug!(endpoint, nonce, "private request");
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .http_client
            .post(&url)
            .header("API-Key", &credentials.api_key)
            .header("API-Sign", signature)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(form_data)
            .send()
            .await?;

        self.parse_response(endpoint, response).await
    }

    /// Parse a response from the Kraken API.
    async fn parse_response(
        &self,
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<Value, KrakenError> {
        let status = response.status();
        let body = response.text().await?;

        let parsed: KrakenResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(endpoint, %status, "unparsable response");
                return Err(KrakenError::InvalidResponse(if status.is_success() {
                    format!("Failed to parse response: {e}. Body: {}", excerpt(&body))
                } else {
                    format!("HTTP {status}: {}", excerpt(&body))
                }));
            }
        };

        // Kraken usually answers 200 even for errors, so the envelope decides.
        if let Some(api_error) = ApiError::from_error_array(&parsed.error) {
            warn!(endpoint, error = %api_error, "exchange returned an error");
            return Err(KrakenError::Api(api_error));
        }

        if !status.is_success() {
            warn!(endpoint, %status, "non-success status");
            return Err(KrakenError::InvalidResponse(format!(
                "HTTP {status}: {}",
                excerpt(&body)
            )));
        }

        parsed
            .result
            .ok_or_else(|| KrakenError::InvalidResponse("Response missing 'result' field".to_string()))
    }
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// Builder for [`RestClient`].
pub struct RestClientBuilder {
    base_url: String,
    credentials: Option<Arc<Credentials>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
    timeout: Duration,
}

impl RestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: KRAKEN_BASE_URL.to_string(),
            credentials: None,
            nonce_provider: None,
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the credentials for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<Credentials>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<RestClient, KrakenError> {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("kraken-mcp-tools/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .map_err(|_| KrakenError::Config(format!("Invalid user agent: {user_agent}")))?;
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .map_err(|e| KrakenError::Config(format!("Failed to build HTTP client: {e}")))?;

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));

        Ok(RestClient {
            http_client: client,
            base_url: self.base_url,
            credentials: self.credentials,
            nonce_provider,
        })
    }
}

impl Default for RestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal response wrapper for Kraken API responses.
#[derive(Debug, serde::Deserialize)]
struct KrakenResponse {
    #[serde(default)]
    error: Vec<String>,
    result: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let long = "é".repeat(BODY_EXCERPT_LEN + 10);
        assert_eq!(excerpt(&long).chars().count(), BODY_EXCERPT_LEN);
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn test_builder_strips_trailing_slash() {
        let client = RestClient::builder()
            .base_url("http://localhost:1234/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234");
        assert!(!client.has_credentials());
    }

    #[test]
    fn test_invalid_user_agent_is_config_error() {
        let err = RestClient::builder().user_agent("bad\nagent").build().unwrap_err();
        assert!(matches!(err, KrakenError::Config(_)));
    }

    #[tokio::test]
    async fn test_private_call_without_credentials() {
        let client = RestClient::builder().build().unwrap();
        let err = client
            .private_post("/0/private/Balance", &[("asset", "ZUSD")])
            .await
            .unwrap_err();
        assert!(matches!(err, KrakenError::Config(_)));
    }
}
