//! Process configuration read from the environment.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::auth::Credentials;
use crate::error::KrakenError;
use crate::rest::{DEFAULT_TIMEOUT, KRAKEN_BASE_URL, RestClient};

/// Environment variable overriding the REST base URL.
pub const API_URL_VAR: &str = "KRAKEN_API_URL";

/// Environment variable overriding the HTTP timeout, in whole seconds.
pub const HTTP_TIMEOUT_VAR: &str = "KRAKEN_HTTP_TIMEOUT_SECS";

/// Settings for the REST client behind the tool server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Base URL of the Kraken REST API.
    pub base_url: Url,
    /// Timeout applied to every HTTP request.
    pub timeout: Duration,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl ServerConfig {
    /// Read settings from `KRAKEN_API_URL` and `KRAKEN_HTTP_TIMEOUT_SECS`,
    /// falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, KrakenError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, KrakenError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = non_empty(lookup(API_URL_VAR)).unwrap_or_else(|| KRAKEN_BASE_URL.to_string());
        let mut config = Self {
            base_url: parse_base_url(&base_url)?,
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        };

        if let Some(raw) = non_empty(lookup(HTTP_TIMEOUT_VAR)) {
            let secs = raw.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                KrakenError::Config(format!(
                    "{HTTP_TIMEOUT_VAR} must be a positive number of seconds, got {raw:?}"
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Build the REST client for these settings.
    pub fn rest_client(&self, credentials: Arc<Credentials>) -> Result<RestClient, KrakenError> {
        RestClient::builder()
            .base_url(self.base_url.as_str())
            .credentials(credentials)
            .user_agent(self.user_agent.clone())
            .timeout(self.timeout)
            .build()
    }
}

fn default_user_agent() -> String {
    format!("kraken-mcp-tools/{}", env!("CARGO_PKG_VERSION"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_base_url(raw: &str) -> Result<Url, KrakenError> {
    let url = Url::parse(raw)
        .map_err(|e| KrakenError::Config(format!("{API_URL_VAR} is not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(KrakenError::Config(format!(
            "{API_URL_VAR} must be an http(s) URL, got {raw:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use base64::{Engine, engine::general_purpose::STANDARD};

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), "https://api.kraken.com/");
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert!(config.user_agent.starts_with("kraken-mcp-tools/"));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            (API_URL_VAR, "http://127.0.0.1:8080"),
            (HTTP_TIMEOUT_VAR, "30"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config =
            ServerConfig::from_lookup(lookup(&[(API_URL_VAR, " "), (HTTP_TIMEOUT_VAR, "")]))
                .unwrap();
        assert_eq!(config, ServerConfig::from_lookup(lookup(&[])).unwrap());
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        for vars in [
            [(API_URL_VAR, "not a url")],
            [(API_URL_VAR, "ftp://api.kraken.com")],
            [(HTTP_TIMEOUT_VAR, "0")],
            [(HTTP_TIMEOUT_VAR, "fifteen")],
        ] {
            let err = ServerConfig::from_lookup(lookup(&vars)).unwrap_err();
            assert!(matches!(err, KrakenError::Config(_)), "{vars:?}");
        }
    }

    #[test]
    fn test_rest_client_uses_base_url() {
        let config =
            ServerConfig::from_lookup(lookup(&[(API_URL_VAR, "http://localhost:9000/")])).unwrap();
        let credentials = Credentials::new("key", STANDARD.encode("secret")).unwrap();
        let client = config.rest_client(Arc::new(credentials)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
        assert!(client.has_credentials());
    }
}
