//! Credential management for Kraken API authentication.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use secrecy::{ExposeSecret, SecretSlice, SecretString};

use crate::error::KrakenError;

/// Default environment variable holding the API key.
pub const API_KEY_VAR: &str = "KRAKEN_API_KEY";
/// Default environment variable holding the base64 API secret.
pub const API_SECRET_VAR: &str = "KRAKEN_API_SECRET";

/// API credentials containing the key and the decoded secret.
///
/// Construction validates both parts, so a `Credentials` value is always
/// usable for signing. The secret is kept in a [`secrecy`] container and
/// never appears in `Debug` output. Share it behind an `Arc`.
pub struct Credentials {
    /// The API key (public identifier)
    pub api_key: String,
    /// The API secret as handed out by Kraken (base64)
    api_secret: SecretString,
    /// The decoded HMAC key
    signing_key: SecretSlice<u8>,
}

impl Credentials {
    /// Create credentials from an API key and a base64-encoded secret.
    ///
    /// Fails with [`KrakenError::Config`] if either part is empty or the
    /// secret is not valid base64.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, KrakenError> {
        let api_key = api_key.into().trim().to_string();
        let api_secret = api_secret.into().trim().to_string();

        if api_key.is_empty() {
            return Err(KrakenError::Config("API key must not be empty".to_string()));
        }
        if api_secret.is_empty() {
            return Err(KrakenError::Config("API secret must not be empty".to_string()));
        }

        let decoded = BASE64
            .decode(api_secret.as_bytes())
            .map_err(|_| KrakenError::Config("API secret must be valid base64".to_string()))?;

        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
            signing_key: SecretSlice::from(decoded),
        })
    }

    /// Read credentials from `KRAKEN_API_KEY` and `KRAKEN_API_SECRET`.
    pub fn from_env() -> Result<Self, KrakenError> {
        Self::from_env_vars(API_KEY_VAR, API_SECRET_VAR)
    }

    /// Read credentials from custom environment variable names.
    pub fn from_env_vars(key_var: &str, secret_var: &str) -> Result<Self, KrakenError> {
        let api_key = std::env::var(key_var)
            .map_err(|_| KrakenError::Config(format!("Environment variable {key_var} not set")))?;
        let api_secret = std::env::var(secret_var).map_err(|_| {
            KrakenError::Config(format!("Environment variable {secret_var} not set"))
        })?;

        Self::new(api_key, api_secret)
    }

    /// Get the original base64 secret.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }

    /// Get the decoded secret used as the HMAC key.
    pub(crate) fn signing_key(&self) -> &[u8] {
        self.signing_key.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacted() {
        let secret = BASE64.encode("super_secret");
        let creds = Credentials::new("my_key", secret.clone()).unwrap();
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("my_key"));
        assert!(!debug_str.contains(&secret));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_empty_parts_rejected() {
        let secret = BASE64.encode("secret");
        assert!(matches!(
            Credentials::new("", secret.clone()),
            Err(KrakenError::Config(_))
        ));
        assert!(matches!(
            Credentials::new("key", "   "),
            Err(KrakenError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_secret_rejected() {
        let err = Credentials::new("key", "not base64!!").unwrap_err();
        assert!(matches!(err, KrakenError::Config(ref msg) if msg.contains("base64")));
    }

    #[test]
    fn test_secret_round_trip() {
        let raw: Vec<u8> = (0u8..=255).collect();
        let encoded = BASE64.encode(&raw);
        let creds = Credentials::new("key", encoded.clone()).unwrap();

        assert_eq!(creds.signing_key(), raw.as_slice());
        assert_eq!(BASE64.encode(creds.signing_key()), encoded);
        assert_eq!(creds.expose_secret(), encoded);
    }

    #[test]
    fn test_missing_env_var_is_config_error() {
        let err = Credentials::from_env_vars(
            "KRAKEN_MCP_TEST_MISSING_KEY",
            "KRAKEN_MCP_TEST_MISSING_SECRET",
        )
        .unwrap_err();
        assert!(
            matches!(err, KrakenError::Config(ref msg) if msg.contains("KRAKEN_MCP_TEST_MISSING_KEY"))
        );
    }
}
