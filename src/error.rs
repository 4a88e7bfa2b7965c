//! Error types for the Kraken tool server.

use thiserror::Error;

/// The main error type for all operations in this crate.
///
/// The variants map onto the failure kinds reported to the agent host, see
/// [`KrakenError::kind`]. `Config` is the only variant that is fatal: it is
/// raised while building credentials or configuration, before any tool can be
/// called.
#[derive(Error, Debug)]
pub enum KrakenError {
    /// Missing or malformed credentials or settings.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tool arguments violate the tool's parameter contract.
    #[error("Invalid arguments: {0}")]
    Validation(String),

    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed.
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// Kraken API returned an error.
    #[error("Kraken API error: {0}")]
    Api(ApiError),

    /// The exchange answered with something that is not a valid envelope.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Encoding or signing failure not attributable to caller input.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure classification reported back to the agent host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Credentials or settings are unusable.
    ConfigError,
    /// Caller input was rejected before any network call.
    ValidationError,
    /// No response was received from the exchange.
    NetworkError,
    /// The exchange returned an error.
    ExchangeError,
    /// Local encoding or signing failure.
    InternalError,
}

impl KrakenError {
    /// Classify this error for the uniform tool failure shape.
    pub fn kind(&self) -> ErrorKind {
        match self {
            KrakenError::Config(_) => ErrorKind::ConfigError,
            KrakenError::Validation(_) => ErrorKind::ValidationError,
            KrakenError::Http(e) => http_error_kind(e),
            KrakenError::HttpMiddleware(e) => match e {
                reqwest_middleware::Error::Reqwest(e) => http_error_kind(e),
                _ => ErrorKind::NetworkError,
            },
            KrakenError::Api(_) | KrakenError::InvalidResponse(_) => ErrorKind::ExchangeError,
            KrakenError::Internal(_) => ErrorKind::InternalError,
        }
    }

    /// Exchange error strings carried by this error, if any.
    pub fn codes(&self) -> &[String] {
        match self {
            KrakenError::Api(api) => &api.errors,
            _ => &[],
        }
    }
}

fn http_error_kind(error: &reqwest::Error) -> ErrorKind {
    // A status error means the exchange did answer.
    if error.is_status() {
        ErrorKind::ExchangeError
    } else if error.is_builder() {
        ErrorKind::InternalError
    } else {
        ErrorKind::NetworkError
    }
}

/// Kraken API error codes and messages.
///
/// These are errors returned by the Kraken API itself in the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The error category from Kraken (e.g., "EOrder")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Every error string from the response, in Kraken's `ECategory:Message` form
    pub errors: Vec<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if self.errors.len() > 1 {
            write!(f, " (+{} more)", self.errors.len() - 1)?;
        }
        Ok(())
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        let message = message.into();
        let errors = vec![format!("{code}:{message}")];
        Self {
            code,
            message,
            errors,
        }
    }

    /// Parse API error from Kraken's error array format.
    ///
    /// Kraken returns errors as an array like `["EGeneral:Invalid arguments"]`.
    /// The first entry determines `code` and `message`; all entries are kept.
    pub fn from_error_array(errors: &[String]) -> Option<Self> {
        let first = errors.first()?;
        let (code, message) = match first.split_once(':') {
            Some((code, message)) => (code.to_string(), message.to_string()),
            None => ("Unknown".to_string(), first.clone()),
        };
        Some(Self {
            code,
            message,
            errors: errors.to_vec(),
        })
    }

    /// Get the full error string in Kraken's format (code:message).
    pub fn full_code(&self) -> String {
        format!("{}:{}", self.code, self.message)
    }

    /// Check if this is an invalid nonce error.
    pub fn is_invalid_nonce(&self) -> bool {
        self.code == "EAPI" && self.message.contains("Invalid nonce")
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.code == "EAPI" && self.message.contains("Invalid signature")
    }
}

/// Known Kraken error codes for pattern matching.
pub mod error_codes {
    /// General errors
    pub const INVALID_ARGUMENTS: &str = "EGeneral:Invalid arguments";
    pub const PERMISSION_DENIED: &str = "EGeneral:Permission denied";

    /// API errors
    pub const INVALID_KEY: &str = "EAPI:Invalid key";
    pub const INVALID_SIGNATURE: &str = "EAPI:Invalid signature";
    pub const INVALID_NONCE: &str = "EAPI:Invalid nonce";

    /// Order errors
    pub const INSUFFICIENT_FUNDS: &str = "EOrder:Insufficient funds";
    pub const ORDER_NOT_FOUND: &str = "EOrder:Unknown order";

    /// Query errors
    pub const UNKNOWN_ASSET_PAIR: &str = "EQuery:Unknown asset pair";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_array() {
        let errors = vec![error_codes::INVALID_NONCE.to_string()];
        let error = ApiError::from_error_array(&errors).unwrap();
        assert_eq!(error.code, "EAPI");
        assert_eq!(error.message, "Invalid nonce");
        assert!(error.is_invalid_nonce());
        assert_eq!(error.full_code(), error_codes::INVALID_NONCE);
    }

    #[test]
    fn test_api_error_keeps_all_entries() {
        let errors = vec![
            "EOrder:Insufficient funds".to_string(),
            "EGeneral:Invalid arguments:volume".to_string(),
        ];
        let error = ApiError::from_error_array(&errors).unwrap();
        assert_eq!(error.code, "EOrder");
        assert_eq!(error.errors, errors);
        assert_eq!(error.to_string(), "EOrder: Insufficient funds (+1 more)");
    }

    #[test]
    fn test_api_error_without_category() {
        let error = ApiError::from_error_array(&["Something odd".to_string()]).unwrap();
        assert_eq!(error.code, "Unknown");
        assert_eq!(error.message, "Something odd");
        assert!(ApiError::from_error_array(&[]).is_none());
    }

    #[test]
    fn test_error_kinds() {
        let api = KrakenError::Api(ApiError::new("EOrder", "Unknown order"));
        assert_eq!(api.kind(), ErrorKind::ExchangeError);
        assert_eq!(api.codes(), [error_codes::ORDER_NOT_FOUND.to_string()]);

        assert_eq!(
            KrakenError::Validation("x".into()).kind(),
            ErrorKind::ValidationError
        );
        assert_eq!(
            KrakenError::Internal("x".into()).kind(),
            ErrorKind::InternalError
        );
        assert_eq!(
            KrakenError::InvalidResponse("x".into()).kind(),
            ErrorKind::ExchangeError
        );
        assert!(KrakenError::Config("x".into()).codes().is_empty());
    }
}
