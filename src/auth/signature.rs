//! HMAC-SHA512 signature generation for Kraken API authentication.
//!
//! Kraken private endpoints require a signature computed as:
//! ```text
//! HMAC-SHA512(path + SHA256(nonce + POST_data), base64_decode(api_secret))
//! ```
//!
//! The signature is then base64-encoded and sent in the `API-Sign` header.
//! The POST body must be encoded exactly once: the bytes that are signed are
//! the bytes that go on the wire.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::{Digest, Sha256, Sha512};

use crate::auth::Credentials;
use crate::error::KrakenError;

type HmacSha512 = Hmac<Sha512>;

/// URL-encode a private request body with the nonce as the first field.
///
/// Fields follow the declaration order of `params`; nothing is sorted.
/// A serialization failure is an [`KrakenError::Internal`] error.
pub fn encode_private_body<P>(nonce: u64, params: &P) -> Result<String, KrakenError>
where
    P: Serialize + ?Sized,
{
    let params = serde_urlencoded::to_string(params)
        .map_err(|e| KrakenError::Internal(format!("Failed to encode request body: {e}")))?;

    if params.is_empty() {
        Ok(format!("nonce={nonce}"))
    } else {
        Ok(format!("nonce={nonce}&{params}"))
    }
}

/// Sign a request for Kraken's private API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `url_path` - The API endpoint path (e.g., "/0/private/Balance")
/// * `nonce` - The nonce value for this request
/// * `post_data` - The URL-encoded POST body, exactly as it will be sent
///
/// # Returns
///
/// Base64-encoded HMAC-SHA512 signature.
///
/// # Example
///
/// ```rust
/// use kraken_mcp_tools::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "YXBpX3NlY3JldA==")?; // base64 of "api_secret"
/// let signature = sign_request(
///     &credentials,
///     "/0/private/Balance",
///     1234567890,
///     "nonce=1234567890"
/// )?;
/// assert_eq!(signature.len(), 88);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    url_path: &str,
    nonce: u64,
    post_data: &str,
) -> Result<String, KrakenError> {
    let mut sha256_hasher = Sha256::new();
    sha256_hasher.update(nonce.to_string().as_bytes());
    sha256_hasher.update(post_data.as_bytes());
    let sha256_hash = sha256_hasher.finalize();

    let mut hmac = HmacSha512::new_from_slice(credentials.signing_key())
        .map_err(|e| KrakenError::Internal(format!("Invalid HMAC key: {e}")))?;
    hmac.update(url_path.as_bytes());
    hmac.update(&sha256_hash);

    Ok(BASE64.encode(hmac.finalize().into_bytes()))
}
