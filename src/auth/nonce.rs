//! Nonce generation for Kraken API authentication.
//!
//! Kraken rejects any private request whose nonce is not strictly greater
//! than the last nonce it accepted for the same API key.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing nonces for authenticated requests.
///
/// Every value returned must be greater than any value previously returned
/// by the same provider, including across threads.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    fn next_nonce(&self) -> u64;
}

/// A nonce provider based on wall-clock microseconds.
///
/// All issuance goes through one atomic compare-and-swap on the last issued
/// value. When the clock has not advanced (or went backwards) the provider
/// hands out `last + 1` instead.
#[derive(Debug)]
pub struct IncreasingNonce {
    last_nonce: AtomicU64,
}

impl IncreasingNonce {
    /// Create a new increasing nonce provider.
    pub fn new() -> Self {
        Self::starting_after(0)
    }

    /// Create a provider whose first nonce is strictly greater than `floor`.
    pub fn starting_after(floor: u64) -> Self {
        Self {
            last_nonce: AtomicU64::new(floor),
        }
    }

    fn current_time_micros() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX))
            .unwrap_or_default()
    }
}

impl Default for IncreasingNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        let now = Self::current_time_micros();
        let previous = self
            .last_nonce
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);

        now.max(previous.saturating_add(1))
    }
}
