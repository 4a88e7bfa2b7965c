//! Kraken Spot REST API client.
//!
//! A thin transport: public endpoints are plain GET requests, private
//! endpoints are signed POST requests. Response bodies are returned as
//! opaque JSON once the `{"error": [...], "result": ...}` envelope has been
//! checked. There are no retries; every call is a single attempt.

mod client;
mod endpoints;
pub mod private;
pub mod public;

pub use client::{DEFAULT_TIMEOUT, RestClient, RestClientBuilder};
pub use endpoints::*;
