//! # Kraken MCP Tools
//!
//! Kraken Spot REST endpoints exposed as Model Context Protocol tools.
//!
//! ## Features
//!
//! - Request signing for private endpoints (HMAC-SHA512 over nonce and body)
//! - Strictly increasing nonces, safe under concurrent calls
//! - An explicit tool registry with JSON Schemas for every tool
//! - Loose argument coercion with validation before any network call
//! - A uniform `{ok, result | error}` result shape for every tool
//! - An MCP server on stdin/stdout, built on `rmcp`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use kraken_mcp_tools::auth::Credentials;
//! use kraken_mcp_tools::config::ServerConfig;
//! use kraken_mcp_tools::tools::ToolRegistry;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Arc::new(Credentials::from_env()?);
//!     let client = ServerConfig::from_env()?.rest_client(credentials)?;
//!     let registry = ToolRegistry::new(client)?;
//!
//!     let result = registry.call("ticker", json!({"pairs": "XBTUSD"})).await;
//!     println!("{}", result.to_json());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod rest;
pub mod server;
pub mod tools;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ErrorKind, KrakenError};
pub use types::common::{BuySell, OrderType};

/// Result type alias using KrakenError
pub type Result<T> = std::result::Result<T, KrakenError>;
