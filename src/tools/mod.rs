//! Tool registry exposing Kraken endpoints to an agent host.
//!
//! Every tool is registered explicitly at startup with its name, JSON Schema,
//! access level and handler. [`ToolRegistry::call`] is the boundary where
//! every error is turned into a [`ToolResult`]; nothing propagates to the
//! host as a fault.

mod account;
mod args;
mod market;
mod result;
mod trading;

use std::collections::BTreeMap;

use futures_util::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::KrakenError;
use crate::rest::RestClient;

pub use args::Args;
pub use result::{ToolFailure, ToolResult};

/// Future returned by a tool handler.
pub type ToolFuture<'a> = BoxFuture<'a, Result<Value, KrakenError>>;

/// A tool handler: validates `Args`, then calls the exchange.
pub type ToolHandler = for<'a> fn(&'a RestClient, Args) -> ToolFuture<'a>;

/// Whether a tool calls a signed endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    /// Unsigned market-data endpoint, no side effects.
    Public,
    /// Signed endpoint reading or changing account state.
    Private,
}

/// One registered tool.
#[derive(Clone)]
pub struct Tool {
    /// Stable tool name.
    pub name: &'static str,
    /// Description shown to the model.
    pub description: &'static str,
    /// Public or private endpoint.
    pub access: Access,
    /// JSON Schema of the arguments object.
    pub input_schema: Value,
    handler: ToolHandler,
}

impl Tool {
    pub(crate) fn new(
        name: &'static str,
        description: &'static str,
        access: Access,
        input_schema: Value,
        handler: ToolHandler,
    ) -> Self {
        Self {
            name,
            description,
            access,
            input_schema,
            handler,
        }
    }
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("access", &self.access)
            .finish()
    }
}

/// Mapping from tool name to tool, bound to one REST client.
#[derive(Debug)]
pub struct ToolRegistry {
    client: RestClient,
    tools: BTreeMap<&'static str, Tool>,
}

impl ToolRegistry {
    /// Build the registry with every public and private tool.
    ///
    /// Fails with [`KrakenError::Config`] if the client has no credentials.
    pub fn new(client: RestClient) -> Result<Self, KrakenError> {
        if !client.has_credentials() {
            return Err(KrakenError::Config(
                "API key and secret are required to register trading tools".to_string(),
            ));
        }

        let tools = market::tools()
            .into_iter()
            .chain(trading::tools())
            .chain(account::tools())
            .map(|tool| (tool.name, tool))
            .collect();

        Ok(Self { client, tools })
    }

    /// All tools, ordered by name.
    pub fn tools(&self) -> impl Iterator<Item = &Tool> {
        self.tools.values()
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Invoke a tool. Never fails: errors come back as [`ToolResult::Failure`].
    pub async fn call(&self, name: &str, arguments: Value) -> ToolResult {
        let Some(tool) = self.tools.get(name) else {
            let error = KrakenError::Validation(format!("Unknown tool: {name}"));
            return ToolResult::Failure(error.into());
        };

        let args = match Args::from_value(arguments) {
            Ok(args) => args,
            Err(e) => return ToolResult::Failure(e.into()),
        };

        debug!(tool = tool.name, access = ?tool.access, "calling tool");
        let result = ToolResult::from((tool.handler)(&self.client, args).await);
        if let Some(failure) = result.failure() {
            warn!(tool = tool.name, kind = ?failure.kind, message = %failure.message, "tool failed");
        }
        result
    }
}

/// JSON Schema for an object with the given properties.
pub(crate) fn object_schema(properties: Value, required: &[&str]) -> Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}
