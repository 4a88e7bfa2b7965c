//! The uniform result shape returned to the agent host.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ErrorKind, KrakenError};

/// Outcome of one tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    /// The exchange's `result` payload, passed through unchanged.
    Success(Value),
    /// A classified failure.
    Failure(ToolFailure),
}

/// Failure details reported to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolFailure {
    /// Failure classification.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Exchange error strings, when the exchange rejected the call.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub codes: Vec<String>,
}

#[derive(Serialize)]
struct Envelope<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a ToolFailure>,
}

impl ToolResult {
    /// Whether this is a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, ToolResult::Failure(_))
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&ToolFailure> {
        match self {
            ToolResult::Failure(failure) => Some(failure),
            ToolResult::Success(_) => None,
        }
    }

    /// Render as `{"ok": true, "result": ...}` or `{"ok": false, "error": ...}`.
    pub fn to_json(&self) -> Value {
        let envelope = match self {
            ToolResult::Success(result) => Envelope {
                ok: true,
                result: Some(result),
                error: None,
            },
            ToolResult::Failure(failure) => Envelope {
                ok: false,
                result: None,
                error: Some(failure),
            },
        };
        serde_json::to_value(envelope).unwrap_or_else(|e| {
            serde_json::json!({
                "ok": false,
                "error": {"kind": ErrorKind::InternalError, "message": e.to_string()}
            })
        })
    }
}

impl From<KrakenError> for ToolFailure {
    fn from(error: KrakenError) -> Self {
        Self {
            kind: error.kind(),
            codes: error.codes().to_vec(),
            message: error.to_string(),
        }
    }
}

impl From<Result<Value, KrakenError>> for ToolResult {
    fn from(result: Result<Value, KrakenError>) -> Self {
        match result {
            Ok(value) => ToolResult::Success(value),
            Err(error) => ToolResult::Failure(error.into()),
        }
    }
}
