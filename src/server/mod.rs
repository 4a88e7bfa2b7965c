//! MCP server over stdio, built on the `rmcp` SDK.
//!
//! `KrakenMcpServer` answers `tools/list` and `tools/call` from the
//! [`ToolRegistry`]; `rmcp` owns the protocol handshake and framing. Input
//! passes through [`forward_messages`] first, so a line that is not a valid
//! client message is logged and dropped instead of ending the session.

use std::io;
use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, ClientJsonRpcMessage, Content, Implementation,
    JsonObject, ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities,
    ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData, ServerHandler, ServiceExt};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::tools::ToolRegistry;

/// Name announced in `initialize`.
pub const SERVER_NAME: &str = "kraken-mcp";

// Bytes buffered between the input filter and the protocol reader.
const INBOUND_BUFFER: usize = 64 * 1024;

/// MCP handler exposing every tool in a [`ToolRegistry`].
#[derive(Clone)]
pub struct KrakenMcpServer {
    registry: Arc<ToolRegistry>,
}

impl KrakenMcpServer {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Descriptors for `tools/list`, in registry order.
    pub fn tool_descriptors(&self) -> Vec<Tool> {
        self.registry
            .tools()
            .map(|tool| {
                let schema = tool.input_schema.as_object().cloned().unwrap_or_default();
                Tool::new(tool.name, tool.description, Arc::new(schema))
            })
            .collect()
    }

    /// Run one tool and wrap its `{"ok": ...}` envelope as text content.
    ///
    /// Failures of any kind come back with `isError` set, never as a
    /// protocol error.
    pub async fn call(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let arguments = arguments.map(Value::Object).unwrap_or(Value::Null);
        let result = self.registry.call(name, arguments).await;
        let content = vec![Content::text(result.to_json().to_string())];
        if result.is_error() {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

impl ServerHandler for KrakenMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Kraken Spot market data, account and order tools. add_order only validates \
                 unless called with validate=false."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tool_descriptors()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        debug!(tool = %request.name, "tools/call");
        Ok(self.call(&request.name, request.arguments).await)
    }
}

/// Serve the registry on the process's stdin and stdout until stdin closes.
pub async fn serve_stdio(registry: Arc<ToolRegistry>) -> io::Result<()> {
    serve(registry, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Serve the registry over any newline-delimited byte stream pair.
///
/// Returns once the input reaches EOF or the client ends the session.
pub async fn serve<R, W>(registry: Arc<ToolRegistry>, input: R, output: W) -> io::Result<()>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (filtered, protocol_input) = tokio::io::duplex(INBOUND_BUFFER);
    let pump = tokio::spawn(forward_messages(input, filtered));

    let session = match KrakenMcpServer::new(registry)
        .serve((protocol_input, output))
        .await
    {
        Ok(service) => service.waiting().await.map(|_| ()).map_err(io::Error::other),
        Err(e) => Err(io::Error::other(e.to_string())),
    };
    info!("session ended");

    // The filter may still be parked on a read of the client's input.
    pump.abort();
    match pump.await {
        Ok(forwarded) => forwarded?,
        Err(e) if e.is_cancelled() => {}
        Err(e) => return Err(io::Error::other(e)),
    }
    session
}

/// Copy client messages from `input` to `output` one line at a time.
///
/// Blank lines are skipped. Lines that are not UTF-8 or not a JSON-RPC
/// client message are logged and dropped. Returns at input EOF or once
/// `output` stops accepting data.
pub async fn forward_messages<R, W>(input: R, mut output: W) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(input);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            debug!("input closed");
            return Ok(());
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            warn!(bytes = buf.len(), "dropping input line that is not UTF-8");
            continue;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Err(e) = serde_json::from_str::<ClientJsonRpcMessage>(line) {
            warn!(error = %e, "dropping malformed message");
            continue;
        }

        let sent = async {
            output.write_all(line.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await
        };
        if let Err(e) = sent.await {
            debug!(error = %e, "protocol reader gone");
            return Ok(());
        }
    }
}
