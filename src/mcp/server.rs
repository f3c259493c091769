//! MCP server implementation.

use super::protocol::*;
use super::tools::get_tools;
use crate::error::{Result, TranscriptError};
use crate::service::TranscriptService;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const LATEST_PROTOCOL_VERSION: &str = "2025-06-18";
const SUPPORTED_PROTOCOL_VERSIONS: [&str; 3] = ["2025-06-18", "2025-03-26", "2024-11-05"];
const SERVER_NAME: &str = "yt-transcript";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server exposing the transcript tools.
pub struct McpServer {
    service: Arc<TranscriptService>,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(service: TranscriptService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut stdout = tokio::io::stdout();
        self.serve(tokio::io::stdin(), &mut stdout).await
    }

    /// Serve newline-delimited JSON-RPC until the reader is exhausted.
    ///
    /// Tool calls run on their own tasks so `notifications/cancelled` can
    /// abort them; every other request is answered inline. Responses are
    /// written one per line in completion order.
    pub async fn serve<R, W>(&self, reader: R, writer: &mut W) -> anyhow::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("MCP server starting");

        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();
        let mut in_flight: HashMap<String, JoinHandle<()>> = HashMap::new();
        let mut lines = BufReader::new(reader).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    in_flight.retain(|_, handle| !handle.is_finished());
                    if let Some(response) = self.handle_line(&line, &tx, &mut in_flight) {
                        write_response(writer, &response).await?;
                    }
                }
                Some(response) = rx.recv() => {
                    write_response(writer, &response).await?;
                }
            }
        }

        // Input closed: let running calls finish and flush their responses.
        drop(tx);
        while let Some(response) = rx.recv().await {
            write_response(writer, &response).await?;
        }

        info!("MCP server stopped");
        Ok(())
    }

    /// Handle one input line, returning a response to write immediately.
    fn handle_line(
        &self,
        line: &str,
        tx: &mpsc::UnboundedSender<JsonRpcResponse>,
        in_flight: &mut HashMap<String, JoinHandle<()>>,
    ) -> Option<JsonRpcResponse> {
        if line.trim().is_empty() {
            return None;
        }

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                return Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"));
            }
        };

        debug!("Received {}", request.method);

        let method = request.method.clone();
        match method.as_str() {
            "tools/call" if !request.is_notification() => {
                let key = request_key(request.id.as_ref());
                if in_flight.contains_key(&key) {
                    warn!("Rejecting tools/call with in-flight id {}", key);
                    return Some(JsonRpcResponse::error(
                        request.id,
                        INVALID_PARAMS,
                        &format!("Request id {} is already in flight", key),
                    ));
                }
                let service = Arc::clone(&self.service);
                let tx = tx.clone();
                let handle = tokio::spawn(async move {
                    let response = handle_tools_call(&service, request.id, request.params).await;
                    let _ = tx.send(response);
                });
                in_flight.insert(key, handle);
                None
            }
            "notifications/cancelled" => {
                self.handle_cancelled(request.params, in_flight);
                None
            }
            _ if request.is_notification() => None,
            "initialize" => Some(handle_initialize(request.id, request.params)),
            "ping" => Some(JsonRpcResponse::success(request.id, json!({}))),
            "tools/list" => Some(handle_tools_list(request.id)),
            _ => Some(JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", method),
            )),
        }
    }

    /// Abort an in-flight tool call. Aborted calls get no response.
    fn handle_cancelled(
        &self,
        params: Option<Value>,
        in_flight: &mut HashMap<String, JoinHandle<()>>,
    ) {
        let Some(params) = params.and_then(|p| serde_json::from_value::<CancelledParams>(p).ok())
        else {
            warn!("Ignoring malformed cancellation");
            return;
        };

        let key = request_key(Some(&params.request_id));
        match in_flight.remove(&key) {
            Some(handle) => {
                handle.abort();
                info!(
                    "Cancelled request {} ({})",
                    key,
                    params.reason.as_deref().unwrap_or("no reason given")
                );
            }
            None => debug!("Cancellation for unknown or finished request {}", key),
        }
    }
}

fn request_key(id: Option<&Value>) -> String {
    id.map(Value::to_string).unwrap_or_default()
}

async fn write_response<W>(writer: &mut W, response: &JsonRpcResponse) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_string(response)?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_default()
}

/// Handle initialize request, echoing the client's protocol version when supported.
fn handle_initialize(id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let requested = params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str);
    let protocol_version = requested
        .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
        .unwrap_or(LATEST_PROTOCOL_VERSION);

    let result = InitializeResult {
        protocol_version: protocol_version.to_string(),
        capabilities: ServerCapabilities {
            tools: ToolsCapability { list_changed: false },
        },
        server_info: ServerInfo {
            name: SERVER_NAME.to_string(),
            version: SERVER_VERSION.to_string(),
        },
    };

    JsonRpcResponse::success(id, to_json(&result))
}

/// Handle tools/list request.
fn handle_tools_list(id: Option<Value>) -> JsonRpcResponse {
    let result = ToolsListResult { tools: get_tools() };
    JsonRpcResponse::success(id, to_json(&result))
}

/// Handle tools/call request.
async fn handle_tools_call(
    service: &TranscriptService,
    id: Option<Value>,
    params: Option<Value>,
) -> JsonRpcResponse {
    let params: ToolCallParams = match params {
        Some(p) => match serde_json::from_value(p) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, &format!("Invalid params: {}", e))
            }
        },
        None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
    };

    let args = params.arguments.unwrap_or_else(|| json!({}));
    let outcome = match params.name.as_str() {
        "get_full_transcript" => tool_get_full_transcript(service, &args).await,
        "search_transcript" => tool_search_transcript(service, &args).await,
        "extract_transcript_section" => tool_extract_transcript_section(service, &args).await,
        "get_video_information" => tool_get_video_information(service, &args).await,
        _ => {
            return JsonRpcResponse::success(
                id,
                to_json(&ToolCallResult::error(format!("Unknown tool: {}", params.name))),
            )
        }
    };

    let result = outcome.unwrap_or_else(|e| {
        warn!("Tool {} failed: {}", params.name, e);
        ToolCallResult::error(e.to_string()).with_structured(json!({
            "error": { "kind": e.kind(), "message": e.to_string() }
        }))
    });

    JsonRpcResponse::success(id, to_json(&result))
}

/// Get full transcript tool.
async fn tool_get_full_transcript(service: &TranscriptService, args: &Value) -> Result<ToolCallResult> {
    let video_url = required_str(args, "video_url")?;
    let transcript = service.full_transcript(video_url).await?;
    Ok(ToolCallResult::text(transcript.render()).with_structured(to_json(&transcript)))
}

/// Search transcript tool.
async fn tool_search_transcript(service: &TranscriptService, args: &Value) -> Result<ToolCallResult> {
    let video_url = required_str(args, "video_url")?;
    let term = required_str(args, "search_term")?;
    let context_seconds = optional_f64(args, "context_seconds")?;

    let results = service.search(video_url, term, context_seconds).await?;
    let mut structured = to_json(&results);
    structured["match_count"] = json!(results.matches.len());
    Ok(ToolCallResult::text(results.render()).with_structured(structured))
}

/// Extract transcript section tool.
async fn tool_extract_transcript_section(
    service: &TranscriptService,
    args: &Value,
) -> Result<ToolCallResult> {
    let video_url = required_str(args, "video_url")?;
    let start_time = optional_f64(args, "start_time")?.ok_or_else(|| {
        TranscriptError::InvalidInput("missing 'start_time' argument".to_string())
    })?;
    let end_time = optional_f64(args, "end_time")?;

    let section = service.extract_section(video_url, start_time, end_time).await?;
    let mut structured = to_json(&section);
    structured["segment_count"] = json!(section.segments.len());
    Ok(ToolCallResult::text(section.render()).with_structured(structured))
}

/// Get video information tool.
async fn tool_get_video_information(service: &TranscriptService, args: &Value) -> Result<ToolCallResult> {
    let video_url = required_str(args, "video_url")?;
    let info = service.video_info(video_url).await?;
    Ok(ToolCallResult::text(info.render()).with_structured(to_json(&info)))
}

fn required_str<'a>(args: &'a Value, name: &str) -> Result<&'a str> {
    match args.get(name) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(TranscriptError::InvalidInput(format!(
            "'{}' must be a string",
            name
        ))),
        None => Err(TranscriptError::InvalidInput(format!(
            "missing '{}' argument",
            name
        ))),
    }
}

fn optional_f64(args: &Value, name: &str) -> Result<Option<f64>> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_f64().map(Some).ok_or_else(|| {
            TranscriptError::InvalidInput(format!("'{}' must be a number", name))
        }),
    }
}
