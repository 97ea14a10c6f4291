pub mod catalog;
pub mod prompts;
pub mod resources;
pub mod tools;

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::compute::{ApiError, ComputeClient};
use crate::config::ServerConfig;
use crate::protocol::{
    InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, PromptGetParams,
    ResourceReadParams, ToolCallParams,
};

/// MCP protocol revision implemented by this server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Everything a handler needs to serve a request.
#[derive(Debug, Clone)]
pub struct HandlerContext {
    pub client: ComputeClient,
    pub tool_timeout: Duration,
}

impl HandlerContext {
    pub fn new(config: &ServerConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client: ComputeClient::new(config)?,
            tool_timeout: config.tool_timeout,
        })
    }
}

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, ctx: &HandlerContext) -> Option<JsonRpcResponse> {
    if req.is_notification() {
        if !req.method.starts_with("notifications/") {
            warn!(method = %req.method, "dropping request without id");
        }
        return None;
    }

    let id = req.id.clone();

    match req.method.as_str() {
        "initialize" => {
            if let Some(Ok(params)) = req
                .params
                .clone()
                .map(serde_json::from_value::<InitializeParams>)
            {
                let client = params.client_info.as_ref();
                info!(
                    client = client.and_then(|c| c.name.as_deref()).unwrap_or("unknown"),
                    client_version = client.and_then(|c| c.version.as_deref()).unwrap_or("unknown"),
                    protocol = params.protocol_version.as_deref().unwrap_or("unspecified"),
                    "initialize"
                );
            }

            let result = serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {},
                    "resources": {},
                    "prompts": {}
                },
                "serverInfo": {
                    "name": "mcp-vm-server",
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(id, result))
        }

        "ping" => Some(JsonRpcResponse::success(id, serde_json::json!({}))),

        "tools/list" => Some(JsonRpcResponse::success(id, catalog::tools_list())),

        "tools/call" => {
            let params: ToolCallParams = match parse_params(req) {
                Ok(p) => p,
                Err(e) => return Some(JsonRpcResponse::error(id, e)),
            };

            let tool_result = tools::call(&params, ctx).await;
            match serde_json::to_value(&tool_result) {
                Ok(result) => Some(JsonRpcResponse::success(id, result)),
                Err(e) => Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::internal_error(format!("Cannot serialize tool result: {e}")),
                )),
            }
        }

        "resources/list" => Some(JsonRpcResponse::success(id, catalog::resources_list())),

        "resources/read" => {
            let params: ResourceReadParams = match parse_params(req) {
                Ok(p) => p,
                Err(e) => return Some(JsonRpcResponse::error(id, e)),
            };

            match resources::read(params, ctx).await {
                Ok(result) => Some(JsonRpcResponse::success(id, result)),
                Err(mcp_err) => Some(JsonRpcResponse::error(id, mcp_err.into())),
            }
        }

        "prompts/list" => Some(JsonRpcResponse::success(id, catalog::prompts_list())),

        "prompts/get" => {
            let params: PromptGetParams = match parse_params(req) {
                Ok(p) => p,
                Err(e) => return Some(JsonRpcResponse::error(id, e)),
            };

            match prompts::get(&params) {
                Ok(result) => Some(JsonRpcResponse::success(id, result)),
                Err(mcp_err) => Some(JsonRpcResponse::error(id, mcp_err.into())),
            }
        }

        _ => Some(JsonRpcResponse::error(
            id,
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

fn parse_params<T: DeserializeOwned>(req: &JsonRpcRequest) -> Result<T, JsonRpcError> {
    match &req.params {
        Some(v) => serde_json::from_value(v.clone()).map_err(|e| {
            JsonRpcError::invalid_params(format!("Invalid {} params: {e}", req.method))
        }),
        None => Err(JsonRpcError::invalid_params(format!(
            "Missing params for {}",
            req.method
        ))),
    }
}
