use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::catalog::Tool;
use super::HandlerContext;
use crate::compute::{Collection, ComputeClient, ListQuery, DEFAULT_LIMIT};
use crate::protocol::{
    CreateInstanceArgs, DeleteInstanceArgs, GetVmArgs, InstanceActionArgs, ListVmsArgs,
    McpErrorCode, McpErrorResponse, ToolCallParams, ToolResult,
};
use crate::schema::validate_value;

/// Handle a `tools/call` request.
///
/// Arguments are checked against the tool's advertised input schema before
/// anything is sent upstream. The call as a whole is bounded by the
/// configured tool timeout.
pub async fn call(params: &ToolCallParams, ctx: &HandlerContext) -> ToolResult {
    let Some(tool) = Tool::from_name(&params.name) else {
        return McpErrorResponse::new(
            McpErrorCode::InvalidArguments,
            format!("Unknown tool: {}", params.name),
        )
        .into();
    };

    let args = params
        .arguments
        .clone()
        .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

    if let Err(e) = validate_value(&tool.input_schema(), &args) {
        return McpErrorResponse::new(
            McpErrorCode::InvalidArguments,
            format!("Invalid arguments for {}: {e}", tool.name()),
        )
        .into();
    }

    debug!(tool = tool.name(), "running tool");

    match tokio::time::timeout(ctx.tool_timeout, run(tool, args, &ctx.client)).await {
        Ok(Ok(value)) => ToolResult::json(&value),
        Ok(Err(err)) => {
            warn!(tool = tool.name(), code = ?err.error.code, "tool failed: {}", err.error.message);
            err.into()
        }
        Err(_) => {
            warn!(tool = tool.name(), "timed out after {} seconds", ctx.tool_timeout.as_secs());
            McpErrorResponse::canonical(McpErrorCode::Timeout).into()
        }
    }
}

async fn run(tool: Tool, args: Value, client: &ComputeClient) -> Result<Value, McpErrorResponse> {
    match tool {
        Tool::ListVms => {
            let args: ListVmsArgs = parse_args(tool, args)?;
            let query = ListQuery {
                limit: args.limit.unwrap_or(DEFAULT_LIMIT),
                offset: args.offset.unwrap_or(0),
                sort: args
                    .sort
                    .unwrap_or_else(|| Collection::Instances.default_sort().to_string()),
                expand: args.expand,
            };
            Ok(client
                .list(Collection::Instances, &query, args.tenant_id.as_deref())
                .await?)
        }

        Tool::GetVm => {
            let args: GetVmArgs = parse_args(tool, args)?;
            Ok(client
                .get_instance(&args.vm_id, &args.expand, args.tenant_id.as_deref())
                .await?)
        }

        Tool::CreateInstance => {
            let args: CreateInstanceArgs = parse_args(tool, args)?;
            Ok(client
                .create_instance(&args.body, args.tenant_id.as_deref())
                .await?)
        }

        Tool::DeleteInstance => {
            let args: DeleteInstanceArgs = parse_args(tool, args)?;
            Ok(client
                .delete_instance(&args.id, args.delete_public_ip, args.tenant_id.as_deref())
                .await?)
        }

        Tool::Action(action) => {
            let args: InstanceActionArgs = parse_args(tool, args)?;
            Ok(client
                .instance_action(&args.id, action, args.tenant_id.as_deref())
                .await?)
        }
    }
}

fn parse_args<T: DeserializeOwned>(tool: Tool, args: Value) -> Result<T, McpErrorResponse> {
    serde_json::from_value(args).map_err(|e| {
        McpErrorResponse::new(
            McpErrorCode::InvalidArguments,
            format!("Invalid arguments for {}: {e}", tool.name()),
        )
    })
}
