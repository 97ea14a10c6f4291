use serde_json::{json, Value};

use super::catalog::{resource_uri, VM_QUERY_PROMPT};
use crate::compute::Collection;
use crate::protocol::{McpErrorCode, McpErrorResponse, PromptGetParams};

/// Handle a `prompts/get` request.
pub fn get(params: &PromptGetParams) -> Result<Value, McpErrorResponse> {
    if params.name != VM_QUERY_PROMPT {
        return Err(McpErrorResponse::new(
            McpErrorCode::InvalidArguments,
            format!("Unknown prompt: {}", params.name),
        ));
    }

    let query = params
        .arguments
        .get("query")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            McpErrorResponse::new(
                McpErrorCode::InvalidArguments,
                "Prompt vm_query requires a non-empty `query` argument",
            )
        })?;

    let resources = Collection::ALL
        .into_iter()
        .map(resource_uri)
        .collect::<Vec<_>>()
        .join(", ");

    Ok(json!({
        "description": "Query or operate virtual machines",
        "messages": [
            message("user", "You want to query or operate virtual machines."),
            message("user", &format!("Query: {query}")),
            message(
                "assistant",
                &format!(
                    "Use the resources {resources}, or the tools to list, inspect, create, delete, start, stop, reboot or suspend VMs."
                ),
            ),
        ]
    }))
}

fn message(role: &str, text: &str) -> Value {
    json!({
        "role": role,
        "content": { "type": "text", "text": text }
    })
}
