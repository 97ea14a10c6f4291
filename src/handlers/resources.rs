use serde_json::{json, Value};
use tracing::warn;
use url::Url;

use super::catalog::RESOURCE_SCHEME;
use super::HandlerContext;
use crate::compute::{Collection, ListQuery};
use crate::protocol::{McpErrorCode, McpErrorResponse, ResourceReadParams};

/// A parsed `vm://<collection>?...` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    pub collection: Collection,
    pub query: ListQuery,
    pub tenant_id: Option<String>,
}

/// Handle a `resources/read` request.
pub async fn read(params: ResourceReadParams, ctx: &HandlerContext) -> Result<Value, McpErrorResponse> {
    let request = parse_resource_uri(&params.uri)?;

    let fetch = ctx
        .client
        .list(request.collection, &request.query, request.tenant_id.as_deref());

    let body = match tokio::time::timeout(ctx.tool_timeout, fetch).await {
        Ok(result) => result?,
        Err(_) => {
            warn!(uri = %params.uri, "resource read timed out after {} seconds", ctx.tool_timeout.as_secs());
            return Err(McpErrorResponse::canonical(McpErrorCode::Timeout));
        }
    };

    Ok(json!({
        "contents": [
            {
                "uri": params.uri,
                "mimeType": "application/json",
                "text": body.to_string()
            }
        ]
    }))
}

/// Parse a resource URI and its optional query overrides.
///
/// Accepted parameters: `_limit`, `_offset`, `_sort`, `expand` (repeatable
/// or comma separated) and `tenant_id`.
pub fn parse_resource_uri(uri: &str) -> Result<ResourceRequest, McpErrorResponse> {
    let unknown = || McpErrorResponse::new(McpErrorCode::UnknownResource, format!("Unknown resource: {uri}"));

    let url = Url::parse(uri).map_err(|_| unknown())?;
    if url.scheme() != RESOURCE_SCHEME || !matches!(url.path(), "" | "/") {
        return Err(unknown());
    }

    let collection = url
        .host_str()
        .and_then(Collection::from_path)
        .ok_or_else(unknown)?;

    let mut query = ListQuery::for_collection(collection);
    let mut tenant_id = None;

    for (key, value) in url.query_pairs() {
        match &*key {
            "_limit" => query.limit = parse_number(uri, &key, &value, 1)?,
            "_offset" => query.offset = parse_number(uri, &key, &value, 0)?,
            "_sort" => {
                if !value.is_empty() {
                    query.sort = value.into_owned();
                }
            }
            "expand" => query.expand.extend(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|e| !e.is_empty())
                    .map(str::to_string),
            ),
            "tenant_id" => {
                if !value.is_empty() {
                    tenant_id = Some(value.into_owned());
                }
            }
            _ => {
                return Err(McpErrorResponse::new(
                    McpErrorCode::InvalidArguments,
                    format!("Unsupported parameter `{key}` in {uri}"),
                ))
            }
        }
    }

    Ok(ResourceRequest {
        collection,
        query,
        tenant_id,
    })
}

fn parse_number(uri: &str, key: &str, value: &str, min: u32) -> Result<u32, McpErrorResponse> {
    match value.parse::<u32>() {
        Ok(n) if n >= min => Ok(n),
        _ => Err(McpErrorResponse::new(
            McpErrorCode::InvalidArguments,
            format!("`{key}` must be an integer >= {min} in {uri}"),
        )),
    }
}
