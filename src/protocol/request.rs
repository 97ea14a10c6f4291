use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 ID — may be a number or string per spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
}

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<RpcId>,
    pub method: String,
    pub params: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    /// Notifications carry no id and never get a response.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// MCP `initialize` params.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: Option<String>,
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
}

/// Client information sent during `initialize`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Parameters for `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

/// Parameters for `resources/read`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceReadParams {
    pub uri: String,
}

/// Parameters for `prompts/get`.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptGetParams {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

/// Arguments for the `list_vms` tool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListVmsArgs {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub sort: Option<String>,
    #[serde(default)]
    pub expand: Vec<String>,
    pub tenant_id: Option<String>,
}

/// Arguments for the `get_vm` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct GetVmArgs {
    pub vm_id: String,
    #[serde(default)]
    pub expand: Vec<String>,
    pub tenant_id: Option<String>,
}

/// Arguments for the `create_instance` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInstanceArgs {
    pub body: serde_json::Value,
    pub tenant_id: Option<String>,
}

/// Arguments for the `delete_instance` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteInstanceArgs {
    pub id: String,
    #[serde(default)]
    pub delete_public_ip: bool,
    pub tenant_id: Option<String>,
}

/// Arguments shared by the power-state tools (start, stop, reboot, suspend).
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceActionArgs {
    pub id: String,
    pub tenant_id: Option<String>,
}
