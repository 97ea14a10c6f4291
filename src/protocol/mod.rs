pub mod request;
pub mod response;

pub use request::{
    ClientInfo, CreateInstanceArgs, DeleteInstanceArgs, GetVmArgs, InitializeParams,
    InstanceActionArgs, JsonRpcRequest, ListVmsArgs, PromptGetParams, ResourceReadParams, RpcId,
    ToolCallParams,
};
pub use response::{
    JsonRpcError, JsonRpcResponse, McpError, McpErrorCode, McpErrorResponse, ToolResult,
    ToolResultContent,
};
