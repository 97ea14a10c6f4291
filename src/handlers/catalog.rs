//! Static descriptions of everything the server advertises: tools, resources
//! and prompts.

use serde::Serialize;
use serde_json::{json, Value};

use crate::compute::{Collection, InstanceAction};

/// Every tool the server exposes through `tools/call`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ListVms,
    GetVm,
    CreateInstance,
    DeleteInstance,
    Action(InstanceAction),
}

impl Tool {
    pub const ALL: [Tool; 8] = [
        Tool::ListVms,
        Tool::GetVm,
        Tool::CreateInstance,
        Tool::DeleteInstance,
        Tool::Action(InstanceAction::Start),
        Tool::Action(InstanceAction::Stop),
        Tool::Action(InstanceAction::Reboot),
        Tool::Action(InstanceAction::Suspend),
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ListVms => "list_vms",
            Self::GetVm => "get_vm",
            Self::CreateInstance => "create_instance",
            Self::DeleteInstance => "delete_instance",
            Self::Action(InstanceAction::Start) => "start_instance",
            Self::Action(InstanceAction::Stop) => "stop_instance",
            Self::Action(InstanceAction::Reboot) => "reboot_instance",
            Self::Action(InstanceAction::Suspend) => "suspend_instance",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::ListVms => "List virtual machines in the current tenant with pagination info",
            Self::GetVm => "Get details of a specific virtual machine",
            Self::CreateInstance => "Create a new virtual machine instance",
            Self::DeleteInstance => "Delete a virtual machine instance by id",
            Self::Action(InstanceAction::Start) => "Start a virtual machine instance by id",
            Self::Action(InstanceAction::Stop) => "Stop a virtual machine instance by id",
            Self::Action(InstanceAction::Reboot) => "Reboot a virtual machine instance by id",
            Self::Action(InstanceAction::Suspend) => "Suspend a virtual machine instance by id",
        }
    }

    /// JSON Schema advertised in `tools/list` and enforced before a call runs.
    pub fn input_schema(self) -> Value {
        match self {
            Self::ListVms => json!({
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of results to return (default 50)",
                        "minimum": 1
                    },
                    "offset": {
                        "type": "integer",
                        "description": "Number of results to skip (default 0)",
                        "minimum": 0
                    },
                    "sort": {
                        "type": "string",
                        "description": "Sort order (default created_at:asc)",
                        "minLength": 1
                    },
                    "expand": expand_schema(),
                    "tenant_id": tenant_schema()
                }
            }),
            Self::GetVm => json!({
                "type": "object",
                "additionalProperties": false,
                "required": ["vm_id"],
                "properties": {
                    "vm_id": id_schema("ID of the virtual machine"),
                    "expand": expand_schema(),
                    "tenant_id": tenant_schema()
                }
            }),
            Self::CreateInstance => json!({
                "type": "object",
                "additionalProperties": false,
                "required": ["body"],
                "properties": {
                    "body": {
                        "type": "object",
                        "description": "Instance creation payload forwarded to the compute API"
                    },
                    "tenant_id": tenant_schema()
                }
            }),
            Self::DeleteInstance => json!({
                "type": "object",
                "additionalProperties": false,
                "required": ["id"],
                "properties": {
                    "id": id_schema("ID of the instance to delete"),
                    "delete_public_ip": {
                        "type": "boolean",
                        "description": "Also release the instance's public IP (default false)"
                    },
                    "tenant_id": tenant_schema()
                }
            }),
            Self::Action(action) => json!({
                "type": "object",
                "additionalProperties": false,
                "required": ["id"],
                "properties": {
                    "id": id_schema(&format!("ID of the instance to {}", action.path())),
                    "tenant_id": tenant_schema()
                }
            }),
        }
    }
}

fn id_schema(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description,
        "minLength": 1,
        "not": { "enum": [".", ".."] }
    })
}

fn expand_schema() -> Value {
    json!({
        "type": "array",
        "description": "Related fields to expand in the response",
        "items": { "type": "string", "minLength": 1 }
    })
}

fn tenant_schema() -> Value {
    json!({
        "type": "string",
        "description": "Tenant to act on (sent as x-tenant-id)",
        "minLength": 1
    })
}

#[derive(Debug, Serialize)]
struct ToolDescriptor {
    name: &'static str,
    description: &'static str,
    #[serde(rename = "inputSchema")]
    input_schema: Value,
}

/// Result payload for `tools/list`.
pub fn tools_list() -> Value {
    let tools: Vec<ToolDescriptor> = Tool::ALL
        .into_iter()
        .map(|t| ToolDescriptor {
            name: t.name(),
            description: t.description(),
            input_schema: t.input_schema(),
        })
        .collect();
    json!({ "tools": tools })
}

pub const RESOURCE_SCHEME: &str = "vm";

pub fn resource_uri(collection: Collection) -> String {
    format!("{RESOURCE_SCHEME}://{}", collection.path())
}

fn resource_description(collection: Collection) -> &'static str {
    match collection {
        Collection::Instances => "Virtual machine instances of the current tenant",
        Collection::Images => "Images available to the current tenant and region",
        Collection::MachineTypes => "Available machine types",
        Collection::Snapshots => "Instance snapshots of the current tenant",
        Collection::Backups => "Instance backups of the current tenant",
    }
}

/// Result payload for `resources/list`.
pub fn resources_list() -> Value {
    let resources: Vec<Value> = Collection::ALL
        .into_iter()
        .map(|c| {
            json!({
                "uri": resource_uri(c),
                "name": c.path(),
                "description": resource_description(c),
                "mimeType": "application/json"
            })
        })
        .collect();
    json!({ "resources": resources })
}

pub const VM_QUERY_PROMPT: &str = "vm_query";

/// Result payload for `prompts/list`.
pub fn prompts_list() -> Value {
    json!({
        "prompts": [
            {
                "name": VM_QUERY_PROMPT,
                "description": "Ask about or operate the tenant's virtual machines",
                "arguments": [
                    {
                        "name": "query",
                        "description": "What to look up or do",
                        "required": true
                    }
                ]
            }
        ]
    })
}
