//! MCP server for cloud virtual machines.
//!
//! Exposes VM listing, inspection and lifecycle tools, read-only `vm://`
//! catalog resources and a `vm_query` prompt over JSON-RPC 2.0 stdio
//! transport, backed by the compute REST API.

pub mod compute;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod protocol;
pub mod server;

pub mod schema;
