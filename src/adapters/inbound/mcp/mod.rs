//! MCP stdio front end for the catalog tools.

mod server;
mod tool_catalog;

pub use server::{McpServer, MCP_VERSION};
pub use tool_catalog::{tool_descriptors, ToolDescriptor, TOOL_NAMES};
