/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (e.g., the MCP
/// server) use to interact with the application core.
pub mod catalog_tools_port;

pub use catalog_tools_port::CatalogToolsPort;
