//! Names, descriptions and input schemas of the published tools.

use serde::Serialize;
use serde_json::{json, Value};

/// One entry of the `tools/list` answer
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Tool names, in the order they are listed
pub const TOOL_NAMES: [&str; 8] = [
    "search_images",
    "get_image_details",
    "get_image_vulnerabilities",
    "search_certification_projects",
    "get_certification_project_details",
    "search_operators",
    "get_operator_details",
    "search_repositories",
];

fn string_property(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn max_results_property(default: i64) -> Value {
    json!({
        "type": "integer",
        "description": "Maximum number of results to return (1-100)",
        "default": default,
        "minimum": 1,
        "maximum": 100
    })
}

fn object_schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

pub fn tool_descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "search_images",
            description: "Search for container images in the Red Hat catalog",
            input_schema: object_schema(
                json!({
                    "query": string_property("Search query for image names/repositories"),
                    "architecture": string_property("Filter by architecture (e.g., amd64, arm64)"),
                    "registry": string_property("Filter by registry (e.g., registry.redhat.io)"),
                    "certified": {
                        "type": "boolean",
                        "description": "Only return certified images",
                        "default": false
                    },
                    "max_results": max_results_property(20),
                }),
                &[],
            ),
        },
        ToolDescriptor {
            name: "get_image_details",
            description: "Get detailed information about a specific container image",
            input_schema: object_schema(
                json!({ "image_id": string_property("The container image ID") }),
                &["image_id"],
            ),
        },
        ToolDescriptor {
            name: "get_image_vulnerabilities",
            description: "Get security vulnerabilities for a container image",
            input_schema: object_schema(
                json!({
                    "image_id": string_property("The container image ID"),
                    "max_results": max_results_property(50),
                }),
                &["image_id"],
            ),
        },
        ToolDescriptor {
            name: "search_certification_projects",
            description: "Search for certification projects in the Red Hat catalog",
            input_schema: object_schema(
                json!({
                    "query": string_property("Search query for project names"),
                    "status": string_property("Filter by certification status"),
                    "max_results": max_results_property(20),
                }),
                &[],
            ),
        },
        ToolDescriptor {
            name: "get_certification_project_details",
            description: "Get detailed information about a certification project",
            input_schema: object_schema(
                json!({ "project_id": string_property("The certification project ID") }),
                &["project_id"],
            ),
        },
        ToolDescriptor {
            name: "search_operators",
            description: "Search for operator bundles in the Red Hat catalog",
            input_schema: object_schema(
                json!({
                    "query": string_property("Search query for operator bundle paths"),
                    "package": string_property("Filter by operator package name"),
                    "max_results": max_results_property(20),
                }),
                &[],
            ),
        },
        ToolDescriptor {
            name: "get_operator_details",
            description: "Get detailed information about an operator bundle",
            input_schema: object_schema(
                json!({ "operator_id": string_property("The operator bundle ID") }),
                &["operator_id"],
            ),
        },
        ToolDescriptor {
            name: "search_repositories",
            description: "Search for container repositories in the Red Hat catalog",
            input_schema: object_schema(
                json!({
                    "query": string_property("Search query for repository names"),
                    "registry": string_property("Filter by registry"),
                    "max_results": max_results_property(20),
                }),
                &[],
            ),
        },
    ]
}
