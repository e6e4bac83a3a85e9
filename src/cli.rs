use clap::Parser;
use std::path::PathBuf;

/// MCP server for the Red Hat Pyxis container catalog
#[derive(Parser, Debug)]
#[command(name = "pyxis-mcp")]
#[command(version)]
#[command(
    about = "MCP server for the Red Hat Pyxis container catalog",
    long_about = "Serves catalog search tools over the Model Context Protocol on stdin/stdout.\n\
                  The API key is read from the PYXIS_API_KEY environment variable."
)]
pub struct Args {
    /// Path to a config file (defaults to ./pyxis-mcp.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pyxis API base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Enable verbose logging (to stderr)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
