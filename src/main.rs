mod cli;
mod config;

use cli::Args;
use config::{discover_config, load_config_from_path, ServerSettings};
use owo_colors::OwoColorize;
use pyxis_mcp::adapters::inbound::mcp::{McpServer, TOOL_NAMES};
use pyxis_mcp::adapters::outbound::network::{LazyPyxisClient, API_KEY_ENV};
use pyxis_mcp::application::use_cases::CatalogToolsUseCase;
use pyxis_mcp::shared::error::ExitCode;
use pyxis_mcp::shared::Result;
use std::path::Path;
use std::process;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    // clap exits with status 2 on invalid arguments
    let args = Args::parse_args();

    let api_key = match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("Error: {} environment variable is required", API_KEY_ENV);
            eprintln!("Please set your Red Hat Pyxis API key before running the server");
            process::exit(ExitCode::MissingCredential.as_i32());
        }
    };

    if let Err(e) = run(args, api_key).await {
        eprintln!("\nAn error occurred:\n");
        eprintln!("{}", e);

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

async fn run(args: Args, api_key: String) -> Result<()> {
    let config_file = match args.config.as_deref() {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(Path::new("."))?,
    };
    let settings = ServerSettings::resolve(&args, config_file.as_ref())?;

    // stdout carries the protocol, so logs go to stderr
    let level = if settings.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    print_banner(&settings);
    info!(
        base_url = %settings.base_url,
        timeout_secs = settings.timeout.as_secs(),
        "Starting pyxis-mcp v{}",
        env!("CARGO_PKG_VERSION")
    );

    let repository = LazyPyxisClient::new(settings.client_settings(api_key));
    let tools = CatalogToolsUseCase::new(repository);
    McpServer::new(tools).run().await
}

fn print_banner(settings: &ServerSettings) {
    eprintln!(
        "{} {}",
        "Starting Red Hat Pyxis MCP Server".bold().green(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    eprintln!("Catalog: {}", settings.base_url);
    eprintln!("Available tools:");
    for name in TOOL_NAMES {
        eprintln!("  - {}", name);
    }
}
