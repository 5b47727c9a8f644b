use anyhow::{Context, Result};
use clap::Parser;
use nearby_places_lib::{DetailMode, PlacesConfig};
use nearby_places_mcp::logging::{configure_tracing, LogFormat};
use nearby_places_mcp::transport::{run_server_loop, StdioTransport};
use nearby_places_mcp::McpServerState;

#[derive(Parser, Debug)]
#[command(author, version, about = "MCP server for nearby place search by coordinates")]
struct Cli {
    /// Tracing filter, e.g. `info` or `nearby_places_lib=debug` (overrides RUST_LOG).
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format written to stderr.
    #[arg(long, value_enum, env = "LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Override the Google Maps API base URL.
    #[arg(long)]
    base_url: Option<String>,

    /// How to treat individual place detail failures: `strict` or `lenient`.
    #[arg(long)]
    detail_mode: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may already be populated.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging - MUST write to stderr to avoid stdout protocol corruption
    configure_tracing(cli.log_level.as_deref(), cli.log_format)?;

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = load_config(&cli).context("Failed to load configuration")?;
    tracing::info!(?config, "Configuration loaded");

    let server = McpServerState::new(config).context("Failed to initialize MCP server state")?;

    let transport = StdioTransport::new();
    tracing::info!("Nearby places MCP server running on stdio");
    run_server_loop(transport, server).await
}

fn load_config(cli: &Cli) -> nearby_places_lib::Result<PlacesConfig> {
    let mut config = PlacesConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(mode) = &cli.detail_mode {
        config = config.with_detail_mode(mode.parse::<DetailMode>()?);
    }
    Ok(config)
}
