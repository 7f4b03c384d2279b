use clap::Parser;
use std::net::IpAddr;
use textgen_service::config::TextgenConfig;
use textgen_service::services::metrics::init_metrics;
use textgen_service::startup::Application;

/// HTTP text generation and analysis backed by Gemini.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Interface to bind (overrides APP__HOST).
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on (overrides APP__PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Verbose logging (overrides APP__DEBUG).
    #[arg(long)]
    debug: bool,

    /// Google API key; falls back to GOOGLE_API_KEY.
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = TextgenConfig::load_with_api_key(cli.api_key).map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    if let Some(host) = cli.host {
        config.common.host = host;
    }
    if let Some(port) = cli.port {
        config.common.port = port;
    }
    config.common.debug |= cli.debug;

    service_core::observability::init_tracing(
        "textgen-service",
        config.common.log_level(),
        config.observability.otlp_endpoint.as_deref(),
    );

    init_metrics();

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start textgen-service: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    app.run_until_stopped().await?;

    Ok(())
}
