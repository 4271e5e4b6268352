use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use qscan_orchestration::{AnalysisOrchestrator, AnalysisServer, ServiceConfig};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Quantum-advantage code analysis service
#[derive(Parser, Debug)]
#[command(name = "qscan-server", version, about)]
struct Cli {
    /// Service configuration file (YAML); falls back to $QSCAN_CONFIG
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overriding the configuration and $QSCAN_BIND
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; info otherwise
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("qscan v{}", env!("CARGO_PKG_VERSION"));

    let mut config =
        ServiceConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(bind) = cli.bind {
        config
            .override_bind(bind)
            .context("invalid --bind address")?;
    }

    let orchestrator = AnalysisOrchestrator::from_config(&config)
        .context("failed to initialize the analysis pipeline")?;
    let server = AnalysisServer::new(Arc::new(orchestrator), &config.server)?;

    server.run().await?;
    Ok(())
}
