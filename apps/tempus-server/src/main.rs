mod config;
mod logging;
mod signals;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use temporal::api::problem::ProblemTranslator;
use temporal::api::rest::routes;
use temporal::domain::service::EntityTemporalService;
use temporal::infra::{HttpContextResolver, InMemoryEntityRepository};

use crate::config::AppConfig;

/// Tempus - NGSI-LD Temporal API server
#[derive(Parser)]
#[command(name = "tempus-server")]
#[command(about = "Tempus - NGSI-LD Temporal API server")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for the HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config {
        if !Path::new(path).is_file() {
            anyhow::bail!("config file does not exist: {}", path.to_string_lossy());
        }
    }

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_port_override(cli.port)?;

    logging::init(&config.logging, cli.verbose);
    tracing::info!("Tempus server starting");

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", config.server.bind_addr))?;

    let repo = Arc::new(InMemoryEntityRepository::new());
    let resolver = Arc::new(HttpContextResolver::new(Duration::from_secs(
        config.temporal.context_fetch_timeout_secs,
    ))?);
    let service = Arc::new(EntityTemporalService::new(
        repo,
        resolver,
        config.temporal.clone(),
    ));
    let translator = Arc::new(ProblemTranslator::with_defaults());
    let router = routes::router(service, translator);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server bound on {addr}");

    let shutdown = async {
        if let Err(e) = signals::wait_for_shutdown().await {
            tracing::error!(%e, "signal handling failed");
        }
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
