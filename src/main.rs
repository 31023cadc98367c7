use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use catalog_gateway::config::load_or_default;
use catalog_gateway::lifecycle::{assemble_default, serve, StartupError};
use catalog_gateway::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "catalog-gateway")]
#[command(about = "Tiered API gateway for the metadata catalog", long_about = None)]
struct Args {
    /// TOML configuration file; built-in defaults when omitted
    #[arg(short, long, env = "CATALOG_GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Validate configuration and route table, then exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Fatal startup error");
            eprintln!("catalog-gateway: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), StartupError> {
    let config = load_or_default(args.config.as_deref())?;
    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?args.config,
        "catalog-gateway starting"
    );

    let dispatcher = assemble_default(&config)?;
    if args.check {
        tracing::info!("Configuration and route table are valid");
        return Ok(());
    }

    serve(config, dispatcher).await?;
    tracing::info!("Shutdown complete");
    Ok(())
}
