//! Gateway error coordination service
//!
//! Loads configuration, wires the error coordinator to the in-memory pipeline
//! registry and balancer, and serves the admin API.

#![allow(missing_docs)]

use clap::Parser;
use llm_gateway_recovery::config::Config;
use llm_gateway_recovery::server::{AppState, HttpServer};
use llm_gateway_recovery::utils::logging::init_tracing;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "gateway", version, about = "LLM gateway error coordination service")]
struct Cli {
    /// YAML configuration file; the environment is used when omitted
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the admin server host
    #[arg(long)]
    host: Option<String>,

    /// Override the admin server port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path).await,
        None => Config::from_env(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(config.logging()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("Failed to load .env file: {}", e);
        }
    }

    info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let state = AppState::with_reference_collaborators(config);
    let server = HttpServer::new(state).with_address(cli.host, cli.port);

    match server.start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps multi-line messages readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
