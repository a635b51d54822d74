//! GMP Gateway CLI - JSON/HTTP front for the scanner administration daemon

mod http;

use anyhow::Context;
use clap::Parser;
use gmp_gateway::{Gateway, GatewayConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gmp-gateway", version)]
#[command(about = "GMP Gateway - JSON/HTTP front for the scanner administration protocol")]
struct Cli {
    /// Configuration file path (TOML). Environment variables prefixed
    /// `GMP_GATEWAY__` override it.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Serve the HTTP API (default)
    Serve,
    /// Check configuration validity
    Check,
    /// Ask the daemon for its protocol version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GatewayConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let gateway = Gateway::from_config(&config)?;
            http::serve(gateway, &config.server.bind_address()).await?;
        }
        Commands::Check => {
            config.validate()?;
            println!(
                "Configuration OK: {} as {}, listening on {}",
                config.connection.socket_path.display(),
                config.credentials.username,
                config.server.bind_address()
            );
        }
        Commands::Version => {
            let gateway = Gateway::from_config(&config)?;
            println!("{}", gateway.version().await?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
