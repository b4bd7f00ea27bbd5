mod cli;
mod core;
mod features;
mod maintenance;
mod modules;
mod server;
mod shared;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::core::config::Config;

fn main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing the logger so RUST_LOG is available.
    // This is the only place the process environment is touched; everything
    // downstream receives an explicit Config value.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    let exit_code = runtime.block_on(async {
        match cli.command {
            None | Some(Command::Serve) => {
                server::run(config, worker_threads).await?;
                Ok::<i32, anyhow::Error>(maintenance::EXIT_OK)
            }
            Some(command) => maintenance::run(command, &config).await,
        }
    })?;

    if exit_code != maintenance::EXIT_OK {
        std::process::exit(exit_code);
    }

    Ok(())
}
