//! Cluster component configuration tool.
//!
//! Creates, checks and normalizes the aggregated `service.json` document
//! that holds the configuration of every cluster component, and can watch
//! it for changes.
//!
//! ```text
//! cluster-config init service.json
//! cluster-config validate service.json
//! cluster-config show service.json
//! cluster-config watch service.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use cluster_config::config::loader::default_config;
use cluster_config::config::{load_config, ConfigWatcher, SharedConfig};
use cluster_config::observability::logging;

#[derive(Parser)]
#[command(name = "cluster-config")]
#[command(about = "Manage cluster component configuration", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set.
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a document with default values for every component
    Init {
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Load and validate a document
    Validate { path: PathBuf },
    /// Print the normalized form of a document
    Show { path: PathBuf },
    /// Reload the document whenever it changes
    Watch { path: PathBuf },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    logging::init(&cli.log_level)?;

    match cli.command {
        Commands::Init { path, force } => {
            if path.exists() && !force {
                return Err(format!("{} already exists, use --force to overwrite", path.display()).into());
            }
            default_config()?.save_to_file(&path)?;
        }
        Commands::Validate { path } => {
            let config = load_config(&path)?;
            for component in config.components() {
                tracing::debug!(?component, "Component configuration");
            }
            println!("{}: ok", path.display());
        }
        Commands::Show { path } => {
            let config = load_config(&path)?;
            println!("{}", String::from_utf8(config.to_json()?)?);
        }
        Commands::Watch { path } => {
            let shared = Arc::new(SharedConfig::new(load_config(&path)?));
            let (watcher, updates) = ConfigWatcher::new(&path);
            let _watcher = watcher.run()?;

            let reloader = shared.clone();
            tokio::spawn(async move {
                reloader.apply_updates(updates).await;
            });

            tokio::signal::ctrl_c().await?;
            tracing::info!("Stopped watching");
        }
    }

    Ok(())
}
