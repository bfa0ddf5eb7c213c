//! boxdeck - terminal dashboard for distrobox sessions

mod commands;

use anyhow::Context;
use boxdeck_config::GlobalConfig;
use boxdeck_core::{Inventory, LifecycleController, MembershipPolicy};
use boxdeck_tui::{App, ViewConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "boxdeck")]
#[command(author, version, about = "Terminal dashboard for distrobox sessions", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file (the dashboard otherwise discards them)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current sessions and exit
    List {
        /// Show every container, not only distrobox sessions
        #[arg(long)]
        all: bool,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    let config = match &cli.config {
        Some(path) => GlobalConfig::load_from(path)?,
        None => match GlobalConfig::config_path() {
            Ok(path) => GlobalConfig::load_from(&path)?,
            Err(e) => {
                tracing::debug!("{}, using default configuration", e);
                GlobalConfig::default()
            }
        },
    };

    match cli.command {
        Some(Commands::Config) => {
            let path = cli.config.clone().or_else(|| GlobalConfig::config_path().ok());
            commands::config(&config, path.as_deref())?;
        }
        Some(Commands::List { all }) => {
            let inventory = connect_inventory(&config).await?;
            commands::list(&inventory, all).await?;
        }
        None => {
            let inventory = connect_inventory(&config).await?;
            let app = App::new(
                inventory,
                LifecycleController::new(config.lifecycle.wrapper.as_str()),
                ViewConfig::from_config(&config.ui),
            );
            boxdeck_tui::run(app).await?;
        }
    }

    Ok(())
}

/// Locate the runtime and build the inventory over it
async fn connect_inventory(config: &GlobalConfig) -> anyhow::Result<Inventory> {
    let runtime = boxdeck_provider::connect_default_runtime().await?;
    Ok(Inventory::new(
        Arc::new(runtime),
        MembershipPolicy::from_config(&config.inventory),
    ))
}

/// Logs go to `--log-file` when given, otherwise to stderr for one-shot
/// commands. The dashboard owns the terminal, so without a log file it
/// installs no subscriber at all.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    if let Some(path) = &cli.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else if cli.command.is_some() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}
