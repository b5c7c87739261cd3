// ABOUTME: Entry point for the roster binary.
// ABOUTME: Parses CLI flags, loads .env, initializes tracing, and runs the student menu on stdin/stdout.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use roster_console::{Menu, RosterConfig};
use roster_store::RecordManager;

/// Student records manager with flat-file persistence
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Backing file for student records (overrides ROSTER_DATA_FILE)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Do not wait for Enter after each action
    #[arg(long)]
    no_pause: bool,

    /// Do not clear the terminal between menus
    #[arg(long)]
    no_clear: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("roster=info")),
        )
        .init();

    let mut config = RosterConfig::from_env().context("invalid configuration")?;
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }
    if cli.no_pause {
        config.pause = false;
    }
    if cli.no_clear {
        config.clear_screen = false;
    }

    tracing::info!(data_file = %config.data_file.display(), "roster starting up");

    let mut manager = RecordManager::new(config.data_file.clone());
    let stdin = io::stdin();
    let mut menu = Menu::new(
        &mut manager,
        stdin.lock(),
        io::stdout(),
        config.menu_options(),
    );
    menu.run().context("menu terminated")?;

    tracing::info!("roster shutting down");
    Ok(())
}
