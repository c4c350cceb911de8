//! Canopy command line front end.
//!
//! Drives the platform client flows from a terminal: the moderated event
//! calendar, participant registration, waste-bank partner signups,
//! environmental-damage reports, and the community map.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

use config::FileConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Canopy - community environmental-action platform client
#[derive(Parser, Debug)]
#[command(name = "canopy")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./canopy.toml")]
    config: PathBuf,

    /// Override the backend base URL
    #[arg(long)]
    base_url: Option<Url>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tree-planting events: list, moderation, registration
    #[command(subcommand)]
    Events(commands::EventsAction),

    /// Waste-bank partners: list and signup
    #[command(subcommand)]
    Partners(commands::PartnersAction),

    /// Environmental-damage reports: feed and filing
    #[command(subcommand)]
    Reports(commands::ReportsAction),

    /// Community map locations: list and add
    #[command(subcommand)]
    Locations(commands::LocationsAction),

    /// Check that the backend is reachable
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    let mut config = FileConfig::load_or_default(&args.config)?;
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
    }

    match args.command {
        Command::Events(action) => commands::events(&config, action).await,
        Command::Partners(action) => commands::partners(&config, action).await,
        Command::Reports(action) => commands::reports(&config, action).await,
        Command::Locations(action) => commands::locations(&config, action).await,
        Command::Ping => commands::ping(&config).await,
    }
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
