mod commands;
mod progress;
mod summary;
mod trace;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "panoscope", about = "Orientation-driven panorama viewer tools")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a catalog or show one panorama's tile grid and points
    Info(commands::info::InfoArgs),
    /// Print the default viewer config as TOML
    Config(commands::config::ConfigArgs),
    /// Replay a recorded sensor trace through a viewer session
    Replay(commands::replay::ReplayArgs),
    /// Export every tile of a panorama's extended grid
    Tiles(commands::tiles::TilesArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Replay(args) => commands::replay::run(args),
        Commands::Tiles(args) => commands::tiles::run(args),
    }
}
