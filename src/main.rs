use clap::{Parser, Subcommand};

mod cli;
mod config;
mod core;
mod error;
mod utils;

use cli::*;
use config::Config;
use error::Result;

#[derive(Parser)]
#[command(name = "lyrseek")]
#[command(about = "Resolve plain-text song lyrics from local files and web sources")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up lyrics by artist and title
    Search(search::SearchArgs),

    /// Resolve lyrics for a local media file
    Fetch(fetch::FetchArgs),

    /// Show configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::logging::init_logging(cli.verbose)
        .map_err(error::LyrseekError::Internal)?;

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Search(args) => search::execute(args, &config).await
            .map_err(error::LyrseekError::Internal),
        Commands::Fetch(args) => fetch::execute(args, &config).await
            .map_err(error::LyrseekError::Internal),
        Commands::Config(args) => cli::config::execute(args, &config).await
            .map_err(error::LyrseekError::Internal),
    }
}
