use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Config as AppConfig;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}

pub async fn execute(args: ConfigArgs, config: &AppConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            println!("Current configuration:");
            println!("  genius_api_url: {}", config.genius_api_url);
            println!("  genius_page_url: {}", config.genius_page_url);
            println!(
                "  genius_token: {}",
                if config.genius_token.is_some() {
                    "<set>"
                } else {
                    "<not set>"
                }
            );
            println!("  lyricwiki_api_url: {}", config.lyricwiki_api_url);
            println!("  provider_order: {}", config.provider_order.join(", "));
            println!(
                "  connect_timeout_seconds: {}",
                config.connect_timeout_seconds
            );
            println!("  read_timeout_seconds: {}", config.read_timeout_seconds);
        }
        ConfigCommands::Path => {
            println!("{}", AppConfig::config_path()?.display());
        }
    }

    Ok(())
}
