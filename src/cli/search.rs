use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::config::Config;
use crate::core::resolver::{LookupRequest, LyricsResolver};

#[derive(Args)]
pub struct SearchArgs {
    /// Band or artist name
    #[arg(value_name = "ARTIST")]
    artist: String,

    /// Full song title
    #[arg(value_name = "TITLE")]
    title: String,
}

pub async fn execute(args: SearchArgs, config: &Config) -> Result<()> {
    let providers = config.create_providers();
    if providers.is_empty() {
        anyhow::bail!("No lyrics providers are configured");
    }

    info!("🔍 Searching lyrics for: {} - {}", args.artist, args.title);

    let resolver = LyricsResolver::new(providers);
    let request = LookupRequest::new(&args.artist, &args.title);

    match resolver.resolve(&request).await {
        Some(lyrics) => {
            println!("{}", lyrics);
        }
        None => {
            println!("❌ No lyrics found for this track");
        }
    }

    Ok(())
}
