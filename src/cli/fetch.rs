use std::path::Path;

use anyhow::Result;
use clap::Args;
use tracing::{info, warn};

use crate::config::Config;
use crate::core::media::{self, MediaInfo};
use crate::core::resolver::{LookupRequest, LyricsResolver};
use crate::core::sidecar;

#[derive(Args)]
pub struct FetchArgs {
    /// Path to the media file
    #[arg(value_name = "FILE_PATH")]
    file_path: String,

    /// Write the resolved lyrics to the sidecar (.lrc) file
    #[arg(long)]
    save: bool,

    /// Write the resolved lyrics into the file's tag metadata
    #[arg(long)]
    embed: bool,

    /// Skip lyrics already present locally and re-resolve from the network
    #[arg(long)]
    force: bool,
}

pub async fn execute(args: FetchArgs, config: &Config) -> Result<()> {
    let file_path = Path::new(&args.file_path);
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", args.file_path);
    }

    info!("🎵 Reading metadata from: {}", args.file_path);
    let media_info = MediaInfo::read_from(file_path)?;
    info!("🎤 Artist: {}", media_info.artist);
    info!("🎶 Title: {}", media_info.title);

    let mut request = LookupRequest::new(&media_info.artist, &media_info.title);
    if !args.force {
        request = request.with_media_path(file_path);
        if let Some(embedded) = media_info.embedded_lyrics {
            request = request.with_embedded_lyrics(embedded);
        }
    }

    let resolver = LyricsResolver::new(config.create_providers());

    let Some(lyrics) = resolver.resolve(&request).await else {
        println!("❌ No lyrics found for this track");
        return Ok(());
    };

    println!("{}", lyrics);

    if args.save {
        sidecar::write(file_path, &lyrics)?;
        println!("✅ Saved lyrics to {}", sidecar::path_for(file_path).display());
    }

    if args.embed {
        match media::embed_lyrics(file_path, &lyrics) {
            Ok(()) => println!("✅ Embedded lyrics into tag metadata"),
            Err(e) => warn!("⚠️ Failed to embed lyrics: {}", e),
        }
    }

    Ok(())
}
