//! Tag metadata access for local media files.
//!
//! Supplies the artist/title pair a lookup starts from, the lyrics already
//! embedded in the file (the highest-priority source), and the symmetric
//! write path for persisting resolved lyrics back into the `LYRICS` field.

use std::path::Path;

use anyhow::Result;
use lofty::config::WriteOptions;
use lofty::error::LoftyError;
use lofty::file::TaggedFileExt;
use lofty::read_from_path;
use lofty::tag::{Accessor, ItemKey, TagExt};
use thiserror::Error;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct MediaInfo {
    pub artist: String,
    pub title: String,
    /// Contents of the `LYRICS` tag field, if present.
    pub embedded_lyrics: Option<String>,
}

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Cannot parse the tag info from file: `{0}`. Error: `{1}`")]
    ParseFailed(String, LoftyError),
    #[error("No tag was found in file: `{0}`")]
    TagNotFound(String),
    #[error("No title was found in file: `{0}`")]
    TitleNotFound(String),
    #[error("No artist was found in file: `{0}`")]
    ArtistNotFound(String),
}

impl MediaInfo {
    pub fn read_from(path: &Path) -> Result<MediaInfo> {
        let file_path = path.display().to_string();
        let tagged_file = read_from_path(path)
            .map_err(|err| MediaError::ParseFailed(file_path.clone(), err))?;
        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .ok_or(MediaError::TagNotFound(file_path.clone()))?;

        let title = tag
            .title()
            .ok_or(MediaError::TitleNotFound(file_path.clone()))?
            .to_string();
        let artist = tag
            .artist()
            .ok_or(MediaError::ArtistNotFound(file_path.clone()))?
            .to_string();
        let embedded_lyrics = tag.get_string(&ItemKey::Lyrics).map(|s| s.to_string());

        Ok(MediaInfo {
            artist,
            title,
            embedded_lyrics,
        })
    }
}

/// Writes resolved lyrics into the file's `LYRICS` tag field, replacing any
/// previous value.
pub fn embed_lyrics(path: &Path, lyrics: &str) -> Result<()> {
    let file_path = path.display().to_string();
    let mut tagged_file =
        read_from_path(path).map_err(|err| MediaError::ParseFailed(file_path.clone(), err))?;
    let tag = tagged_file
        .primary_tag_mut()
        .ok_or(MediaError::TagNotFound(file_path.clone()))?;

    tag.insert_text(ItemKey::Lyrics, lyrics.to_string());
    tag.save_to_path(path, WriteOptions::default())?;
    debug!("embedded lyrics into: {}", file_path);

    Ok(())
}
