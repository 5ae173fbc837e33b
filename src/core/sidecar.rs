//! Companion lyrics files living next to the media item.
//!
//! A sidecar is a plain UTF-8 text file with the same base name as the media
//! file and an `.lrc` extension. Its contents are treated as an opaque blob;
//! no timestamp parsing happens here.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path of the sidecar file for a media item: same directory, same base
/// name, `.lrc` extension.
pub fn path_for(media_path: &Path) -> PathBuf {
    let mut path = media_path.to_path_buf();
    path.set_extension("lrc");
    path
}

/// Reads the sidecar in full. A missing, unreadable or blank file is not an
/// error; the next lyrics source simply gets its turn.
pub fn read(media_path: &Path) -> Option<String> {
    let lrc_path = path_for(media_path);
    match fs::read_to_string(&lrc_path) {
        Ok(content) if !content.trim().is_empty() => Some(content),
        _ => None,
    }
}

/// Writes resolved lyrics next to the media item, replacing any previous
/// sidecar.
pub fn write(media_path: &Path, lyrics: &str) -> std::io::Result<()> {
    let lrc_path = path_for(media_path);
    fs::write(&lrc_path, lyrics)?;
    debug!("wrote sidecar file: {}", lrc_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_path_swaps_the_extension() {
        assert_eq!(
            path_for(Path::new("/music/album/song.mp3")),
            PathBuf::from("/music/album/song.lrc")
        );
    }

    #[test]
    fn missing_sidecar_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read(&dir.path().join("song.flac")), None);
    }

    #[test]
    fn blank_sidecar_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let media = dir.path().join("song.flac");
        fs::write(dir.path().join("song.lrc"), "  \n \n").unwrap();
        assert_eq!(read(&media), None);
    }

    #[test]
    fn contents_round_trip_unmodified() {
        let dir = tempfile::tempdir().unwrap();
        let media = dir.path().join("song.ogg");
        write(&media, "verse one\nverse two").unwrap();
        assert_eq!(read(&media), Some("verse one\nverse two".to_string()));
    }
}
