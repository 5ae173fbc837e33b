//! Ordered fallback across lyrics sources.
//!
//! Sources run strictly sequentially: lyrics already embedded in the media
//! file's tags, then the sidecar file, then each network provider in
//! configured priority order. The first non-empty result wins and later
//! sources never run, which keeps the outcome deterministic for a fixed
//! environment. Nothing is cached between lookups and no source is retried.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::core::providers::LyricsProvider;
use crate::core::sidecar;

/// One user-initiated lookup. Created once per request and discarded when
/// resolution finishes.
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub artist: String,
    pub title: String,
    /// Media file the lookup originated from, if any. Enables the sidecar
    /// source.
    pub media_path: Option<PathBuf>,
    /// Lyrics already present in the media file's tag metadata.
    pub embedded_lyrics: Option<String>,
}

impl LookupRequest {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        LookupRequest {
            artist: artist.into(),
            title: title.into(),
            media_path: None,
            embedded_lyrics: None,
        }
    }

    pub fn with_media_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.media_path = Some(path.into());
        self
    }

    pub fn with_embedded_lyrics(mut self, lyrics: impl Into<String>) -> Self {
        self.embedded_lyrics = Some(lyrics.into());
        self
    }
}

pub struct LyricsResolver {
    providers: Vec<Box<dyn LyricsProvider>>,
}

impl LyricsResolver {
    pub fn new(providers: Vec<Box<dyn LyricsProvider>>) -> Self {
        LyricsResolver { providers }
    }

    /// Runs the fallback chain and returns the first non-empty lyrics text,
    /// or `None` once every source is exhausted. Provider failures are
    /// logged and treated exactly like a provider that found nothing.
    pub async fn resolve(&self, request: &LookupRequest) -> Option<String> {
        if let Some(lyrics) = &request.embedded_lyrics {
            if !lyrics.trim().is_empty() {
                debug!("using lyrics embedded in tag metadata");
                return Some(lyrics.clone());
            }
        }

        if let Some(media_path) = &request.media_path {
            if let Some(lyrics) = sidecar::read(media_path) {
                debug!("using lyrics from sidecar file");
                return Some(lyrics);
            }
        }

        for provider in &self.providers {
            debug!("trying provider: {}", provider.name());
            match provider.resolve(&request.artist, &request.title).await {
                Ok(Some(text)) if !text.trim().is_empty() => {
                    info!("provider {} resolved lyrics", provider.name());
                    return Some(text);
                }
                Ok(_) => {
                    debug!("provider {} found nothing", provider.name());
                }
                Err(err) => {
                    // a misbehaving provider and a provider that found
                    // nothing look the same from here on
                    warn!("provider {} failed: {}", provider.name(), err);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::error::ProviderError;

    enum Outcome {
        Text(&'static str),
        Nothing,
        Fail,
    }

    struct StubProvider {
        name: &'static str,
        outcome: Outcome,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl LyricsProvider for StubProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn resolve(
            &self,
            _artist: &str,
            _title: &str,
        ) -> Result<Option<String>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                Outcome::Text(text) => Ok(Some(text.to_string())),
                Outcome::Nothing => Ok(None),
                Outcome::Fail => Err(ProviderError::Network("connection refused".to_string())),
            }
        }
    }

    fn stub(name: &'static str, outcome: Outcome) -> (Box<dyn LyricsProvider>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = StubProvider {
            name,
            outcome,
            calls: calls.clone(),
        };
        (Box::new(provider), calls)
    }

    #[tokio::test]
    async fn first_non_empty_provider_wins_and_stops_the_chain() {
        let (a, a_calls) = stub("a", Outcome::Fail);
        let (b, b_calls) = stub("b", Outcome::Text("final lyrics"));
        let (c, c_calls) = stub("c", Outcome::Text("never seen"));

        let resolver = LyricsResolver::new(vec![a, b, c]);
        let request = LookupRequest::new("Artist", "Song");

        assert_eq!(
            resolver.resolve(&request).await,
            Some("final lyrics".to_string())
        );
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
        assert_eq!(b_calls.load(Ordering::SeqCst), 1);
        assert_eq!(c_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn embedded_lyrics_preempt_every_other_source() {
        let (a, a_calls) = stub("a", Outcome::Text("network lyrics"));

        let resolver = LyricsResolver::new(vec![a]);
        let request =
            LookupRequest::new("Artist", "Song").with_embedded_lyrics("tag lyrics");

        assert_eq!(resolver.resolve(&request).await, Some("tag lyrics".to_string()));
        assert_eq!(a_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_embedded_lyrics_fall_through() {
        let (a, a_calls) = stub("a", Outcome::Text("network lyrics"));

        let resolver = LyricsResolver::new(vec![a]);
        let request = LookupRequest::new("Artist", "Song").with_embedded_lyrics("   \n ");

        assert_eq!(
            resolver.resolve(&request).await,
            Some("network lyrics".to_string())
        );
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sidecar_contents_win_over_providers_and_return_unmodified() {
        let dir = tempfile::tempdir().unwrap();
        let media = dir.path().join("song.mp3");
        std::fs::write(dir.path().join("song.lrc"), "verse one\nverse two").unwrap();

        let (a, a_calls) = stub("a", Outcome::Text("network lyrics"));
        let resolver = LyricsResolver::new(vec![a]);
        let request = LookupRequest::new("Artist", "Song").with_media_path(&media);

        assert_eq!(
            resolver.resolve(&request).await,
            Some("verse one\nverse two".to_string())
        );
        assert_eq!(a_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_provider_text_does_not_count_as_a_result() {
        let (a, _) = stub("a", Outcome::Text("  \n"));
        let (b, _) = stub("b", Outcome::Text("real lyrics"));

        let resolver = LyricsResolver::new(vec![a, b]);
        let request = LookupRequest::new("Artist", "Song");

        assert_eq!(
            resolver.resolve(&request).await,
            Some("real lyrics".to_string())
        );
    }

    #[tokio::test]
    async fn exhausting_all_sources_yields_none() {
        let (a, _) = stub("a", Outcome::Fail);
        let (b, _) = stub("b", Outcome::Nothing);

        let resolver = LyricsResolver::new(vec![a, b]);
        let request = LookupRequest::new("Artist", "Song");

        assert_eq!(resolver.resolve(&request).await, None);
    }
}
