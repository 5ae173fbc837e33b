//! Network lyrics sources.
//!
//! Each provider performs a two-stage lookup: a structured search call that
//! maps (artist, title) to a page locator, then a single HTML page fetch that
//! extracts the lyrics text. A provider never retries and never makes the
//! page call when the search stage already came back empty.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProviderError;

pub mod genius;
pub mod lyricwiki;

/// One external lyrics source. Implementations hold no mutable state after
/// construction, so a single instance may serve concurrent lookups.
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Resolves lyrics for a song: exactly one search call, at most one page
    /// fetch. `Ok(None)` means this source legitimately has nothing. Errors
    /// carry the failure kind for logging; the resolver collapses them to
    /// absence and moves on to the next source.
    async fn resolve(&self, artist: &str, title: &str)
        -> Result<Option<String>, ProviderError>;
}

/// Per-call transport bounds shared by all providers.
#[derive(Debug, Clone, Copy)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub read: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        HttpTimeouts {
            connect: Duration::from_secs(15),
            read: Duration::from_secs(10),
        }
    }
}

pub(crate) fn build_client(timeouts: HttpTimeouts) -> reqwest::Client {
    let version = env!("CARGO_PKG_VERSION");
    let user_agent = format!("lyrseek v{}", version);

    reqwest::Client::builder()
        .connect_timeout(timeouts.connect)
        .read_timeout(timeouts.read)
        .user_agent(user_agent)
        .build()
        .expect("Failed to create HTTP client")
}
