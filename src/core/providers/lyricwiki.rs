//! LyricWiki lyrics provider.
//!
//! Licensing keeps the full text out of the API reply, so retrieval is two
//! steps: a `getSong` call that answers with a single record pointing at the
//! wiki page, then a fetch of that page. An empty `page_id` in the record
//! means the page was never created and the lookup stops right there. The
//! API may compress its reply; the transport decompresses it transparently.

use async_trait::async_trait;
use reqwest::StatusCode;
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{build_client, HttpTimeouts, LyricsProvider};
use crate::core::extract::{extract_text, StripRules};
use crate::error::ProviderError;

#[derive(Debug, Clone)]
pub struct LyricWikiConfig {
    /// `getSong` API endpoint, e.g. `https://lyrics.fandom.com/api.php`
    pub api_url: String,
}

pub struct LyricWikiProvider {
    client: reqwest::Client,
    config: LyricWikiConfig,
    container: Selector,
    strip: StripRules,
}

#[derive(Deserialize)]
struct SongReply {
    #[serde(default)]
    page_id: String,
    url: Option<String>,
}

impl LyricWikiProvider {
    pub fn new(config: LyricWikiConfig, timeouts: HttpTimeouts) -> Self {
        LyricWikiProvider {
            client: build_client(timeouts),
            config,
            container: Selector::parse("div.lyricbox").expect("valid lyricbox selector"),
            // rtMatcher is the "did you mean" banner, lyricsbreak the mid-text
            // ad marker; both ship inside the lyrics box
            strip: StripRules::new(&["script"], &["rtMatcher", "lyricsbreak"]),
        }
    }

    /// First stage: `getSong` call answering with a single page record.
    async fn search(&self, artist: &str, title: &str) -> Result<Option<String>, ProviderError> {
        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("func", "getSong"),
                ("fmt", "realjson"),
                ("artist", artist),
                ("song", title),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(ProviderError::Network(format!(
                "getSong returned {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        song_page_locator(&body)
    }

    /// Second stage: fetch the wiki page the record points at. The locator is
    /// an absolute URL on a host independent from the API host.
    async fn fetch_page(&self, locator: &str) -> Result<Option<String>, ProviderError> {
        let url = Url::parse(locator)
            .map_err(|err| ProviderError::Format(format!("bad page locator: {err}")))?;

        let response = self.client.get(url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(ProviderError::Network(format!(
                "page fetch returned {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        match self.extract_from_page(&body) {
            Some(text) => Ok(Some(text)),
            None => Err(ProviderError::Parse),
        }
    }

    fn extract_from_page(&self, html: &str) -> Option<String> {
        let page = Html::parse_document(html);
        let container = page.select(&self.container).next()?;
        Some(extract_text(container, &self.strip))
    }
}

/// Interprets the single-record `getSong` answer. An empty or absent
/// `page_id` denotes "page not created": the stage reports absence without
/// even looking at the `url` field.
fn song_page_locator(body: &str) -> Result<Option<String>, ProviderError> {
    let reply: SongReply = serde_json::from_str(body)?;
    if reply.page_id.is_empty() {
        return Ok(None);
    }
    match reply.url {
        Some(url) => Ok(Some(url)),
        None => Err(ProviderError::Format(
            "getSong answer has a page_id but no url".to_string(),
        )),
    }
}

#[async_trait]
impl LyricsProvider for LyricWikiProvider {
    fn name(&self) -> &'static str {
        "lyricwiki"
    }

    async fn resolve(
        &self,
        artist: &str,
        title: &str,
    ) -> Result<Option<String>, ProviderError> {
        let locator = match self.search(artist, title).await? {
            // an empty locator means "not found", never a page to fetch
            Some(locator) if !locator.is_empty() => locator,
            _ => {
                debug!("lyricwiki: no page for {} - {}", artist, title);
                return Ok(None);
            }
        };

        self.fetch_page(&locator).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_provider() -> LyricWikiProvider {
        LyricWikiProvider::new(
            LyricWikiConfig {
                api_url: "https://api.example.com/api.php".to_string(),
            },
            HttpTimeouts::default(),
        )
    }

    #[test]
    fn empty_page_id_means_absent_without_reading_url() {
        let body = r#"{"page_id":"","url":"http://x"}"#;
        assert_eq!(song_page_locator(body).unwrap(), None);
    }

    #[test]
    fn missing_page_id_means_absent() {
        let body = r#"{"url":"http://x"}"#;
        assert_eq!(song_page_locator(body).unwrap(), None);
    }

    #[test]
    fn created_page_yields_its_url() {
        let body = r#"{"page_id":"12345","url":"https://lyrics.example.com/wiki/Artist:Song"}"#;
        assert_eq!(
            song_page_locator(body).unwrap(),
            Some("https://lyrics.example.com/wiki/Artist:Song".to_string())
        );
    }

    #[test]
    fn page_id_without_url_is_a_format_error() {
        let err = song_page_locator(r#"{"page_id":"12345"}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Format(_)));
    }

    #[test]
    fn malformed_reply_is_a_format_error() {
        let err = song_page_locator("<html>surprise</html>").unwrap_err();
        assert!(matches!(err, ProviderError::Format(_)));
    }

    #[test]
    fn banners_and_scripts_are_stripped_from_the_lyrics_box() {
        let provider = test_provider();
        let html = r#"<html><body><div class="lyricbox">
Line1<br>Line2<div class="rtMatcher">Did you mean?</div><div class="lyricsbreak"></div><script>evil()</script></div></body></html>"#;
        assert_eq!(
            provider.extract_from_page(html),
            Some("\nLine1\nLine2".to_string())
        );
    }

    #[test]
    fn missing_lyrics_box_yields_none() {
        let provider = test_provider();
        let html = "<html><body><p>page moved</p></body></html>";
        assert_eq!(provider.extract_from_page(html), None);
    }
}
