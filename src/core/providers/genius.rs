//! Genius lyrics provider.
//!
//! The search API returns a list of hits of mixed types (songs, albums,
//! artists). The first hit of type "song" wins; no artist/title similarity
//! check is performed against the query, so a popular unrelated song can
//! outrank the requested one. That matches the upstream API contract and is
//! kept as-is.

use async_trait::async_trait;
use reqwest::StatusCode;
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{build_client, HttpTimeouts, LyricsProvider};
use crate::core::extract::{extract_text, StripRules};
use crate::error::ProviderError;

/// Endpoints and credentials, supplied at construction so tests can point
/// the provider at fake hosts.
#[derive(Debug, Clone)]
pub struct GeniusConfig {
    /// REST API base, e.g. `https://api.genius.com`
    pub api_url: String,
    /// Base for lyrics pages; relative locators from search resolve against it
    pub page_url: String,
    /// Static bearer token for the search endpoint
    pub token: String,
}

pub struct GeniusProvider {
    client: reqwest::Client,
    config: GeniusConfig,
    container: Selector,
    strip: StripRules,
}

#[derive(Deserialize)]
struct SearchReply {
    response: SearchResponse,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    #[serde(rename = "type")]
    kind: String,
    result: HitResult,
}

#[derive(Deserialize)]
struct HitResult {
    path: String,
}

impl GeniusProvider {
    pub fn new(config: GeniusConfig, timeouts: HttpTimeouts) -> Self {
        GeniusProvider {
            client: build_client(timeouts),
            config,
            container: Selector::parse("div.lyrics p").expect("valid lyrics selector"),
            strip: StripRules::default(),
        }
    }

    /// First stage: one search call mapping (artist, title) to a page locator.
    async fn search(&self, artist: &str, title: &str) -> Result<Option<String>, ProviderError> {
        let url = format!("{}/search", self.config.api_url.trim_end_matches('/'));
        let query = format!("{} {}", artist, title);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query.as_str())])
            .bearer_auth(&self.config.token)
            .send()
            .await?;

        // redirects are already resolved by the transport, anything other
        // than 200 here is an error
        if response.status() != StatusCode::OK {
            return Err(ProviderError::Network(format!(
                "search returned {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        first_song_locator(&body)
    }

    /// Second stage: fetch the lyrics page and extract plain text.
    async fn fetch_page(&self, locator: &str) -> Result<Option<String>, ProviderError> {
        let base = Url::parse(&self.config.page_url)
            .map_err(|err| ProviderError::Format(format!("bad page base URL: {err}")))?;
        let url = base
            .join(locator)
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

/// Walks the hit list in response order and returns the locator of the first
/// hit of kind "song", skipping every other hit type.
fn first_song_locator(body: &str) -> Result<Option<String>, ProviderError> {
    let reply: SearchReply = serde_json::from_str(body)?;
    for hit in reply.response.hits {
        if hit.kind != "song" {
            continue;
        }
        return Ok(Some(hit.result.path));
    }
    Ok(None)
}

#[async_trait]
impl LyricsProvider for GeniusProvider {
    fn name(&self) -> &'static str {
        "genius"
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
                debug!("genius: no song hit for {} - {}", artist, title);
                return Ok(None);
            }
        };

        self.fetch_page(&locator).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_provider() -> GeniusProvider {
        GeniusProvider::new(
            GeniusConfig {
                api_url: "https://api.example.com".to_string(),
                page_url: "https://example.com".to_string(),
                token: "test-token".to_string(),
            },
            HttpTimeouts::default(),
        )
    }

    #[test]
    fn first_song_hit_wins_in_response_order() {
        let body = r#"{"response":{"hits":[
            {"type":"album","result":{"path":"/some-album"}},
            {"type":"song","result":{"path":"/L1"}},
            {"type":"song","result":{"path":"/L2"}}
        ]}}"#;
        assert_eq!(first_song_locator(body).unwrap(), Some("/L1".to_string()));
    }

    #[test]
    fn no_song_hit_means_absent() {
        let body = r#"{"response":{"hits":[
            {"type":"album","result":{"path":"/some-album"}},
            {"type":"artist","result":{"path":"/some-artist"}}
        ]}}"#;
        assert_eq!(first_song_locator(body).unwrap(), None);
    }

    #[test]
    fn empty_hit_list_means_absent() {
        let body = r#"{"response":{"hits":[]}}"#;
        assert_eq!(first_song_locator(body).unwrap(), None);
    }

    #[test]
    fn malformed_reply_is_a_format_error() {
        let err = first_song_locator(r#"{"unexpected":true}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Format(_)));

        let err = first_song_locator("not json at all").unwrap_err();
        assert!(matches!(err, ProviderError::Format(_)));
    }

    #[test]
    fn lyrics_are_taken_from_first_paragraph_in_wrapper() {
        let provider = test_provider();
        let html = r#"<html><body>
            <div class="lyrics"><p>Hello <br>World</p><p>ignored</p></div>
        </body></html>"#;
        assert_eq!(
            provider.extract_from_page(html),
            Some("Hello \nWorld".to_string())
        );
    }

    #[test]
    fn missing_container_yields_none() {
        let provider = test_provider();
        let html = "<html><body><div class=\"redesigned\">nope</div></body></html>";
        assert_eq!(provider.extract_from_page(html), None);
    }
}
