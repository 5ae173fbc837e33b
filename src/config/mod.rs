use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::providers::genius::{GeniusConfig, GeniusProvider};
use crate::core::providers::lyricwiki::{LyricWikiConfig, LyricWikiProvider};
use crate::core::providers::{HttpTimeouts, LyricsProvider};

fn default_provider_order() -> Vec<String> {
    vec!["genius".to_string(), "lyricwiki".to_string()]
}

fn default_connect_timeout_seconds() -> u64 {
    15
}

fn default_read_timeout_seconds() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Genius REST API base URL
    pub genius_api_url: String,

    /// Base URL for Genius lyrics pages (relative locators resolve against it)
    pub genius_page_url: String,

    /// Genius API bearer token; the Genius provider is skipped without one
    pub genius_token: Option<String>,

    /// LyricWiki getSong API endpoint
    pub lyricwiki_api_url: String,

    /// Network providers, tried in this order
    #[serde(default = "default_provider_order")]
    pub provider_order: Vec<String>,

    /// Connect timeout for provider HTTP calls (seconds)
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// Read timeout for provider HTTP calls (seconds)
    #[serde(default = "default_read_timeout_seconds")]
    pub read_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            genius_api_url: "https://api.genius.com".to_string(),
            genius_page_url: "https://genius.com".to_string(),
            genius_token: None,
            lyricwiki_api_url: "https://lyrics.fandom.com/api.php".to_string(),
            provider_order: default_provider_order(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            read_timeout_seconds: default_read_timeout_seconds(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Try to load .env file if it exists (for development setups)
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        let config_file = if let Some(path) = config_path {
            PathBuf::from(path)
        } else {
            Self::default_config_path()?
        };

        if config_file.exists() {
            let content = fs::read_to_string(&config_file)?;
            let file_config: Config = toml::from_str(&content)?;
            config = file_config;
        }

        // Environment variables have the highest priority
        config.load_from_env();

        // Save config file if it doesn't exist yet
        if !config_file.exists() {
            if let Some(parent) = config_file.parent() {
                fs::create_dir_all(parent)?;
            }
            config.save(&config_file)?;
        }

        Ok(config)
    }

    /// Load configuration overrides from environment variables
    fn load_from_env(&mut self) {
        if let Ok(api_url) = env::var("LYRSEEK_GENIUS_API_URL") {
            self.genius_api_url = api_url;
        }

        if let Ok(page_url) = env::var("LYRSEEK_GENIUS_PAGE_URL") {
            self.genius_page_url = page_url;
        }

        if let Ok(token) = env::var("LYRSEEK_GENIUS_TOKEN") {
            let trimmed = token.trim().to_string();
            if !trimmed.is_empty() {
                self.genius_token = Some(trimmed);
            }
        }

        if let Ok(api_url) = env::var("LYRSEEK_LYRICWIKI_API_URL") {
            self.lyricwiki_api_url = api_url;
        }

        if let Ok(order) = env::var("LYRSEEK_PROVIDER_ORDER") {
            let parsed = parse_provider_order(&order);
            if !parsed.is_empty() {
                self.provider_order = parsed;
            }
        }

        if let Ok(connect) = env::var("LYRSEEK_CONNECT_TIMEOUT_SECONDS") {
            if let Ok(value) = connect.parse::<u64>() {
                self.connect_timeout_seconds = value;
            }
        }

        if let Ok(read) = env::var("LYRSEEK_READ_TIMEOUT_SECONDS") {
            if let Ok(value) = read.parse::<u64>() {
                self.read_timeout_seconds = value;
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn default_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("net", "lyrseek", "lyrseek")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::default_config_path()
    }

    /// Builds the network providers in configured priority order. Unknown
    /// names are skipped with a warning, as is Genius when no token is set.
    pub fn create_providers(&self) -> Vec<Box<dyn LyricsProvider>> {
        let timeouts = HttpTimeouts {
            connect: Duration::from_secs(self.connect_timeout_seconds),
            read: Duration::from_secs(self.read_timeout_seconds),
        };

        let mut providers: Vec<Box<dyn LyricsProvider>> = Vec::new();
        for name in &self.provider_order {
            match name.as_str() {
                "genius" => match &self.genius_token {
                    Some(token) if !token.trim().is_empty() => {
                        providers.push(Box::new(GeniusProvider::new(
                            GeniusConfig {
                                api_url: self.genius_api_url.clone(),
                                page_url: self.genius_page_url.clone(),
                                token: token.clone(),
                            },
                            timeouts,
                        )));
                    }
                    _ => {
                        warn!("Skipping genius provider: no API token configured");
                    }
                },
                "lyricwiki" => {
                    providers.push(Box::new(LyricWikiProvider::new(
                        LyricWikiConfig {
                            api_url: self.lyricwiki_api_url.clone(),
                        },
                        timeouts,
                    )));
                }
                other => {
                    warn!("Skipping unknown provider in provider_order: {}", other);
                }
            }
        }

        providers
    }
}

fn parse_provider_order(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_order_parses_from_comma_separated_list() {
        assert_eq!(
            parse_provider_order("lyricwiki, genius"),
            vec!["lyricwiki".to_string(), "genius".to_string()]
        );
        assert_eq!(parse_provider_order(" , ,"), Vec::<String>::new());
    }

    #[test]
    fn genius_without_token_is_skipped() {
        let config = Config::default();
        let providers = config.create_providers();
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].name(), "lyricwiki");
    }

    #[test]
    fn provider_order_is_respected() {
        let config = Config {
            genius_token: Some("token".to_string()),
            provider_order: vec!["lyricwiki".to_string(), "genius".to_string()],
            ..Config::default()
        };
        let providers = config.create_providers();
        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["lyricwiki", "genius"]);
    }

    #[test]
    fn unknown_provider_names_are_skipped() {
        let config = Config {
            provider_order: vec!["musixmatch".to_string(), "lyricwiki".to_string()],
            ..Config::default()
        };
        let providers = config.create_providers();
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].name(), "lyricwiki");
    }
}
