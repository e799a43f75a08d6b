//! Application configuration loaded from environment variables.

use std::env;

use ya_core::config::{FeedConfig, ModerationConfig};
use ya_infra::{DatabaseConfig, JwtConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub feed: FeedConfig,
    pub moderation: ModerationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database: None,
            jwt: JwtConfig::default(),
            feed: FeedConfig::default(),
            moderation: ModerationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let feed = env::var("NEWS_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|size| *size > 0)
            .map(|page_size| FeedConfig { page_size })
            .unwrap_or(defaults.feed);

        let moderation = env::var("FORBIDDEN_WORDS")
            .ok()
            .map(|list| ModerationConfig {
                forbidden_words: parse_word_list(&list),
            })
            .unwrap_or(defaults.moderation);

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            feed,
            moderation,
        }
    }
}

/// Comma separated words, blanks dropped.
fn parse_word_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(String::from)
        .collect()
}
