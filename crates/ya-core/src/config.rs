//! Fixed content settings handed to the services.

/// Words that may not appear anywhere in a comment.
pub const DEFAULT_FORBIDDEN_WORDS: [&str; 2] = ["редиска", "негодяй"];

/// Number of news items on one home page.
pub const DEFAULT_NEWS_PAGE_SIZE: u64 = 10;

/// Comment moderation settings.
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    /// Case-sensitive substrings rejected in comment text.
    pub forbidden_words: Vec<String>,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            forbidden_words: DEFAULT_FORBIDDEN_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }
}

/// News feed settings.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub page_size: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_NEWS_PAGE_SIZE,
        }
    }
}
