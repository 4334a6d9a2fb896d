//! Trending-topic selection across several feeds with a static fallback.

pub mod hacker_news;
pub mod news_rss;
pub mod reddit;

pub use hacker_news::HackerNewsSource;
pub use news_rss::NewsRssSource;
pub use reddit::RedditSource;

use std::time::Duration;

use tracing::{info, warn};

use autoblog_common::{AutoblogError, Config, Topic};

use crate::traits::TopicSource;

const USER_AGENT: &str = concat!("autoblog/", env!("CARGO_PKG_VERSION"));

/// Title keywords that mark a tech-news story as AI-relevant.
/// Matched as lowercase substrings.
pub const AI_KEYWORDS: &[&str] = &[
    "ai",
    "machine learning",
    "artificial",
    "openai",
    "gpt",
    "llm",
    "chatgpt",
    "anthropic",
    "gemini",
    "mistral",
    "llama",
    "neural",
];

pub fn is_ai_relevant(title: &str) -> bool {
    let lower = title.to_lowercase();
    AI_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Shared HTTP client for the feed sources.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, AutoblogError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| AutoblogError::Config(format!("failed to build feed HTTP client: {e}")))
}

/// Queries every source in priority order and picks the first title overall.
pub struct TopicAggregator {
    sources: Vec<Box<dyn TopicSource>>,
    fallback: Topic,
}

impl TopicAggregator {
    pub fn new(sources: Vec<Box<dyn TopicSource>>, fallback: impl Into<String>) -> Self {
        Self {
            sources,
            fallback: Topic::new(fallback),
        }
    }

    /// Reddit, then Hacker News, then the news-search RSS feed.
    pub fn from_config(config: &Config) -> Result<Self, AutoblogError> {
        let http = http_client(config.http_timeout)?;
        let sources: Vec<Box<dyn TopicSource>> = vec![
            Box::new(RedditSource::new(http.clone(), &config.reddit_feed_url)),
            Box::new(HackerNewsSource::new(
                http.clone(),
                &config.hn_api_url,
                config.hn_scan_limit,
            )),
            Box::new(NewsRssSource::new(http, &config.news_rss_url)),
        ];
        Ok(Self::new(sources, config.fallback_topic.clone()))
    }

    pub fn fallback(&self) -> &Topic {
        &self.fallback
    }

    /// Never fails: a broken source contributes nothing, and an empty
    /// concatenation yields the fallback topic.
    pub async fn get_top_topic(&self) -> Topic {
        let mut candidates: Vec<String> = Vec::new();

        for source in &self.sources {
            match source.fetch_titles().await {
                Ok(titles) => {
                    let before = candidates.len();
                    candidates.extend(
                        titles
                            .into_iter()
                            .map(|t| t.trim().to_string())
                            .filter(|t| !t.is_empty()),
                    );
                    info!(
                        source = source.name(),
                        titles = candidates.len() - before,
                        "Topic source fetched"
                    );
                }
                Err(e) => {
                    let err = AutoblogError::SourceFetch {
                        source_name: source.name().to_string(),
                        message: format!("{e:#}"),
                    };
                    warn!(error = %err, "Topic source failed, skipping");
                }
            }
        }

        match candidates.into_iter().next() {
            Some(title) => Topic::new(title),
            None => {
                warn!(fallback = %self.fallback, "All topic sources empty, using fallback");
                self.fallback.clone()
            }
        }
    }
}
