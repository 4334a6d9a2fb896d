use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::traits::TopicSource;

/// Entry titles from a news-search RSS/Atom feed.
pub struct NewsRssSource {
    client: reqwest::Client,
    url: String,
}

impl NewsRssSource {
    pub fn new(client: reqwest::Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl TopicSource for NewsRssSource {
    fn name(&self) -> &'static str {
        "news_rss"
    }

    async fn fetch_titles(&self) -> Result<Vec<String>> {
        let bytes = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("News RSS fetch failed")?
            .error_for_status()
            .context("News RSS returned error status")?
            .bytes()
            .await
            .context("Failed to read News RSS body")?;

        let feed = feed_rs::parser::parse(&bytes[..]).context("Failed to parse RSS/Atom feed")?;

        Ok(feed
            .entries
            .into_iter()
            .filter_map(|entry| entry.title.map(|t| t.content))
            .collect())
    }
}
