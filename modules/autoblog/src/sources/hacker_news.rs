use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::is_ai_relevant;
use crate::traits::TopicSource;

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: Option<String>,
}

/// Hacker News top stories, keyword-filtered for AI relevance.
///
/// Two-stage: the id list first, then one item fetch per id. A failing item
/// is skipped; only a failing id list fails the source.
pub struct HackerNewsSource {
    client: reqwest::Client,
    base_url: String,
    scan_limit: usize,
}

impl HackerNewsSource {
    pub fn new(client: reqwest::Client, base_url: &str, scan_limit: usize) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            scan_limit,
        }
    }

    async fn item_title(&self, id: u64) -> Result<Option<String>> {
        let url = format!("{}/item/{}.json", self.base_url, id);
        // Deleted items come back as JSON `null`.
        let item: Option<Item> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(item.and_then(|i| i.title))
    }
}

#[async_trait]
impl TopicSource for HackerNewsSource {
    fn name(&self) -> &'static str {
        "hacker_news"
    }

    async fn fetch_titles(&self) -> Result<Vec<String>> {
        let url = format!("{}/topstories.json", self.base_url);
        let ids: Vec<u64> = self
            .client
            .get(&url)
            .send()
            .await
            .context("Hacker News top stories fetch failed")?
            .error_for_status()
            .context("Hacker News top stories returned error status")?
            .json()
            .await
            .context("Failed to parse Hacker News top stories")?;

        let mut titles = Vec::new();
        for id in ids.into_iter().take(self.scan_limit) {
            match self.item_title(id).await {
                Ok(Some(title)) if is_ai_relevant(&title) => titles.push(title),
                Ok(_) => {}
                Err(e) => warn!(id, error = %e, "Failed to fetch Hacker News item"),
            }
        }

        debug!(relevant = titles.len(), "Hacker News scan complete");
        Ok(titles)
    }
}
