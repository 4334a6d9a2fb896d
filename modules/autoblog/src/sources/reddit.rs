use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::traits::TopicSource;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    #[serde(default)]
    title: String,
    #[serde(default)]
    stickied: bool,
}

/// Hot posts from a subreddit's public JSON listing.
pub struct RedditSource {
    client: reqwest::Client,
    url: String,
}

impl RedditSource {
    pub fn new(client: reqwest::Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl TopicSource for RedditSource {
    fn name(&self) -> &'static str {
        "reddit"
    }

    async fn fetch_titles(&self) -> Result<Vec<String>> {
        let listing: Listing = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Reddit listing fetch failed")?
            .error_for_status()
            .context("Reddit listing returned error status")?
            .json()
            .await
            .context("Failed to parse Reddit listing")?;

        // Stickied posts are moderator announcements, not trends.
        Ok(listing
            .data
            .children
            .into_iter()
            .filter(|c| !c.data.stickied)
            .map(|c| c.data.title)
            .collect())
    }
}
