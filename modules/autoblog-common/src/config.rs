use std::env;
use std::time::Duration;

use tracing::info;

use crate::error::AutoblogError;

pub const DEFAULT_MODEL: &str = "mistralai/mixtral-8x7b-instruct";
pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_CLASSIFIER_MODEL: &str = "roberta-base-openai-detector";
pub const DEFAULT_HF_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_FALLBACK_TOPIC: &str = "Latest breakthroughs in AI models";
pub const DEFAULT_REDDIT_FEED_URL: &str = "https://www.reddit.com/r/artificial/hot.json?limit=10";
pub const DEFAULT_HN_API_URL: &str = "https://hacker-news.firebaseio.com/v0";
pub const DEFAULT_NEWS_RSS_URL: &str =
    "https://news.google.com/rss/search?q=artificial+intelligence&hl=en-US&gl=US&ceid=US:en";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HN_SCAN_LIMIT: usize = 30;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Text generation
    pub openrouter_api_key: String,
    pub openrouter_base_url: String,
    pub model: String,

    // Authorship classifier
    pub hf_api_token: Option<String>,
    pub hf_classifier_model: String,
    pub hf_inference_url: String,

    // Publishing
    pub wordpress_url: String,
    pub wordpress_username: String,
    pub wordpress_app_password: String,

    // Topic sources
    pub reddit_feed_url: String,
    pub hn_api_url: String,
    pub hn_scan_limit: usize,
    pub news_rss_url: String,
    pub fallback_topic: String,

    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, AutoblogError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value for a
    /// variable name. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AutoblogError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| {
                AutoblogError::Config(format!("{key} environment variable is required"))
            })
        };
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let http_timeout_secs = parse_or(
            get("AUTOBLOG_HTTP_TIMEOUT_SECS"),
            "AUTOBLOG_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?;
        if http_timeout_secs == 0 {
            return Err(AutoblogError::Config(
                "AUTOBLOG_HTTP_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            openrouter_api_key: required("OPENROUTER_API_KEY")?,
            openrouter_base_url: or_default("OPENROUTER_BASE_URL", DEFAULT_OPENROUTER_URL),
            model: or_default("AUTOBLOG_MODEL", DEFAULT_MODEL),
            hf_api_token: get("HF_API_TOKEN"),
            hf_classifier_model: or_default("HF_CLASSIFIER_MODEL", DEFAULT_CLASSIFIER_MODEL),
            hf_inference_url: or_default("HF_INFERENCE_URL", DEFAULT_HF_INFERENCE_URL),
            wordpress_url: required("WORDPRESS_URL")?,
            wordpress_username: required("WORDPRESS_USERNAME")?,
            wordpress_app_password: required("WORDPRESS_APP_PASSWORD")?,
            reddit_feed_url: or_default("REDDIT_FEED_URL", DEFAULT_REDDIT_FEED_URL),
            hn_api_url: or_default("HN_API_URL", DEFAULT_HN_API_URL),
            hn_scan_limit: parse_or(get("HN_SCAN_LIMIT"), "HN_SCAN_LIMIT", DEFAULT_HN_SCAN_LIMIT)?,
            news_rss_url: or_default("NEWS_RSS_URL", DEFAULT_NEWS_RSS_URL),
            fallback_topic: or_default("AUTOBLOG_FALLBACK_TOPIC", DEFAULT_FALLBACK_TOPIC),
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }

    /// Log the effective configuration with credentials masked.
    pub fn log_redacted(&self) {
        info!(
            model = %self.model,
            openrouter_base_url = %self.openrouter_base_url,
            openrouter_api_key = %redact(&self.openrouter_api_key),
            hf_classifier_model = %self.hf_classifier_model,
            hf_inference_url = %self.hf_inference_url,
            hf_api_token = %self
                .hf_api_token
                .as_deref()
                .map(redact)
                .unwrap_or_else(|| "<unset>".to_string()),
            wordpress_url = %self.wordpress_url,
            wordpress_username = %self.wordpress_username,
            wordpress_app_password = %redact(&self.wordpress_app_password),
            reddit_feed_url = %self.reddit_feed_url,
            hn_api_url = %self.hn_api_url,
            hn_scan_limit = self.hn_scan_limit,
            news_rss_url = %self.news_rss_url,
            fallback_topic = %self.fallback_topic,
            http_timeout_secs = self.http_timeout.as_secs(),
            "Configuration loaded"
        );
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    key: &str,
    default: T,
) -> Result<T, AutoblogError> {
    match raw {
        Some(v) => v
            .parse()
            .map_err(|_| AutoblogError::Config(format!("{key} must be a number, got {v:?}"))),
        None => Ok(default),
    }
}

/// Keep the last four characters of a secret, mask the rest.
fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}
