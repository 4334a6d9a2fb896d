// Trait seams for every external collaborator of the pipeline.
//
// TopicSource   — one trending-topic feed
// TextGenerator — chat completion service (drafting + policy self-check)
// TextClassifier — AI-authorship detector
// Publisher     — content-management endpoint
//
// Production impls wrap the ai-client / wordpress-client crates; the
// `testing` module provides in-memory mocks.

use anyhow::Result;
use async_trait::async_trait;

use ai_client::{Classification, HuggingFaceClassifier, Message, OpenRouter};
use autoblog_common::{AutoblogError, Draft, PublishResult, Title};

// ---------------------------------------------------------------------------
// TopicSource
// ---------------------------------------------------------------------------

#[async_trait]
pub trait TopicSource: Send + Sync {
    /// Short stable name used in logs.
    fn name(&self) -> &'static str;

    /// Candidate topic titles, best first.
    async fn fetch_titles(&self) -> Result<Vec<String>>;
}

// ---------------------------------------------------------------------------
// TextGenerator
// ---------------------------------------------------------------------------

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, messages: Vec<Message>) -> ai_client::Result<String>;
}

#[async_trait]
impl TextGenerator for OpenRouter {
    async fn complete(&self, messages: Vec<Message>) -> ai_client::Result<String> {
        self.chat(messages).await
    }
}

// ---------------------------------------------------------------------------
// TextClassifier
// ---------------------------------------------------------------------------

#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Top label and its confidence for `text`.
    async fn classify(&self, text: &str) -> ai_client::Result<Classification>;
}

#[async_trait]
impl TextClassifier for HuggingFaceClassifier {
    async fn classify(&self, text: &str) -> ai_client::Result<Classification> {
        HuggingFaceClassifier::classify(self, text).await
    }
}

// ---------------------------------------------------------------------------
// Publisher
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, title: &Title, content: &Draft)
        -> Result<PublishResult, AutoblogError>;
}
