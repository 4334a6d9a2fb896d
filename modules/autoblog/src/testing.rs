// Test mocks for the pipeline.
//
// One mock per trait boundary:
// - MockSource (TopicSource) — fixed title list or a fetch error
// - MockGenerator (TextGenerator) — separate replies for drafting and the policy check
// - MockClassifier (TextClassifier) — fixed label/score or a classifier error
// - MockPublisher (Publisher) — records every publish call
//
// Plus helpers for building a Pipeline from mocks.

use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;

use ai_client::{AiError, Classification, Message};
use autoblog_common::{AutoblogError, Draft, PublishResult, Title};

use crate::gate::POLICY_RUBRIC;
use crate::pipeline::Pipeline;
use crate::sources::TopicAggregator;
use crate::traits::{Publisher, TextClassifier, TextGenerator, TopicSource};

pub const FALLBACK_TOPIC: &str = "Latest breakthroughs in AI models";

// ---------------------------------------------------------------------------
// MockSource
// ---------------------------------------------------------------------------

pub struct MockSource {
    name: &'static str,
    titles: Option<Vec<String>>,
}

impl MockSource {
    pub fn titles(name: &'static str, titles: &[&str]) -> Self {
        Self {
            name,
            titles: Some(titles.iter().map(|t| t.to_string()).collect()),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self { name, titles: None }
    }
}

#[async_trait]
impl TopicSource for MockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_titles(&self) -> Result<Vec<String>> {
        match &self.titles {
            Some(titles) => Ok(titles.clone()),
            None => bail!("MockSource {}: simulated network failure", self.name),
        }
    }
}

/// Aggregator over three mock sources in the production priority order.
pub fn mock_aggregator(
    reddit: &[&str],
    hacker_news: &[&str],
    news_rss: &[&str],
) -> TopicAggregator {
    let sources: Vec<Box<dyn TopicSource>> = vec![
        Box::new(MockSource::titles("reddit", reddit)),
        Box::new(MockSource::titles("hacker_news", hacker_news)),
        Box::new(MockSource::titles("news_rss", news_rss)),
    ];
    TopicAggregator::new(sources, FALLBACK_TOPIC)
}

// ---------------------------------------------------------------------------
// MockGenerator
// ---------------------------------------------------------------------------

/// Routes policy-check prompts (those carrying the rubric) to the policy
/// reply and everything else to the draft reply. Unset replies fail.
pub struct MockGenerator {
    draft: Option<String>,
    policy: Option<String>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            draft: None,
            policy: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on_draft(mut self, text: &str) -> Self {
        self.draft = Some(text.to_string());
        self
    }

    pub fn on_policy(mut self, text: &str) -> Self {
        self.policy = Some(text.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_user_message(&self) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .and_then(|m| m.last())
            .map(|m| m.content.clone())
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn complete(&self, messages: Vec<Message>) -> ai_client::Result<String> {
        let is_policy = messages.iter().any(|m| m.content.contains(POLICY_RUBRIC));
        self.calls.lock().unwrap().push(messages);

        let reply = if is_policy { &self.policy } else { &self.draft };
        reply.clone().ok_or_else(|| AiError::Api {
            status: 500,
            message: "MockGenerator: no reply configured".to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// MockClassifier
// ---------------------------------------------------------------------------

pub struct MockClassifier {
    reply: std::result::Result<Classification, String>,
    inputs: Mutex<Vec<String>>,
}

impl MockClassifier {
    pub fn returning(label: &str, score: f32) -> Self {
        Self {
            reply: Ok(Classification {
                label: label.to_string(),
                score,
            }),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }

    pub fn last_input(&self) -> Option<String> {
        self.inputs.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextClassifier for MockClassifier {
    async fn classify(&self, text: &str) -> ai_client::Result<Classification> {
        self.inputs.lock().unwrap().push(text.to_string());
        self.reply.clone().map_err(|message| AiError::Api {
            status: 503,
            message,
        })
    }
}

// ---------------------------------------------------------------------------
// MockPublisher
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PublishCall {
    pub title: String,
    pub content: String,
}

pub struct MockPublisher {
    fail: bool,
    calls: Mutex<Vec<PublishCall>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<PublishCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    async fn publish(
        &self,
        title: &Title,
        content: &Draft,
    ) -> std::result::Result<PublishResult, AutoblogError> {
        self.calls.lock().unwrap().push(PublishCall {
            title: title.as_str().to_string(),
            content: content.as_str().to_string(),
        });

        if self.fail {
            return Err(AutoblogError::Publish(
                "MockPublisher: API error (status 401)".to_string(),
            ));
        }

        Ok(PublishResult {
            status: 201,
            success: true,
            post_id: Some(1),
            link: Some("https://blog.example/?p=1".to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Pipeline helpers
// ---------------------------------------------------------------------------

/// Mocks wired into a pipeline, kept around for assertions.
pub struct MockWorld {
    pub generator: Arc<MockGenerator>,
    pub classifier: Arc<MockClassifier>,
    pub publisher: Arc<MockPublisher>,
}

impl MockWorld {
    pub fn new(
        generator: MockGenerator,
        classifier: MockClassifier,
        publisher: MockPublisher,
    ) -> Self {
        Self {
            generator: Arc::new(generator),
            classifier: Arc::new(classifier),
            publisher: Arc::new(publisher),
        }
    }

    pub fn pipeline(&self, aggregator: TopicAggregator) -> Pipeline {
        Pipeline::new(
            aggregator,
            self.generator.clone(),
            self.classifier.clone(),
            self.publisher.clone(),
        )
    }
}
