mod client;
pub(crate) mod types;

use std::time::Duration;

use crate::error::{AiError, Result};
use crate::message::Message;

use client::OpenRouterClient;
pub use client::OPENROUTER_API_URL;

// =============================================================================
// OpenRouter
// =============================================================================

/// Chat completion client for the OpenRouter API.
#[derive(Clone)]
pub struct OpenRouter {
    client: OpenRouterClient,
    model: String,
    temperature: Option<f32>,
}

impl OpenRouter {
    pub fn new(api_key: &str, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(AiError::Config("OpenRouter API key is empty".to_string()));
        }
        Ok(Self {
            client: OpenRouterClient::new(api_key, timeout)?,
            model: model.into(),
            temperature: None,
        })
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }

    pub fn with_app_name(mut self, name: &str) -> Self {
        self.client = self.client.with_app_name(name);
        self
    }

    pub fn with_site_url(mut self, url: &str) -> Self {
        self.client = self.client.with_site_url(url);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Send `messages` and return the text of the first choice.
    ///
    /// A response without `choices[0].message.content` is a parse error.
    pub async fn chat(&self, messages: Vec<Message>) -> Result<String> {
        let mut request = types::ChatRequest::new(&self.model).messages(messages);
        if let Some(t) = self.temperature {
            request = request.temperature(t);
        }

        let response = self.client.chat(&request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AiError::Parse("no message content in OpenRouter response".to_string()))
    }
}
