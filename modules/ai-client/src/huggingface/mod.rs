pub(crate) mod types;

use std::time::Duration;

use tracing::debug;

use crate::error::{AiError, Result};

pub use types::Classification;
use types::{ClassifyOptions, ClassifyRequest, ClassifyResponse};

pub const HF_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";

/// Text-classification client for the Hugging Face inference API.
#[derive(Clone)]
pub struct HuggingFaceClassifier {
    http: reqwest::Client,
    base_url: String,
    model: String,
    token: Option<String>,
}

impl HuggingFaceClassifier {
    pub fn new(model: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: HF_INFERENCE_URL.to_string(),
            model: model.into(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Classify `text` and return the highest-scoring label.
    pub async fn classify(&self, text: &str) -> Result<Classification> {
        let url = format!("{}/{}", self.base_url, self.model);

        debug!(model = %self.model, chars = text.len(), "Hugging Face classify request");

        let body = ClassifyRequest {
            inputs: text,
            options: ClassifyOptions {
                wait_for_model: true,
            },
        };

        let mut request = self.http.post(&url).json(&body);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ClassifyResponse = response.json().await?;
        match parsed.top() {
            Ok(Some(top)) => Ok(top),
            Ok(None) => Err(AiError::Parse("classifier returned no labels".to_string())),
            Err(message) => Err(AiError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn classifier(server: &MockServer, token: Option<&str>) -> HuggingFaceClassifier {
        HuggingFaceClassifier::new(
            "roberta-base-openai-detector",
            token.map(String::from),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url(&server.uri())
    }

    #[tokio::test]
    async fn classify_picks_highest_score_from_nested_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/roberta-base-openai-detector"))
            .and(header("authorization", "Bearer hf-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[
                {"label": "Real", "score": 0.18},
                {"label": "Fake", "score": 0.82}
            ]])))
            .mount(&server)
            .await;

        let top = classifier(&server, Some("hf-test")).classify("text").await.unwrap();
        assert_eq!(top.label, "Fake");
        assert!((top.score - 0.82).abs() < 1e-6);
    }

    #[tokio::test]
    async fn classify_accepts_flat_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/roberta-base-openai-detector"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"label": "Real", "score": 0.95},
                {"label": "Fake", "score": 0.05}
            ])))
            .mount(&server)
            .await;

        let top = classifier(&server, None).classify("text").await.unwrap();
        assert_eq!(top.label, "Real");
    }

    #[tokio::test]
    async fn classify_empty_label_list_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/roberta-base-openai-detector"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let err = classifier(&server, None).classify("text").await.unwrap_err();
        assert!(matches!(err, AiError::Parse(_)));
    }

    #[tokio::test]
    async fn classify_surfaces_loading_model_as_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/roberta-base-openai-detector"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_json(serde_json::json!({"error": "Model is currently loading"})),
            )
            .mount(&server)
            .await;

        let err = classifier(&server, None).classify("text").await.unwrap_err();
        assert!(matches!(err, AiError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn classify_times_out_as_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/roberta-base-openai-detector"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([[{"label": "Real", "score": 0.9}]]))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let slow = HuggingFaceClassifier::new(
            "roberta-base-openai-detector",
            None,
            Duration::from_millis(300),
        )
        .unwrap()
        .with_base_url(&server.uri());

        let err = slow.classify("text").await.unwrap_err();
        assert!(matches!(err, AiError::Network(_)));
    }

    #[test]
    fn inline_error_body_is_reported() {
        let parsed: ClassifyResponse =
            serde_json::from_value(serde_json::json!({"error": "boom"})).unwrap();
        assert_eq!(parsed.top().unwrap_err(), "boom");
    }
}
