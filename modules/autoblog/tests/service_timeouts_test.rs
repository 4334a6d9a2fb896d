//! Slow external services against the real clients.
//!
//! A response that arrives after the client timeout must be handled exactly
//! like a broken response from the same service.
//!
//! Run with: cargo test -p autoblog --test service_timeouts_test

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ai_client::{HuggingFaceClassifier, OpenRouter};
use autoblog::gate::AuthorshipCheck;
use autoblog::generator::ContentGenerator;
use autoblog_common::{AutoblogError, Draft, Topic, Verdict};

const SHORT_TIMEOUT: Duration = Duration::from_millis(300);
const SLOW: Duration = Duration::from_secs(3);

#[tokio::test]
async fn slow_classifier_fails_the_authorship_check() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/roberta-base-openai-detector"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([[{"label": "Real", "score": 0.99}]]))
                .set_delay(SLOW),
        )
        .mount(&server)
        .await;

    let classifier =
        HuggingFaceClassifier::new("roberta-base-openai-detector", None, SHORT_TIMEOUT)
            .unwrap()
            .with_base_url(&server.uri());
    let check = AuthorshipCheck::new(Arc::new(classifier));

    let verdict = check.check(&Draft::new("# Title\n\nHand-written prose.")).await;

    assert_eq!(verdict.verdict, Verdict::Fail);
    assert_eq!(verdict.label, None);
    assert_eq!(verdict.score, None);
}

#[tokio::test]
async fn slow_generation_service_is_a_generation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": "# Late draft"}}]
                }))
                .set_delay(SLOW),
        )
        .mount(&server)
        .await;

    let llm = OpenRouter::new("or-test", "mistralai/mixtral-8x7b-instruct", SHORT_TIMEOUT)
        .unwrap()
        .with_base_url(&server.uri());
    let generator = ContentGenerator::new(Arc::new(llm));

    let err = generator
        .generate_blog(&Topic::new("AI boosts coding"))
        .await
        .unwrap_err();

    assert!(matches!(err, AutoblogError::Generation(_)));
    assert!(err.is_fatal());
}
