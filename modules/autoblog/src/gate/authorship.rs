use std::sync::Arc;

use tracing::{info, warn};

use ai_client::{first_tokens, truncate_to_char_boundary};
use autoblog_common::{AuthorshipVerdict, AutoblogError, Draft, Verdict};

use crate::traits::TextClassifier;

/// Machine-labelled drafts at or above this confidence are blocked.
pub const AUTHORSHIP_THRESHOLD: f32 = 0.6;

/// Classifier input is the first 512 whitespace tokens of the draft.
pub const CLASSIFIER_MAX_TOKENS: usize = 512;
const CLASSIFIER_MAX_BYTES: usize = 8 * 1024;

pub fn is_human_label(label: &str) -> bool {
    matches!(label.trim().to_lowercase().as_str(), "real" | "human")
}

/// FAIL only when the label is machine-generated AND confidence >= 0.6.
/// A low-confidence machine label passes.
pub fn authorship_verdict(label: &str, score: f32) -> Verdict {
    Verdict::from_bool(is_human_label(label) || score < AUTHORSHIP_THRESHOLD)
}

pub struct AuthorshipCheck {
    classifier: Arc<dyn TextClassifier>,
}

impl AuthorshipCheck {
    pub fn new(classifier: Arc<dyn TextClassifier>) -> Self {
        Self { classifier }
    }

    /// Any classifier error resolves to FAIL.
    pub async fn check(&self, draft: &Draft) -> AuthorshipVerdict {
        let input = truncate_to_char_boundary(
            first_tokens(draft.as_str(), CLASSIFIER_MAX_TOKENS),
            CLASSIFIER_MAX_BYTES,
        );

        match self.classifier.classify(input).await {
            Ok(c) => {
                let verdict = authorship_verdict(&c.label, c.score);
                info!(
                    label = %c.label,
                    score = c.score,
                    verdict = ?verdict,
                    "Authorship check complete"
                );
                AuthorshipVerdict {
                    verdict,
                    label: Some(c.label),
                    score: Some(c.score),
                }
            }
            Err(e) => {
                let err = AutoblogError::GateCheck {
                    check: "authorship",
                    message: e.to_string(),
                };
                warn!(error = %err, "Authorship check failed, treating as FAIL");
                AuthorshipVerdict {
                    verdict: Verdict::Fail,
                    label: None,
                    score: None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockClassifier;

    #[test]
    fn machine_label_above_threshold_fails() {
        assert_eq!(authorship_verdict("Fake", 0.82), Verdict::Fail);
        assert_eq!(authorship_verdict("fake", 0.6), Verdict::Fail);
    }

    #[test]
    fn machine_label_below_threshold_passes() {
        assert_eq!(authorship_verdict("Fake", 0.59), Verdict::Pass);
    }

    #[test]
    fn human_label_passes_at_any_score() {
        assert_eq!(authorship_verdict("Real", 0.95), Verdict::Pass);
        assert_eq!(authorship_verdict("HUMAN", 1.0), Verdict::Pass);
        assert_eq!(authorship_verdict("real", 0.1), Verdict::Pass);
    }

    #[test]
    fn nan_score_on_machine_label_fails() {
        assert_eq!(authorship_verdict("Fake", f32::NAN), Verdict::Fail);
    }

    #[tokio::test]
    async fn classifier_error_fails_closed() {
        let check = AuthorshipCheck::new(Arc::new(MockClassifier::failing("model loading")));
        let verdict = check.check(&Draft::new("text")).await;
        assert_eq!(verdict.verdict, Verdict::Fail);
        assert!(verdict.label.is_none());
    }

    #[tokio::test]
    async fn classifier_sees_only_leading_tokens() {
        let body = (0..600).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let classifier = Arc::new(MockClassifier::returning("Real", 0.9));
        let verdict = AuthorshipCheck::new(classifier.clone())
            .check(&Draft::new(body))
            .await;

        assert!(verdict.passed());
        let sent = classifier.last_input().unwrap();
        assert_eq!(sent.split_whitespace().count(), CLASSIFIER_MAX_TOKENS);
        assert!(sent.ends_with("w511"));
    }
}
