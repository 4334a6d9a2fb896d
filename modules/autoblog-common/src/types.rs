use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// --- Topic / Draft / Title ---

/// Subject of one generated article. Source origin is not retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic(String);

impl Topic {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generated article text, exactly as the generation service returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft(String);

impl Draft {
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }
}

/// Long-form date used in post titles, e.g. `October 14, 2026`.
pub const TITLE_DATE_FORMAT: &str = "%B %d, %Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title(String);

impl Title {
    /// `"{topic} - {Month DD, YYYY}"`.
    pub fn for_topic(topic: &Topic, date: NaiveDate) -> Self {
        Self(format!("{} - {}", topic.as_str(), date.format(TITLE_DATE_FORMAT)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Gate verdicts ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn is_pass(self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Result of the originality / content-policy / quality self-check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyVerdict {
    pub verdict: Verdict,
    /// Raw service response. `None` when the check call itself failed.
    pub response: Option<String>,
}

impl PolicyVerdict {
    pub fn passed(&self) -> bool {
        self.verdict.is_pass()
    }
}

/// Result of the AI-authorship classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorshipVerdict {
    pub verdict: Verdict,
    /// Classifier label and confidence. `None` when the classifier failed.
    pub label: Option<String>,
    pub score: Option<f32>,
}

impl AuthorshipVerdict {
    pub fn passed(&self) -> bool {
        self.verdict.is_pass()
    }
}

/// Both sub-verdicts for one draft. Publication requires both to pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateVerdict {
    pub policy: PolicyVerdict,
    pub authorship: AuthorshipVerdict,
}

impl GateVerdict {
    pub fn passed(&self) -> bool {
        self.policy.passed() && self.authorship.passed()
    }
}

// --- Publishing ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResult {
    pub status: u16,
    pub success: bool,
    pub post_id: Option<u64>,
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_appends_long_form_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 4).unwrap();
        let title = Title::for_topic(&Topic::new("AI boosts coding"), date);
        assert_eq!(title.as_str(), "AI boosts coding - October 04, 2026");
    }

    #[test]
    fn gate_requires_both_checks() {
        let pass_policy = PolicyVerdict {
            verdict: Verdict::Pass,
            response: Some("YES".into()),
        };
        let fail_authorship = AuthorshipVerdict {
            verdict: Verdict::Fail,
            label: Some("Fake".into()),
            score: Some(0.9),
        };
        let pass_authorship = AuthorshipVerdict {
            verdict: Verdict::Pass,
            label: Some("Real".into()),
            score: Some(0.9),
        };

        assert!(!GateVerdict {
            policy: pass_policy.clone(),
            authorship: fail_authorship,
        }
        .passed());
        assert!(GateVerdict {
            policy: pass_policy,
            authorship: pass_authorship,
        }
        .passed());
    }

    #[test]
    fn draft_counts_words() {
        assert_eq!(Draft::new("# Title\n\nSome body text.").word_count(), 5);
    }
}
