//! Two-stage quality gate: a policy/originality self-check through the
//! text-generation service, and an AI-authorship classifier.
//!
//! Both checks fail closed on errors. Publication requires both to pass.

pub mod authorship;
pub mod policy;

pub use authorship::{authorship_verdict, is_human_label, AuthorshipCheck, AUTHORSHIP_THRESHOLD};
pub use policy::{contains_affirmative, PolicyCheck, POLICY_RUBRIC};

use std::sync::Arc;

use autoblog_common::{AuthorshipVerdict, Draft, PolicyVerdict};

use crate::traits::{TextClassifier, TextGenerator};

pub struct QualityGate {
    policy: PolicyCheck,
    authorship: AuthorshipCheck,
}

impl QualityGate {
    pub fn new(generator: Arc<dyn TextGenerator>, classifier: Arc<dyn TextClassifier>) -> Self {
        Self {
            policy: PolicyCheck::new(generator),
            authorship: AuthorshipCheck::new(classifier),
        }
    }

    pub async fn check_policy(&self, draft: &Draft) -> PolicyVerdict {
        self.policy.check(draft).await
    }

    pub async fn check_authorship(&self, draft: &Draft) -> AuthorshipVerdict {
        self.authorship.check(draft).await
    }
}
