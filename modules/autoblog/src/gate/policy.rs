use std::sync::Arc;

use tracing::{info, warn};

use ai_client::Message;
use autoblog_common::{AutoblogError, Draft, PolicyVerdict, Verdict};

use crate::traits::TextGenerator;

pub const POLICY_RUBRIC: &str = "\
Review the blog post below and answer each question with YES or NO:\n\
1. Is the content original and not plagiarised?\n\
2. Does it comply with Google AdSense content policies?\n\
3. Is the grammar correct and the post well optimised for SEO?";

/// Coarse affirmative detector: the literal `YES` anywhere, any case.
///
/// The rubric asks three questions but only one aggregate marker is checked,
/// so "1. YES 2. NO 3. NO" passes.
// TODO: request a JSON reply with one boolean per rubric question and require all three.
pub fn contains_affirmative(response: &str) -> bool {
    response.to_uppercase().contains("YES")
}

pub struct PolicyCheck {
    generator: Arc<dyn TextGenerator>,
}

impl PolicyCheck {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn check(&self, draft: &Draft) -> PolicyVerdict {
        let messages = vec![Message::user(format!(
            "{POLICY_RUBRIC}\n\n---\n\n{}",
            draft.as_str()
        ))];

        match self.generator.complete(messages).await {
            Ok(response) => {
                let verdict = Verdict::from_bool(contains_affirmative(&response));
                info!(verdict = ?verdict, "Policy check complete");
                PolicyVerdict {
                    verdict,
                    response: Some(response),
                }
            }
            Err(e) => {
                let err = AutoblogError::GateCheck {
                    check: "policy",
                    message: e.to_string(),
                };
                warn!(error = %err, "Policy check failed, treating as FAIL");
                PolicyVerdict {
                    verdict: Verdict::Fail,
                    response: None,
                }
            }
        }
    }
}
