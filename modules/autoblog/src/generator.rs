use std::sync::Arc;

use tracing::info;

use ai_client::Message;
use autoblog_common::{AutoblogError, Draft, Topic};

use crate::traits::TextGenerator;

pub const TARGET_WORDS: usize = 700;

const WRITER_PREAMBLE: &str = "You are an experienced technology journalist and SEO copywriter. \
You write original, accurate, reader-first articles in Markdown.";

/// Drafts one article per topic through the text-generation service.
pub struct ContentGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl ContentGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// The generated text is returned untouched. Any service or shape
    /// failure is fatal for the run.
    pub async fn generate_blog(&self, topic: &Topic) -> Result<Draft, AutoblogError> {
        let text = self
            .generator
            .complete(blog_prompt(topic))
            .await
            .map_err(|e| AutoblogError::Generation(e.to_string()))?;

        let draft = Draft::new(text);
        info!(topic = %topic, words = draft.word_count(), "Draft generated");
        Ok(draft)
    }
}

pub fn blog_prompt(topic: &Topic) -> Vec<Message> {
    vec![
        Message::system(WRITER_PREAMBLE),
        Message::user(format!(
            "Write a {TARGET_WORDS}-word AdSense-friendly SEO blog post about: {topic}.\n\
             Format it in Markdown with exactly one top-level `#` heading, \
             at least three `##` subheadings, and a closing `## Conclusion` section.\n\
             The article must be 100% original and unique: do not copy or closely \
             paraphrase existing articles."
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockGenerator;

    #[test]
    fn prompt_states_length_structure_and_originality() {
        let messages = blog_prompt(&Topic::new("Open-source LLMs"));
        let user = &messages.last().unwrap().content;
        assert!(user.contains("700-word"));
        assert!(user.contains("Open-source LLMs"));
        assert!(user.contains("one top-level `#` heading"));
        assert!(user.contains("three `##` subheadings"));
        assert!(user.contains("Conclusion"));
        assert!(user.contains("original"));
    }

    #[tokio::test]
    async fn draft_is_returned_unmodified() {
        let raw = "  # Title\n\n## A\n\n## B\n\n## C\n\n## Conclusion\nDone.  ";
        let mock = Arc::new(MockGenerator::new().on_draft(raw));
        let generator = ContentGenerator::new(mock.clone());

        let draft = generator.generate_blog(&Topic::new("x")).await.unwrap();
        assert_eq!(draft.as_str(), raw);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn service_failure_is_generation_error() {
        let generator = ContentGenerator::new(Arc::new(MockGenerator::new()));
        let err = generator.generate_blog(&Topic::new("x")).await.unwrap_err();
        assert!(matches!(err, AutoblogError::Generation(_)));
    }
}
