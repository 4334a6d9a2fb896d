//! The run state machine.
//!
//! `SELECT_TOPIC → GENERATE → CHECK_POLICY → CHECK_AUTHORSHIP → PUBLISH → DONE`,
//! with either failed check jumping straight to `ABORTED`. Each state owns the
//! values produced so far; a step consumes its state and returns the next one,
//! so the draft that reaches `Publish` is the one both checks saw.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use ai_client::{HuggingFaceClassifier, OpenRouter};
use autoblog_common::{
    AuthorshipVerdict, AutoblogError, Config, Draft, GateVerdict, PolicyVerdict, PublishResult,
    Title, Topic,
};

use crate::gate::QualityGate;
use crate::generator::ContentGenerator;
use crate::publisher::WordPressPublisher;
use crate::sources::TopicAggregator;
use crate::traits::{Publisher, TextClassifier, TextGenerator};

const APP_NAME: &str = "autoblog";
const DRAFT_TEMPERATURE: f32 = 0.7;

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// State labels, recorded in visit order on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    SelectTopic,
    Generate,
    CheckPolicy,
    CheckAuthorship,
    Publish,
    Done,
    Aborted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AbortReason {
    PolicyFailed(PolicyVerdict),
    AuthorshipFailed(AuthorshipVerdict),
}

impl AbortReason {
    pub fn describe(&self) -> &'static str {
        match self {
            AbortReason::PolicyFailed(_) => "policy/originality check failed",
            AbortReason::AuthorshipFailed(_) => "AI-authorship check failed",
        }
    }
}

#[derive(Debug)]
enum PipelineState {
    SelectTopic,
    Generate {
        topic: Topic,
    },
    CheckPolicy {
        topic: Topic,
        draft: Draft,
    },
    CheckAuthorship {
        topic: Topic,
        draft: Draft,
        policy: PolicyVerdict,
    },
    Publish {
        topic: Topic,
        draft: Draft,
        verdict: GateVerdict,
    },
    Done {
        topic: Topic,
        title: Title,
        verdict: GateVerdict,
        result: PublishResult,
    },
    Aborted {
        topic: Topic,
        reason: AbortReason,
    },
}

impl PipelineState {
    fn stage(&self) -> Stage {
        match self {
            PipelineState::SelectTopic => Stage::SelectTopic,
            PipelineState::Generate { .. } => Stage::Generate,
            PipelineState::CheckPolicy { .. } => Stage::CheckPolicy,
            PipelineState::CheckAuthorship { .. } => Stage::CheckAuthorship,
            PipelineState::Publish { .. } => Stage::Publish,
            PipelineState::Done { .. } => Stage::Done,
            PipelineState::Aborted { .. } => Stage::Aborted,
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Published {
        topic: Topic,
        title: Title,
        verdict: GateVerdict,
        result: PublishResult,
    },
    Aborted {
        topic: Topic,
        reason: AbortReason,
    },
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub stages: Vec<Stage>,
    pub outcome: RunOutcome,
}

impl RunReport {
    pub fn published(&self) -> bool {
        matches!(self.outcome, RunOutcome::Published { .. })
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

pub struct Pipeline {
    aggregator: TopicAggregator,
    generator: ContentGenerator,
    gate: QualityGate,
    publisher: Arc<dyn Publisher>,
    date: Option<NaiveDate>,
}

impl Pipeline {
    pub fn new(
        aggregator: TopicAggregator,
        generator: Arc<dyn TextGenerator>,
        classifier: Arc<dyn TextClassifier>,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            aggregator,
            generator: ContentGenerator::new(generator.clone()),
            gate: QualityGate::new(generator, classifier),
            publisher,
            date: None,
        }
    }

    /// Wire the production collaborators from `config`.
    pub fn from_config(config: &Config) -> Result<Self, AutoblogError> {
        let llm = OpenRouter::new(&config.openrouter_api_key, &config.model, config.http_timeout)
            .map_err(|e| AutoblogError::Config(e.to_string()))?
            .with_base_url(&config.openrouter_base_url)
            .with_app_name(APP_NAME)
            .with_site_url(&config.wordpress_url)
            .with_temperature(DRAFT_TEMPERATURE);

        let classifier = HuggingFaceClassifier::new(
            &config.hf_classifier_model,
            config.hf_api_token.clone(),
            config.http_timeout,
        )
        .map_err(|e| AutoblogError::Config(e.to_string()))?
        .with_base_url(&config.hf_inference_url);

        Ok(Self::new(
            TopicAggregator::from_config(config)?,
            Arc::new(llm),
            Arc::new(classifier),
            Arc::new(WordPressPublisher::from_config(config)?),
        ))
    }

    /// Pin the date used in the post title instead of today's local date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Drive one run to `Done` or `Aborted`.
    ///
    /// Only generation and publish failures are returned as errors, and they
    /// are logged inside the run span before returning. Gate failures end the
    /// run normally as `RunOutcome::Aborted`.
    pub async fn run(&self) -> Result<RunReport, AutoblogError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline", run_id = %run_id);

        async move {
            let mut stages = Vec::new();
            let mut state = PipelineState::SelectTopic;

            loop {
                stages.push(state.stage());
                state = match state {
                    PipelineState::Done {
                        topic,
                        title,
                        verdict,
                        result,
                    } => {
                        info!(title = %title, status = result.status, "Run complete");
                        return Ok(RunReport {
                            run_id,
                            stages,
                            outcome: RunOutcome::Published {
                                topic,
                                title,
                                verdict,
                                result,
                            },
                        });
                    }
                    PipelineState::Aborted { topic, reason } => {
                        warn!(
                            topic = %topic,
                            reason = reason.describe(),
                            "Run aborted, nothing published"
                        );
                        return Ok(RunReport {
                            run_id,
                            stages,
                            outcome: RunOutcome::Aborted { topic, reason },
                        });
                    }
                    other => match self.step(other).await {
                        Ok(next) => next,
                        Err(e) => {
                            error!(error = %e, fatal = e.is_fatal(), "Run failed");
                            return Err(e);
                        }
                    },
                };
            }
        }
        .instrument(span)
        .await
    }

    async fn step(&self, state: PipelineState) -> Result<PipelineState, AutoblogError> {
        let next = match state {
            PipelineState::SelectTopic => {
                let topic = self.aggregator.get_top_topic().await;
                info!(topic = %topic, "Topic selected");
                PipelineState::Generate { topic }
            }
            PipelineState::Generate { topic } => {
                let draft = self.generator.generate_blog(&topic).await?;
                PipelineState::CheckPolicy { topic, draft }
            }
            PipelineState::CheckPolicy { topic, draft } => {
                let policy = self.gate.check_policy(&draft).await;
                if policy.passed() {
                    PipelineState::CheckAuthorship {
                        topic,
                        draft,
                        policy,
                    }
                } else {
                    PipelineState::Aborted {
                        topic,
                        reason: AbortReason::PolicyFailed(policy),
                    }
                }
            }
            PipelineState::CheckAuthorship {
                topic,
                draft,
                policy,
            } => {
                let authorship = self.gate.check_authorship(&draft).await;
                if authorship.passed() {
                    PipelineState::Publish {
                        topic,
                        draft,
                        verdict: GateVerdict { policy, authorship },
                    }
                } else {
                    PipelineState::Aborted {
                        topic,
                        reason: AbortReason::AuthorshipFailed(authorship),
                    }
                }
            }
            PipelineState::Publish {
                topic,
                draft,
                verdict,
            } => {
                let title = Title::for_topic(&topic, self.title_date());
                let result = self.publisher.publish(&title, &draft).await?;
                PipelineState::Done {
                    topic,
                    title,
                    verdict,
                    result,
                }
            }
            terminal @ (PipelineState::Done { .. } | PipelineState::Aborted { .. }) => terminal,
        };

        info!(stage = ?next.stage(), "Pipeline transition");
        Ok(next)
    }

    fn title_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mock_aggregator, MockClassifier, MockGenerator, MockPublisher, MockWorld};
    use tracing_test::traced_test;

    fn failure_logged_in_run_span(lines: &[&str]) -> Result<(), String> {
        let failed: Vec<&&str> = lines.iter().filter(|l| l.contains("Run failed")).collect();
        match failed.as_slice() {
            [line] if line.contains("pipeline{run_id=") && line.contains("fatal=true") => Ok(()),
            other => Err(format!("expected one failure line inside the run span, got {other:?}")),
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn generation_failure_is_logged_with_run_id() {
        let world = MockWorld::new(
            MockGenerator::new(),
            MockClassifier::returning("real", 0.9),
            MockPublisher::new(),
        );
        let pipeline = world.pipeline(mock_aggregator(&["AI boosts coding"], &[], &[]));

        let err = pipeline.run().await.unwrap_err();

        assert!(matches!(err, AutoblogError::Generation(_)));
        logs_assert(failure_logged_in_run_span);
    }

    #[tokio::test]
    #[traced_test]
    async fn publish_failure_is_logged_with_run_id() {
        let world = MockWorld::new(
            MockGenerator::new().on_draft("# Draft").on_policy("YES"),
            MockClassifier::returning("real", 0.9),
            MockPublisher::failing(),
        );
        let pipeline = world.pipeline(mock_aggregator(&["AI boosts coding"], &[], &[]));

        let err = pipeline.run().await.unwrap_err();

        assert!(matches!(err, AutoblogError::Publish(_)));
        assert_eq!(world.publisher.calls().len(), 1);
        logs_assert(failure_logged_in_run_span);
    }
}
