use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ClassifyRequest<'a> {
    pub inputs: &'a str,
    pub options: ClassifyOptions,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ClassifyOptions {
    pub wait_for_model: bool,
}

/// One scored label from a text-classification model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub score: f32,
}

/// The inference API returns either a nested list (one inner list per
/// input) or a flat list, depending on the model's pipeline config.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ClassifyResponse {
    Nested(Vec<Vec<Classification>>),
    Flat(Vec<Classification>),
    Error { error: String },
}

impl ClassifyResponse {
    /// Highest-scoring label, or the API's inline error message.
    pub fn top(self) -> Result<Option<Classification>, String> {
        let labels = match self {
            ClassifyResponse::Nested(outer) => outer.into_iter().flatten().collect::<Vec<_>>(),
            ClassifyResponse::Flat(labels) => labels,
            ClassifyResponse::Error { error } => return Err(error),
        };
        Ok(labels
            .into_iter()
            .filter(|c| c.score.is_finite())
            .max_by(|a, b| a.score.total_cmp(&b.score)))
    }
}
