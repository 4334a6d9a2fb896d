use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoblogError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// One topic source failed. Recovered by the aggregator as an empty list.
    #[error("Source fetch error ({source_name}): {message}")]
    SourceFetch {
        source_name: String,
        message: String,
    },

    #[error("Generation error: {0}")]
    Generation(String),

    /// A gate check call failed. Recovered by the gate as a FAIL verdict.
    #[error("Gate check error ({check}): {message}")]
    GateCheck {
        check: &'static str,
        message: String,
    },

    #[error("Publish error: {0}")]
    Publish(String),
}

impl AutoblogError {
    /// Whether this error must halt the run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AutoblogError::Config(_) | AutoblogError::Generation(_) | AutoblogError::Publish(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovered_errors_are_not_fatal() {
        let source = AutoblogError::SourceFetch {
            source_name: "reddit".into(),
            message: "timeout".into(),
        };
        let gate = AutoblogError::GateCheck {
            check: "authorship",
            message: "503".into(),
        };
        assert!(!source.is_fatal());
        assert!(!gate.is_fatal());
        assert!(AutoblogError::Generation("no choices".into()).is_fatal());
        assert!(AutoblogError::Publish("401".into()).is_fatal());
    }

    #[test]
    fn display_names_the_source() {
        let err = AutoblogError::SourceFetch {
            source_name: "hacker_news".into(),
            message: "bad json".into(),
        };
        assert_eq!(err.to_string(), "Source fetch error (hacker_news): bad json");
    }
}
