use thiserror::Error;

pub type Result<T> = std::result::Result<T, WordPressError>;

#[derive(Debug, Error)]
pub enum WordPressError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for WordPressError {
    fn from(err: reqwest::Error) -> Self {
        WordPressError::Network(err.to_string())
    }
}
