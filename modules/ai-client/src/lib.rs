pub mod error;
pub mod huggingface;
pub mod message;
pub mod openrouter;
pub mod util;

pub use error::{AiError, Result};
pub use huggingface::{Classification, HuggingFaceClassifier};
pub use message::{Message, MessageRole};
pub use openrouter::OpenRouter;
pub use util::{first_tokens, truncate_to_char_boundary};
