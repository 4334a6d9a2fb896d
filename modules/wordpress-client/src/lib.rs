pub mod error;
pub mod types;

pub use error::{Result, WordPressError};
pub use types::{CreatePostResponse, CreatedPost, NewPost, PostStatus};

use std::time::Duration;

use tracing::{debug, warn};

pub struct WordPressClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    app_password: String,
}

impl WordPressClient {
    pub fn new(
        base_url: &str,
        username: &str,
        app_password: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WordPressError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            app_password: app_password.to_string(),
        })
    }

    fn posts_endpoint(&self) -> String {
        format!("{}/wp-json/wp/v2/posts", self.base_url)
    }

    /// Create a post. Any non-2xx status is an error; the response body of a
    /// successful call is parsed leniently and never fails the call.
    pub async fn create_post(&self, post: &NewPost<'_>) -> Result<CreatePostResponse> {
        let endpoint = self.posts_endpoint();

        debug!(endpoint = %endpoint, status = ?post.status, "WordPress create post");

        let resp = self
            .client
            .post(&endpoint)
            .basic_auth(&self.username, Some(&self.app_password))
            .json(post)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(WordPressError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await.unwrap_or_default();
        let created = match serde_json::from_str::<CreatedPost>(&body) {
            Ok(created) => created,
            Err(e) => {
                warn!(error = %e, "WordPress response body was not a post object");
                CreatedPost::default()
            }
        };

        Ok(CreatePostResponse {
            status: status.as_u16(),
            post: created,
        })
    }
}
