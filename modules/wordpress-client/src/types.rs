use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Publish,
    Draft,
    Pending,
    Private,
}

/// Body of `POST /wp-json/wp/v2/posts`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub status: PostStatus,
}

/// The subset of the created post we care about. Every field is optional:
/// plugins and proxies routinely reshape this response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedPost {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Outcome of a create-post call.
#[derive(Debug, Clone)]
pub struct CreatePostResponse {
    pub status: u16,
    pub post: CreatedPost,
}
