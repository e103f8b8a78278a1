use platform_kit::ResourceSchema;
use serde::{Deserialize, Serialize};

/// A post in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

impl Post {
    pub fn new(id: i64, user_id: i64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            user_id,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Location of this post on the BFF, e.g. `posts/7`.
    pub fn location(&self) -> String {
        Self::member_path(&self.id)
    }
}

impl ResourceSchema for Post {
    type Id = i64;
    const COLLECTION: &'static str = "posts";

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }
}
