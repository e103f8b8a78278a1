use platform_kit::ResourceSchema;
use serde::{Deserialize, Serialize};

/// A comment on a post.
///
/// `id` is absent for comments that have not been submitted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

impl ResourceSchema for Comment {
    type Id = i64;
    const COLLECTION: &'static str = "comments";

    fn id(&self) -> Option<i64> {
        self.id
    }
}
