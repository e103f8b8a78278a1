//! # Feed Client
//!
//! Capability contract for the feed module: list, update and delete posts,
//! and read a post's comments.
use crate::model::{Comment, Post};
use async_trait::async_trait;
use platform_kit::{ClientError, FeatureApi, ResourceClient, ResourceSchema};

/// Operations the feed module needs from the BFF.
#[async_trait]
pub trait FeedApi: FeatureApi {
    /// All posts, in the order the BFF returns them.
    #[tracing::instrument(skip(self))]
    async fn fetch_feeds(&self) -> Result<Vec<Post>, ClientError> {
        tracing::debug!("Sending request");
        self.resources().fetch_list(Post::COLLECTION).await
    }

    /// Replaces `post` and returns the server's version of it.
    #[tracing::instrument(skip(self, post), fields(id = post.id))]
    async fn update_post(&self, post: &Post) -> Result<Post, ClientError> {
        tracing::debug!("Sending request");
        self.resources().update(&post.location(), post).await
    }

    #[tracing::instrument(skip(self, post), fields(id = post.id))]
    async fn delete_post(&self, post: &Post) -> Result<(), ClientError> {
        tracing::debug!("Sending request");
        self.resources().delete::<Post>(Post::COLLECTION, &post.id).await
    }

    /// Comments on `post`, via `posts/{id}/comments`.
    #[tracing::instrument(skip(self, post), fields(id = post.id))]
    async fn fetch_comments(&self, post: &Post) -> Result<Vec<Comment>, ClientError> {
        tracing::debug!("Sending request");
        self.resources()
            .fetch_list(&format!("{}/{}", post.location(), Comment::COLLECTION))
            .await
    }
}

/// [`FeedApi`] backed by the shared resource client.
#[derive(Debug, Clone)]
pub struct FeedClient {
    resources: ResourceClient,
}

impl FeedClient {
    pub fn new(resources: ResourceClient) -> Self {
        Self { resources }
    }
}

impl FeatureApi for FeedClient {
    fn resources(&self) -> &ResourceClient {
        &self.resources
    }
}

impl FeedApi for FeedClient {}
