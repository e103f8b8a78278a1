//! # Feed
//!
//! Lists every post. After each load the view publishes how many of the posts
//! belong to the signed-in user on [`channels::SELF_POSTS_COUNT`].
use super::lock;
use crate::clients::FeedApi;
use crate::model::{Comment, Post};
use async_trait::async_trait;
use platform_kit::{
    channels, Analytics, AnalyticsEvent, BroadcastChannel, Feature, FeatureDescriptor, FeatureError,
    FeatureFactory, ItemType, PageName, RootView, Screen, ScreenRow,
};
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};

pub const FEED_ID: &str = "feed";

/// Collaborators of the feed module.
#[derive(Clone)]
pub struct FeedDependencies {
    pub feed_api: Arc<dyn FeedApi>,
    pub analytics: Arc<dyn Analytics>,
}

/// Builds the feed module.
///
/// The broadcast channel and the signed-in user's id are fixed for the shell's
/// lifetime, so they are given to the factory rather than to the bundle.
#[derive(Debug, Clone)]
pub struct FeedFactory {
    broadcast: BroadcastChannel,
    self_user_id: i64,
}

impl FeedFactory {
    pub fn new(broadcast: BroadcastChannel, self_user_id: i64) -> Self {
        Self {
            broadcast,
            self_user_id,
        }
    }
}

impl FeatureFactory for FeedFactory {
    type Dependencies = FeedDependencies;

    fn make_feature(&self, dependencies: FeedDependencies) -> Box<dyn Feature> {
        Box::new(FeedFeature {
            descriptor: FeatureDescriptor::new(FEED_ID, "Feed", "house", "house.fill"),
            dependencies,
            broadcast: self.broadcast.clone(),
            self_user_id: self.self_user_id,
        })
    }
}

struct FeedFeature {
    descriptor: FeatureDescriptor,
    dependencies: FeedDependencies,
    broadcast: BroadcastChannel,
    self_user_id: i64,
}

impl Feature for FeedFeature {
    fn descriptor(&self) -> &FeatureDescriptor {
        &self.descriptor
    }

    fn make_root_view(&self) -> Box<dyn RootView> {
        Box::new(FeedView::new(
            self.dependencies.clone(),
            self.broadcast.clone(),
            self.self_user_id,
        ))
    }
}

/// View model of the feed screen.
///
/// Keeps the last loaded posts so edits and deletions show up without a
/// reload.
pub struct FeedView {
    feed_api: Arc<dyn FeedApi>,
    analytics: Arc<dyn Analytics>,
    broadcast: BroadcastChannel,
    self_user_id: i64,
    posts: Mutex<Vec<Post>>,
}

impl FeedView {
    pub fn new(dependencies: FeedDependencies, broadcast: BroadcastChannel, self_user_id: i64) -> Self {
        Self {
            feed_api: dependencies.feed_api,
            analytics: dependencies.analytics,
            broadcast,
            self_user_id,
            posts: Mutex::new(Vec::new()),
        }
    }

    /// Posts from the last load, with local edits applied.
    pub fn posts(&self) -> Vec<Post> {
        lock(&self.posts).clone()
    }

    /// Loads the posts, caches them and announces the signed-in user's count.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Vec<Post>, FeatureError> {
        let posts = self.feed_api.fetch_feeds().await?;
        let own = posts
            .iter()
            .filter(|p| p.user_id == self.self_user_id)
            .count();
        *lock(&self.posts) = posts.clone();

        let delivered = self.broadcast.publish(channels::SELF_POSTS_COUNT, own);
        debug!(total = posts.len(), own, delivered, "Feed loaded");
        Ok(posts)
    }

    /// Saves `post` and replaces the cached copy with the server's version.
    #[instrument(skip(self, post), fields(id = post.id))]
    pub async fn update_post(&self, post: &Post) -> Result<Post, FeatureError> {
        let updated = self.feed_api.update_post(post).await?;
        let mut posts = lock(&self.posts);
        if let Some(slot) = posts.iter_mut().find(|p| p.id == updated.id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Deletes `post` and drops it from the cache.
    #[instrument(skip(self, post), fields(id = post.id))]
    pub async fn delete_post(&self, post: &Post) -> Result<(), FeatureError> {
        self.feed_api.delete_post(post).await?;
        lock(&self.posts).retain(|p| p.id != post.id);
        Ok(())
    }

    pub async fn comments_for(&self, post: &Post) -> Result<Vec<Comment>, FeatureError> {
        Ok(self.feed_api.fetch_comments(post).await?)
    }
}

#[async_trait]
impl RootView for FeedView {
    async fn render(&self) -> Result<Screen, FeatureError> {
        let posts = self.load().await?;
        let mut screen = Screen::new("Feed");
        for post in &posts {
            screen.push(ScreenRow::item(post.id, &post.title));
        }
        Ok(screen)
    }

    async fn select_item(&self, id: i64) -> Result<(), FeatureError> {
        self.analytics.track(&AnalyticsEvent::ItemSelected {
            id,
            item_type: ItemType::Post,
            page_name: PageName::Feed,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_kit::mock::RecordingAnalytics;
    use platform_kit::{ClientError, FeatureApi, ResourceClient};

    /// Serves a fixed post list and echoes updates.
    struct StubFeed {
        resources: ResourceClient,
        posts: Vec<Post>,
    }

    impl FeatureApi for StubFeed {
        fn resources(&self) -> &ResourceClient {
            &self.resources
        }
    }

    #[async_trait]
    impl FeedApi for StubFeed {
        async fn fetch_feeds(&self) -> Result<Vec<Post>, ClientError> {
            Ok(self.posts.clone())
        }

        async fn update_post(&self, post: &Post) -> Result<Post, ClientError> {
            Ok(post.clone())
        }

        async fn delete_post(&self, _post: &Post) -> Result<(), ClientError> {
            Ok(())
        }
    }

    fn view(posts: Vec<Post>) -> (FeedView, RecordingAnalytics, BroadcastChannel) {
        let analytics = RecordingAnalytics::new();
        let broadcast = BroadcastChannel::new();
        let feed_api = Arc::new(StubFeed {
            resources: platform_kit::mock::MockTransport::new().client("https://bff.test"),
            posts,
        });
        let view = FeedView::new(
            FeedDependencies {
                feed_api,
                analytics: Arc::new(analytics.clone()),
            },
            broadcast.clone(),
            1,
        );
        (view, analytics, broadcast)
    }

    #[tokio::test]
    async fn render_lists_posts_in_order() {
        let (view, _, _) = view(vec![Post::new(2, 1, "second", ""), Post::new(1, 3, "first", "")]);
        let screen = view.render().await.unwrap();

        assert_eq!(screen.title, "Feed");
        assert_eq!(screen.item_ids(), vec![2, 1]);
        assert_eq!(screen.rows[0].text, "second");
    }

    #[tokio::test]
    async fn render_publishes_own_post_count() {
        let (view, _, broadcast) = view(vec![
            Post::new(1, 1, "a", ""),
            Post::new(2, 2, "b", ""),
            Post::new(3, 1, "c", ""),
        ]);
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let _sub = broadcast.subscribe(channels::SELF_POSTS_COUNT, move |msg| {
            *sink.lock().unwrap() = msg.payload_as::<usize>();
        });

        view.render().await.unwrap();
        assert_eq!(*seen.lock().unwrap(), Some(2));
    }

    #[tokio::test]
    async fn update_and_delete_keep_cache_in_sync() {
        let (view, _, _) = view(vec![Post::new(1, 1, "a", ""), Post::new(2, 1, "b", "")]);
        view.load().await.unwrap();

        let mut edited = Post::new(1, 1, "a2", "");
        edited.body = "new".into();
        view.update_post(&edited).await.unwrap();
        view.delete_post(&Post::new(2, 1, "b", "")).await.unwrap();

        assert_eq!(view.posts(), vec![edited]);
    }

    #[tokio::test]
    async fn select_tracks_post_selection() {
        let (view, analytics, _) = view(Vec::new());
        view.select_item(9).await.unwrap();

        assert_eq!(
            analytics.events(),
            vec![AnalyticsEvent::ItemSelected {
                id: 9,
                item_type: ItemType::Post,
                page_name: PageName::Feed,
            }]
        );
    }
}
