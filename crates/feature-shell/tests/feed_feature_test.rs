//! Feed module tests against a hand-written capability double.

use async_trait::async_trait;
use feature_shell::clients::FeedApi;
use feature_shell::features::feed::FEED_ID;
use feature_shell::features::{FeedDependencies, FeedFactory, FeedView};
use feature_shell::model::{Comment, Post};
use platform_kit::mock::{MockTransport, RecordingAnalytics};
use platform_kit::{
    channels, BroadcastChannel, ClientError, FeatureApi, FeatureError, FeatureFactory,
    FeatureRegistry, ResourceClient, RootView,
};
use std::sync::{Arc, Mutex};

/// In-memory feed that records every mutation.
struct InMemoryFeed {
    resources: ResourceClient,
    posts: Mutex<Vec<Post>>,
    calls: Mutex<Vec<String>>,
}

impl InMemoryFeed {
    fn new(posts: Vec<Post>) -> Self {
        Self {
            resources: MockTransport::new().client("https://bff.test"),
            posts: Mutex::new(posts),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl FeatureApi for InMemoryFeed {
    fn resources(&self) -> &ResourceClient {
        &self.resources
    }
}

#[async_trait]
impl FeedApi for InMemoryFeed {
    async fn fetch_feeds(&self) -> Result<Vec<Post>, ClientError> {
        self.calls.lock().unwrap().push("fetch".into());
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn update_post(&self, post: &Post) -> Result<Post, ClientError> {
        self.calls.lock().unwrap().push(format!("update {}", post.id));
        // The server owns the body; it keeps its own copy.
        let mut stored = post.clone();
        stored.body = "server body".into();
        Ok(stored)
    }

    async fn delete_post(&self, post: &Post) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(format!("delete {}", post.id));
        if post.id == 404 {
            return Err(ClientError::UnexpectedStatus {
                status: 404,
                body: Some("{}".into()),
            });
        }
        self.posts.lock().unwrap().retain(|p| p.id != post.id);
        Ok(())
    }

    async fn fetch_comments(&self, post: &Post) -> Result<Vec<Comment>, ClientError> {
        self.calls.lock().unwrap().push(format!("comments {}", post.id));
        Ok(vec![Comment {
            id: Some(1),
            post_id: post.id,
            name: "first".into(),
            email: "a@b.c".into(),
            body: "nice".into(),
        }])
    }
}

fn posts() -> Vec<Post> {
    vec![
        Post::new(1, 1, "one", "b1"),
        Post::new(2, 2, "two", "b2"),
        Post::new(3, 1, "three", "b3"),
    ]
}

fn dependencies(feed: &Arc<InMemoryFeed>, analytics: &RecordingAnalytics) -> FeedDependencies {
    FeedDependencies {
        feed_api: feed.clone(),
        analytics: Arc::new(analytics.clone()),
    }
}

#[tokio::test]
async fn factory_builds_without_calling_the_capability() {
    let feed = Arc::new(InMemoryFeed::new(posts()));
    let factory = FeedFactory::new(BroadcastChannel::new(), 1);

    let feature = factory.make_feature(dependencies(&feed, &RecordingAnalytics::new()));
    let _view = feature.make_root_view();

    assert_eq!(feature.id(), FEED_ID);
    assert_eq!(feature.title(), "Feed");
    assert_eq!(feature.descriptor().selected_tab_icon.as_str(), "house.fill");
    assert!(feed.calls().is_empty());
}

#[tokio::test]
async fn registered_feed_renders_through_registry() {
    let feed = Arc::new(InMemoryFeed::new(posts()));
    let mut registry = FeatureRegistry::new();
    registry.register(
        FeedFactory::new(BroadcastChannel::new(), 1),
        dependencies(&feed, &RecordingAnalytics::new()),
    );
    let features = registry.build().unwrap();

    let screen = features.get(FEED_ID).unwrap().make_root_view().render().await.unwrap();
    assert_eq!(screen.to_string(), "== Feed ==\n[1] one\n[2] two\n[3] three\n");
}

#[tokio::test]
async fn count_reaches_every_subscriber_once_per_load() {
    let broadcast = BroadcastChannel::new();
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    let _sub = broadcast.subscribe(channels::SELF_POSTS_COUNT, move |msg| {
        sink.lock().unwrap().push(msg.payload_as::<usize>());
    });

    let feed = Arc::new(InMemoryFeed::new(posts()));
    let view = FeedView::new(dependencies(&feed, &RecordingAnalytics::new()), broadcast, 1);
    view.render().await.unwrap();
    view.delete_post(&Post::new(3, 1, "three", "b3")).await.unwrap();
    view.render().await.unwrap();

    assert_eq!(*received.lock().unwrap(), vec![Some(2), Some(1)]);
}

#[tokio::test]
async fn update_returns_server_version() {
    let feed = Arc::new(InMemoryFeed::new(posts()));
    let view = FeedView::new(
        dependencies(&feed, &RecordingAnalytics::new()),
        BroadcastChannel::new(),
        1,
    );
    view.load().await.unwrap();

    let mut edited = Post::new(2, 2, "two!", "mine");
    let saved = view.update_post(&edited).await.unwrap();

    edited.body = "server body".into();
    assert_eq!(saved, edited);
    assert_eq!(view.posts()[1], edited);
    assert_eq!(feed.calls(), vec!["fetch", "update 2"]);
}

#[tokio::test]
async fn failed_delete_keeps_cached_post() {
    let mut all = posts();
    all.push(Post::new(404, 1, "ghost", ""));
    let feed = Arc::new(InMemoryFeed::new(all));
    let view = FeedView::new(
        dependencies(&feed, &RecordingAnalytics::new()),
        BroadcastChannel::new(),
        1,
    );
    view.load().await.unwrap();

    let err = view.delete_post(&Post::new(404, 1, "ghost", "")).await.unwrap_err();

    assert!(matches!(
        err,
        FeatureError::Load(ClientError::UnexpectedStatus { status: 404, .. })
    ));
    assert_eq!(view.posts().len(), 4);
}

#[tokio::test]
async fn comments_come_from_the_capability() {
    let feed = Arc::new(InMemoryFeed::new(posts()));
    let view = FeedView::new(
        dependencies(&feed, &RecordingAnalytics::new()),
        BroadcastChannel::new(),
        1,
    );

    let comments = view.comments_for(&Post::new(2, 2, "two", "b2")).await.unwrap();
    assert_eq!(comments[0].post_id, 2);
    assert_eq!(feed.calls(), vec!["comments 2"]);
}
