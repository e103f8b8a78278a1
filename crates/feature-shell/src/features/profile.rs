//! # Profile
//!
//! Shows the signed-in user. The post count comes from the feed over the
//! broadcast channel: each view subscribes when it is created and renders the
//! last count it received. A view created after the feed published has no
//! count until the feed publishes again.
use super::lock;
use crate::clients::ProfileApi;
use async_trait::async_trait;
use platform_kit::{
    channels, Analytics, BroadcastChannel, Feature, FeatureDescriptor, FeatureError, FeatureFactory,
    RootView, Screen, ScreenRow, Subscription,
};
use std::sync::{Arc, Mutex};
use tracing::trace;

pub const PROFILE_ID: &str = "profile";

/// Collaborators of the profile module.
#[derive(Clone)]
pub struct ProfileDependencies {
    pub profile_api: Arc<dyn ProfileApi>,
    pub analytics: Arc<dyn Analytics>,
}

#[derive(Debug, Clone)]
pub struct ProfileFactory {
    broadcast: BroadcastChannel,
}

impl ProfileFactory {
    pub fn new(broadcast: BroadcastChannel) -> Self {
        Self { broadcast }
    }
}

impl FeatureFactory for ProfileFactory {
    type Dependencies = ProfileDependencies;

    fn make_feature(&self, dependencies: ProfileDependencies) -> Box<dyn Feature> {
        Box::new(ProfileFeature {
            descriptor: FeatureDescriptor::new(
                PROFILE_ID,
                "Profile",
                "person.crop.circle",
                "person.crop.circle.fill",
            ),
            dependencies,
            broadcast: self.broadcast.clone(),
        })
    }
}

struct ProfileFeature {
    descriptor: FeatureDescriptor,
    dependencies: ProfileDependencies,
    broadcast: BroadcastChannel,
}

impl Feature for ProfileFeature {
    fn descriptor(&self) -> &FeatureDescriptor {
        &self.descriptor
    }

    fn make_root_view(&self) -> Box<dyn RootView> {
        Box::new(ProfileView::new(self.dependencies.clone(), &self.broadcast))
    }
}

pub struct ProfileView {
    profile_api: Arc<dyn ProfileApi>,
    post_count: Arc<Mutex<Option<usize>>>,
    _subscription: Subscription,
}

impl ProfileView {
    /// Creates the view and subscribes it to post count updates.
    pub fn new(dependencies: ProfileDependencies, broadcast: &BroadcastChannel) -> Self {
        let post_count = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&post_count);
        let subscription = broadcast.subscribe(channels::SELF_POSTS_COUNT, move |message| {
            if let Some(count) = message.payload_as::<usize>() {
                trace!(count, "Post count received");
                *lock(&sink) = Some(count);
            }
        });

        Self {
            profile_api: dependencies.profile_api,
            post_count,
            _subscription: subscription,
        }
    }

    /// Last post count received, if any.
    pub fn post_count(&self) -> Option<usize> {
        *lock(&self.post_count)
    }
}

#[async_trait]
impl RootView for ProfileView {
    async fn render(&self) -> Result<Screen, FeatureError> {
        let user = self.profile_api.fetch_profile().await?;

        let mut screen = Screen::new("Profile");
        screen.push(ScreenRow::text(format!("{} (@{})", user.name, user.username)));
        screen.push(ScreenRow::text(user.address.one_line()));
        screen.push(ScreenRow::text(format!("Phone: {}", user.phone)));
        screen.push(ScreenRow::text(format!("Website: {}", user.website)));
        screen.push(ScreenRow::text(format!(
            "Company: {} ({})",
            user.company.name, user.company.catch_phrase
        )));
        if let Some(count) = self.post_count() {
            screen.push(ScreenRow::text(format!("Posts: {count}")));
        }
        Ok(screen)
    }
}
