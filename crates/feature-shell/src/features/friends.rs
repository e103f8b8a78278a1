use crate::clients::FriendsApi;
use async_trait::async_trait;
use platform_kit::{
    Analytics, AnalyticsEvent, Feature, FeatureDescriptor, FeatureError, FeatureFactory, ItemType,
    PageName, RootView, Screen, ScreenRow,
};
use std::sync::Arc;

pub const FRIENDS_ID: &str = "friends";

/// Collaborators of the friends module.
#[derive(Clone)]
pub struct FriendsDependencies {
    pub friends_api: Arc<dyn FriendsApi>,
    pub analytics: Arc<dyn Analytics>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FriendsFactory;

impl FeatureFactory for FriendsFactory {
    type Dependencies = FriendsDependencies;

    fn make_feature(&self, dependencies: FriendsDependencies) -> Box<dyn Feature> {
        Box::new(FriendsFeature {
            descriptor: FeatureDescriptor::new(FRIENDS_ID, "Friends", "person.2", "person.2.fill"),
            dependencies,
        })
    }
}

struct FriendsFeature {
    descriptor: FeatureDescriptor,
    dependencies: FriendsDependencies,
}

impl Feature for FriendsFeature {
    fn descriptor(&self) -> &FeatureDescriptor {
        &self.descriptor
    }

    fn make_root_view(&self) -> Box<dyn RootView> {
        Box::new(FriendsView::new(self.dependencies.clone()))
    }
}

/// Lists every user as `Name (@username)`.
pub struct FriendsView {
    dependencies: FriendsDependencies,
}

impl FriendsView {
    pub fn new(dependencies: FriendsDependencies) -> Self {
        Self { dependencies }
    }
}

#[async_trait]
impl RootView for FriendsView {
    async fn render(&self) -> Result<Screen, FeatureError> {
        let friends = self.dependencies.friends_api.fetch_friends().await?;
        let mut screen = Screen::new("Friends");
        for friend in &friends {
            screen.push(ScreenRow::item(
                friend.id,
                format!("{} (@{})", friend.name, friend.username),
            ));
        }
        Ok(screen)
    }

    async fn select_item(&self, id: i64) -> Result<(), FeatureError> {
        self.dependencies.analytics.track(&AnalyticsEvent::ItemSelected {
            id,
            item_type: ItemType::Friend,
            page_name: PageName::Friends,
        });
        Ok(())
    }
}
