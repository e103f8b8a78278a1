use super::{ShellConfig, ShellError};
use crate::clients::{FeedApi, FeedClient, FriendsApi, FriendsClient, ProfileApi, ProfileClient};
use crate::features::{
    FeedDependencies, FeedFactory, FriendsDependencies, FriendsFactory, ProfileDependencies,
    ProfileFactory,
};
use platform_kit::{
    Analytics, AnalyticsEvent, BroadcastChannel, CancellationToken, FeatureError, FeatureRegistry,
    FeatureSet, ReqwestTransport, ResourceClient, RootView, TracingAnalytics, Transport,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// The composed application: every collaborator, wired once.
///
/// Each feature's root view is built once, at composition, and shared by every
/// tab switch. Views that subscribe to broadcasts therefore receive them no
/// matter which tab is showing.
pub struct AppShell {
    features: FeatureSet,
    views: HashMap<String, Arc<dyn RootView>>,
    analytics: Arc<dyn Analytics>,
    broadcast: BroadcastChannel,
    resources: ResourceClient,
    shutdown: CancellationToken,
}

impl AppShell {
    /// Wires the shell against the configured BFF over HTTP, logging analytics.
    pub fn new(config: &ShellConfig) -> Result<Self, ShellError> {
        Self::with_transport(
            config,
            Arc::new(ReqwestTransport::new()),
            Arc::new(TracingAnalytics),
        )
    }

    /// Wires the shell with explicit transport and analytics sink.
    #[instrument(skip_all, fields(base_url = %config.bff.base_url))]
    pub fn with_transport(
        config: &ShellConfig,
        transport: Arc<dyn Transport>,
        analytics: Arc<dyn Analytics>,
    ) -> Result<Self, ShellError> {
        let shutdown = CancellationToken::new();
        let resources = ResourceClient::with_transport(&config.bff.base_url, transport)?
            .with_cancellation(shutdown.clone());
        let broadcast = BroadcastChannel::new();

        let feed_api: Arc<dyn FeedApi> = Arc::new(FeedClient::new(resources.clone()));
        let friends_api: Arc<dyn FriendsApi> = Arc::new(FriendsClient::new(resources.clone()));
        let profile_api: Arc<dyn ProfileApi> =
            Arc::new(ProfileClient::new(resources.clone(), config.self_user_id));

        let mut registry = FeatureRegistry::new();
        registry
            .register(
                FeedFactory::new(broadcast.clone(), config.self_user_id),
                FeedDependencies {
                    feed_api,
                    analytics: Arc::clone(&analytics),
                },
            )
            .register(
                FriendsFactory,
                FriendsDependencies {
                    friends_api,
                    analytics: Arc::clone(&analytics),
                },
            )
            .register(
                ProfileFactory::new(broadcast.clone()),
                ProfileDependencies {
                    profile_api,
                    analytics: Arc::clone(&analytics),
                },
            );
        let features = registry.build()?;
        let views = features
            .iter()
            .map(|feature| (feature.id().to_string(), Arc::from(feature.make_root_view())))
            .collect();

        info!(features = ?features.ids(), "Shell composed");
        Ok(Self {
            features,
            views,
            analytics,
            broadcast,
            resources,
            shutdown,
        })
    }

    pub fn launch(&self) {
        self.analytics.track(&AnalyticsEvent::AppLaunched);
        info!("Shell launched");
    }

    /// The feature modules, in tab order.
    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn broadcast(&self) -> &BroadcastChannel {
        &self.broadcast
    }

    pub fn resources(&self) -> &ResourceClient {
        &self.resources
    }

    /// The root view of feature `id`, without switching tabs.
    pub fn root_view(&self, id: &str) -> Result<Arc<dyn RootView>, ShellError> {
        let feature = self.features.get(id)?;
        self.views
            .get(feature.id())
            .cloned()
            .ok_or_else(|| FeatureError::UnknownFeature(id.to_string()).into())
    }

    /// Switches to the tab of feature `id` and returns its root view.
    pub fn select_tab(&self, id: &str) -> Result<Arc<dyn RootView>, ShellError> {
        let view = self.root_view(id)?;
        let feature = self.features.get(id)?;
        self.analytics.track(&AnalyticsEvent::TabSelected {
            title: feature.title().to_string(),
        });
        Ok(view)
    }

    /// Cancels every in-flight and future BFF request made through this shell.
    pub fn shutdown(&self) {
        info!("Shutting down shell");
        self.shutdown.cancel();
    }
}
