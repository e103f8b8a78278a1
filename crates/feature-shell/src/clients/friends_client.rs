use crate::model::User;
use async_trait::async_trait;
use platform_kit::{ClientError, FeatureApi, ResourceClient, ResourceSchema};

/// Operations the friends module needs from the BFF.
#[async_trait]
pub trait FriendsApi: FeatureApi {
    #[tracing::instrument(skip(self))]
    async fn fetch_friends(&self) -> Result<Vec<User>, ClientError> {
        tracing::debug!("Sending request");
        self.resources().fetch_list(User::COLLECTION).await
    }
}

/// [`FriendsApi`] backed by the shared resource client.
#[derive(Debug, Clone)]
pub struct FriendsClient {
    resources: ResourceClient,
}

impl FriendsClient {
    pub fn new(resources: ResourceClient) -> Self {
        Self { resources }
    }
}

impl FeatureApi for FriendsClient {
    fn resources(&self) -> &ResourceClient {
        &self.resources
    }
}

impl FriendsApi for FriendsClient {}
