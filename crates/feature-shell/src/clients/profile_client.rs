use crate::model::User;
use async_trait::async_trait;
use platform_kit::{ClientError, FeatureApi, ResourceClient, ResourceSchema};

/// Operations the profile module needs from the BFF.
#[async_trait]
pub trait ProfileApi: FeatureApi {
    /// Id of the signed-in user.
    fn self_user_id(&self) -> i64;

    #[tracing::instrument(skip(self), fields(user_id = self.self_user_id()))]
    async fn fetch_profile(&self) -> Result<User, ClientError> {
        tracing::debug!("Sending request");
        self.resources()
            .fetch_single(&User::member_path(&self.self_user_id()))
            .await
    }
}

/// [`ProfileApi`] for a fixed signed-in user.
#[derive(Debug, Clone)]
pub struct ProfileClient {
    resources: ResourceClient,
    self_user_id: i64,
}

impl ProfileClient {
    pub fn new(resources: ResourceClient, self_user_id: i64) -> Self {
        Self {
            resources,
            self_user_id,
        }
    }
}

impl FeatureApi for ProfileClient {
    fn resources(&self) -> &ResourceClient {
        &self.resources
    }
}

impl ProfileApi for ProfileClient {
    fn self_user_id(&self) -> i64 {
        self.self_user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_kit::mock::MockTransport;

    #[tokio::test]
    async fn fetches_configured_user() {
        let mock = MockTransport::new();
        mock.expect_get("https://bff.test/users/4").respond(404, "{}");

        let profile = ProfileClient::new(mock.client("https://bff.test"), 4);
        let err = profile.fetch_profile().await.unwrap_err();

        assert!(matches!(err, ClientError::UnexpectedStatus { status: 404, .. }));
        mock.verify();
    }
}
