use serde::Deserialize;

use crate::api::error;

/// What the identity provider asserts about the person signing in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FederatedProfile {
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub name: Option<String>,
}

#[async_trait::async_trait]
pub trait IdentityProvider {
    /// Where to send the browser to start the login; `state` must come back unchanged.
    fn authorization_url(&self, state: &str) -> Result<String, error::SystemError>;

    /// Redeems the authorization code and loads the signed-in profile.
    async fn fetch_profile(&self, code: &str) -> Result<FederatedProfile, error::SystemError>;
}
