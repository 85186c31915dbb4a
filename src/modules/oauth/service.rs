use std::sync::Arc;

use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};

use crate::{
    api::error,
    modules::{
        oauth::{model::CallbackQuery, provider::IdentityProvider},
        user::{schema::UserEntity, service::UserService},
    },
};

const STATE_LEN: usize = 32;

#[derive(Clone)]
pub struct OAuthService {
    provider: Arc<dyn IdentityProvider + Send + Sync>,
    users: UserService,
}

impl OAuthService {
    pub fn with_dependencies(
        provider: Arc<dyn IdentityProvider + Send + Sync>,
        users: UserService,
    ) -> Self {
        log::info!("OAuthService initialized with dependencies");
        OAuthService { provider, users }
    }

    pub fn new_state() -> String {
        OsRng.sample_iter(&Alphanumeric).take(STATE_LEN).map(char::from).collect()
    }

    pub fn authorization_url(&self, state: &str) -> Result<String, error::SystemError> {
        self.provider.authorization_url(state)
    }

    /// Checks the round-tripped state, then finds or creates the local account.
    pub async fn complete(
        &self,
        expected_state: Option<String>,
        callback: CallbackQuery,
    ) -> Result<UserEntity, error::SystemError> {
        if let Some(reason) = callback.error {
            let message = format!("Provider refused login: {reason}");
            return Err(error::SystemError::unauthorized(message));
        }

        match (expected_state, callback.state) {
            (Some(expected), Some(returned)) if expected == returned => {}
            _ => return Err(error::SystemError::unauthorized("OAuth state mismatch")),
        }

        let code = callback
            .code
            .filter(|c| !c.is_empty())
            .ok_or_else(|| error::SystemError::bad_request("Missing authorization code"))?;

        let profile = self.provider.fetch_profile(&code).await?;
        if profile.email_verified == Some(false) {
            return Err(error::SystemError::unauthorized("Google email is not verified"));
        }
        let email = profile
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| {
                error::SystemError::bad_request("Google profile did not contain a valid email")
            })?;

        self.users
            .provision_from_federated_identity(&email, profile.name.as_deref().unwrap_or_default())
            .await
    }
}
