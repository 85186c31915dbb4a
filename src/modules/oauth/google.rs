use serde::Deserialize;

use crate::{
    api::error,
    constants::GoogleOAuthEnv,
    modules::oauth::provider::{FederatedProfile, IdentityProvider},
};

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const SCOPES: &str = "openid email profile";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct GoogleOAuthClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    callback_url: String,
}

impl GoogleOAuthClient {
    pub fn new(config: &GoogleOAuthEnv) -> Result<Self, error::SystemError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            callback_url: config.callback_url.clone(),
        })
    }
}

#[async_trait::async_trait]
impl IdentityProvider for GoogleOAuthClient {
    fn authorization_url(&self, state: &str) -> Result<String, error::SystemError> {
        let url = reqwest::Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.callback_url.as_str()),
                ("response_type", "code"),
                ("scope", SCOPES),
                ("state", state),
            ],
        )
        .map_err(|e| error::SystemError::internal(e.to_string()))?;
        Ok(url.into())
    }

    async fn fetch_profile(&self, code: &str) -> Result<FederatedProfile, error::SystemError> {
        let token = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.callback_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<TokenResponse>()
            .await?;

        let profile = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<FederatedProfile>()
            .await?;

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_url_carries_client_and_state() {
        let client = GoogleOAuthClient::new(&GoogleOAuthEnv {
            client_id: "client-123".into(),
            client_secret: "secret".into(),
            callback_url: "http://localhost:8080/auth/google/callback".into(),
        })
        .unwrap();

        let url = client.authorization_url("xyz").unwrap();
        assert!(url.starts_with(AUTHORIZE_URL));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("state=xyz"));
        assert!(url.contains("scope=openid+email+profile"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fauth%2Fgoogle%2Fcallback"));
    }
}
