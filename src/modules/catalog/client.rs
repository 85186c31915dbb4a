use crate::{
    api::error,
    modules::catalog::source::{CatalogParams, CatalogSource},
};

pub struct RawgClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RawgClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, error::SystemError> {
        let http = reqwest::Client::builder().build()?;
        if api_key.is_none() {
            log::warn!("RAWG_API_KEY is not set; catalog routes will fail");
        }
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string(), api_key })
    }

    fn api_key(&self) -> Result<&str, error::SystemError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| error::SystemError::internal("Server misconfiguration: missing API key"))
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<serde_json::Value, error::SystemError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(&[("key", self.api_key()?)])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Catalog request {} failed with {}", path, status);
            return Err(error::SystemError::Upstream(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogSource for RawgClient {
    async fn fetch_game(&self, game_id: i64) -> Result<serde_json::Value, error::SystemError> {
        self.get_json(&format!("/games/{game_id}"), &[]).await
    }

    async fn list_games(
        &self,
        params: &CatalogParams,
    ) -> Result<serde_json::Value, error::SystemError> {
        self.get_json("/games", params).await
    }
}
