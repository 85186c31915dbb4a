use crate::api::error;

/// Query parameters forwarded to the catalog listing endpoint.
pub type CatalogParams = Vec<(String, String)>;

#[async_trait::async_trait]
pub trait CatalogSource {
    /// One game's full detail document.
    async fn fetch_game(&self, game_id: i64) -> Result<serde_json::Value, error::SystemError>;

    /// Listing or search; `params` must not carry the API key.
    async fn list_games(&self, params: &CatalogParams)
        -> Result<serde_json::Value, error::SystemError>;
}
