use std::{collections::BTreeMap, sync::Arc};

use chrono::TimeDelta;
use futures_util::future::join_all;
use mockable::Clock;

use crate::{
    api::error,
    modules::catalog::{
        cache::TtlCache,
        model::SearchResults,
        source::{CatalogParams, CatalogSource},
    },
};

/// Catalog proxy with a per-game detail cache shared by every worker.
pub struct CatalogService {
    source: Arc<dyn CatalogSource + Send + Sync>,
    cache: TtlCache<i64, serde_json::Value>,
}

impl CatalogService {
    pub fn with_dependencies(
        source: Arc<dyn CatalogSource + Send + Sync>,
        ttl: TimeDelta,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        log::info!("CatalogService initialized with a {}s cache", ttl.num_seconds());
        CatalogService { source, cache: TtlCache::new(ttl, clock) }
    }

    pub async fn get_game(&self, game_id: i64) -> Result<serde_json::Value, error::SystemError> {
        if let Some(game) = self.cache.get(&game_id) {
            log::debug!("Catalog cache hit for game {}", game_id);
            return Ok(game);
        }

        log::debug!("Catalog cache miss for game {}", game_id);
        let game = self.source.fetch_game(game_id).await?;
        self.cache.insert(game_id, game.clone());
        Ok(game)
    }

    /// Cached games are served directly, the rest are fetched concurrently.
    /// Games that fail to load are left out of the result.
    pub async fn get_games(
        &self,
        game_ids: &[i64],
    ) -> Result<BTreeMap<i64, serde_json::Value>, error::SystemError> {
        let mut games = BTreeMap::new();
        let mut missing = Vec::new();
        for &game_id in game_ids {
            match self.cache.get(&game_id) {
                Some(game) => {
                    games.insert(game_id, game);
                }
                None => missing.push(game_id),
            }
        }

        let fetched =
            join_all(missing.iter().map(|&game_id| async move {
                (game_id, self.source.fetch_game(game_id).await)
            }))
            .await;

        for (game_id, result) in fetched {
            match result {
                Ok(game) => {
                    self.cache.insert(game_id, game.clone());
                    games.insert(game_id, game);
                }
                Err(e) => log::warn!("Skipping game {} in batch: {}", game_id, e),
            }
        }

        Ok(games)
    }

    /// Uncached passthrough; a client-supplied `key` parameter is dropped.
    pub async fn list_games(
        &self,
        params: CatalogParams,
    ) -> Result<serde_json::Value, error::SystemError> {
        let params: CatalogParams = params.into_iter().filter(|(name, _)| name != "key").collect();
        self.source.list_games(&params).await
    }

    pub async fn search_games(
        &self,
        term: Option<&str>,
    ) -> Result<SearchResults, error::SystemError> {
        let term = term.map(str::trim).unwrap_or_default();
        if term.is_empty() {
            return Err(error::SystemError::bad_request(
                "Please provide a search term via ?search=<term>",
            ));
        }

        let params = vec![("search".to_string(), term.to_string())];
        let mut listing = self.source.list_games(&params).await.map_err(bad_gateway)?;

        let results = match listing.get_mut("results").map(serde_json::Value::take) {
            Some(serde_json::Value::Array(results)) => results,
            _ => Vec::new(),
        };
        Ok(SearchResults { results })
    }

    /// Uncached detail lookup; a catalog 404 is reported as NotFound.
    pub async fn game_details(
        &self,
        game_id: i64,
    ) -> Result<serde_json::Value, error::SystemError> {
        self.source.fetch_game(game_id).await.map_err(|e| match e {
            error::SystemError::Upstream(404) => {
                error::SystemError::not_found("Game not found on RAWG")
            }
            other => bad_gateway(other),
        })
    }
}

/// Upstream and transport failures collapse into a 502.
fn bad_gateway(err: error::SystemError) -> error::SystemError {
    match err {
        error::SystemError::Upstream(_) | error::SystemError::HttpClientError(_) => {
            log::warn!("Catalog request failed: {}", err);
            error::SystemError::Upstream(502)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{fakes::FakeCatalog, MutableClock};
    use chrono::Utc;
    use serde_json::json;

    struct Fixture {
        catalog: FakeCatalog,
        clock: Arc<MutableClock>,
        service: CatalogService,
    }

    fn fixture() -> Fixture {
        let catalog = FakeCatalog::default()
            .with_game(1, json!({ "id": 1, "name": "Portal" }))
            .with_game(2, json!({ "id": 2, "name": "Portal 2" }));
        let clock = Arc::new(MutableClock::new(Utc::now()));
        let service = CatalogService::with_dependencies(
            Arc::new(catalog.clone()),
            TimeDelta::seconds(3600),
            clock.clone(),
        );
        Fixture { catalog, clock, service }
    }

    #[actix_web::test]
    async fn repeated_lookups_within_ttl_fetch_once() {
        let Fixture { catalog, clock, service } = fixture();

        service.get_game(1).await.unwrap();
        clock.advance_seconds(3599);
        let game = service.get_game(1).await.unwrap();

        assert_eq!(game["name"], "Portal");
        assert_eq!(catalog.fetch_count(), 1);
    }

    #[actix_web::test]
    async fn lookup_after_expiry_fetches_again() {
        let Fixture { catalog, clock, service } = fixture();

        service.get_game(1).await.unwrap();
        clock.advance_seconds(3601);
        service.get_game(1).await.unwrap();

        assert_eq!(catalog.fetch_count(), 2);
    }

    #[actix_web::test]
    async fn upstream_status_is_forwarded_and_not_cached() {
        let Fixture { catalog, service, .. } = fixture();

        let missing = service.get_game(99).await;
        assert!(matches!(missing, Err(error::SystemError::Upstream(404))));
        let _ = service.get_game(99).await;
        assert_eq!(catalog.fetch_count(), 2);
    }

    #[actix_web::test]
    async fn batch_serves_cached_and_omits_failures() {
        let Fixture { catalog, service, .. } = fixture();
        service.get_game(1).await.unwrap();

        let games = service.get_games(&[1, 2, 99]).await.unwrap();
        assert_eq!(games.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(catalog.fetch_count(), 3);

        assert!(service.get_games(&[]).await.unwrap().is_empty());
        assert_eq!(catalog.fetch_count(), 3);
    }

    #[actix_web::test]
    async fn search_requires_term_and_unwraps_results() {
        let Fixture { catalog, service, .. } = fixture();

        let blank = service.search_games(Some("  ")).await;
        assert!(matches!(blank, Err(error::SystemError::BadRequest(_))));

        let found = service.search_games(Some(" portal ")).await.unwrap();
        assert_eq!(found.results.len(), 2);
        assert_eq!(catalog.last_params(), vec![("search".to_string(), "portal".to_string())]);
    }

    #[actix_web::test]
    async fn listing_drops_client_api_key() {
        let Fixture { catalog, service, .. } = fixture();

        let params = vec![
            ("key".to_string(), "stolen".to_string()),
            ("page".to_string(), "2".to_string()),
        ];
        service.list_games(params).await.unwrap();
        assert_eq!(catalog.last_params(), vec![("page".to_string(), "2".to_string())]);
    }

    #[actix_web::test]
    async fn details_map_missing_to_not_found_and_other_failures_to_bad_gateway() {
        let Fixture { catalog, service, .. } = fixture();

        let missing = service.game_details(99).await;
        assert!(matches!(missing, Err(error::SystemError::NotFound(_))));

        catalog.fail_with(429);
        let throttled = service.game_details(1).await;
        assert!(matches!(throttled, Err(error::SystemError::Upstream(502))));
    }
}
