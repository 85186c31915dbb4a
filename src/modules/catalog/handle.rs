use std::collections::BTreeMap;

use actix_web::{get, post, web};

use crate::{
    api::error,
    modules::catalog::{
        model::{BatchBody, SearchQuery, SearchResults},
        service::CatalogService,
        source::CatalogParams,
    },
    utils::parse_game_id,
};

#[get("/games/{id}")]
pub async fn get_game(
    catalog: web::Data<CatalogService>,
    game_id: web::Path<String>,
) -> Result<web::Json<serde_json::Value>, error::Error> {
    let game_id = parse_game_id(&game_id)?;
    Ok(web::Json(catalog.get_game(game_id).await?))
}

#[post("/games/batch")]
pub async fn get_games_batch(
    catalog: web::Data<CatalogService>,
    body: web::Json<BatchBody>,
) -> Result<web::Json<BTreeMap<i64, serde_json::Value>>, error::Error> {
    if body.ids.is_empty() {
        return Err(error::Error::bad_request("Invalid game IDs"));
    }
    let games = catalog.get_games(&body.valid_ids()).await?;
    Ok(web::Json(games))
}

#[get("/games")]
pub async fn list_games(
    catalog: web::Data<CatalogService>,
    params: web::Query<CatalogParams>,
) -> Result<web::Json<serde_json::Value>, error::Error> {
    Ok(web::Json(catalog.list_games(params.into_inner()).await?))
}

#[get("")]
pub async fn search_games(
    catalog: web::Data<CatalogService>,
    query: web::Query<SearchQuery>,
) -> Result<web::Json<SearchResults>, error::Error> {
    let results = catalog.search_games(query.search.as_deref()).await?;
    Ok(web::Json(results))
}

#[get("/{id}")]
pub async fn get_game_details(
    catalog: web::Data<CatalogService>,
    game_id: web::Path<String>,
) -> Result<web::Json<serde_json::Value>, error::Error> {
    let game_id = parse_game_id(&game_id)?;
    Ok(web::Json(catalog.game_details(game_id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{fakes::FakeCatalog, MutableClock};
    use actix_web::{http::StatusCode, test, web::scope, App};
    use chrono::{TimeDelta, Utc};
    use serde_json::json;
    use std::sync::Arc;

    macro_rules! app {
        ($catalog:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(CatalogService::with_dependencies(
                        Arc::new($catalog),
                        TimeDelta::seconds(60),
                        Arc::new(MutableClock::new(Utc::now())),
                    )))
                    .service(scope("/rawg").service(get_games_batch)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn batch_with_no_usable_ids_is_an_empty_object() {
        let catalog = FakeCatalog::default().with_game(1, json!({ "id": 1 }));
        let app = app!(catalog.clone());

        let req = test::TestRequest::post()
            .uri("/rawg/games/batch")
            .set_json(json!({ "ids": ["x", -4] }))
            .to_request();
        let games: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(games, json!({}));
        assert_eq!(catalog.fetch_count(), 0);
    }

    #[actix_web::test]
    async fn batch_without_ids_is_rejected() {
        let app = app!(FakeCatalog::default());

        let req =
            test::TestRequest::post().uri("/rawg/games/batch").set_json(json!({ "ids": [] })).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn batch_is_keyed_by_game_id() {
        let catalog = FakeCatalog::default().with_game(7, json!({ "id": 7, "name": "Hades" }));
        let app = app!(catalog);

        let req = test::TestRequest::post()
            .uri("/rawg/games/batch")
            .set_json(json!({ "ids": ["7", 8] }))
            .to_request();
        let games: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(games, json!({ "7": { "id": 7, "name": "Hades" } }));
    }
}
