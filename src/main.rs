use actix_cors::Cors;
use actix_web::{
    self, App, HttpServer,
    middleware::{Logger, from_fn},
    web,
};
use chrono::TimeDelta;
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{connect_database, connect_session_store, session_middleware},
    middlewares::{require_authenticated, resolve_identity},
    modules::{
        catalog::{client::RawgClient, service::CatalogService},
        friend::{repository_pg::FriendRepositoryPg, service::FriendService},
        game_profile::{repository_pg::GameProfileRepositoryPg, service::GameProfileService},
        game_review::{repository_pg::GameReviewRepositoryPg, service::GameReviewService},
        group::{repository_pg::GroupRepositoryPg, service::GroupService},
        oauth::{google::GoogleOAuthClient, service::OAuthService},
        page::model::PageRoot,
        user::{repository_pg::UserRepositoryPg, service::UserService},
        user_game::{repository_pg::UserGameRepositoryPg, service::UserGameService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/health")]
async fn health_check(db_pool: web::Data<sqlx::PgPool>) -> &'static str {
    match sqlx::query("SELECT 1").execute(db_pool.get_ref()).await {
        Ok(_) => "Server is running",
        Err(e) => {
            log::error!("Health check failed: {}", e);
            "Database unavailable"
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    LazyLock::force(&ENV);

    let db_pool = connect_database()
        .await
        .map_err(|e| std::io::Error::other(format!("Database connection error: {e}")))?;

    let session_store = connect_session_store()
        .await
        .map_err(|e| std::io::Error::other(format!("Redis connection error: {e}")))?;

    let user_repo = UserRepositoryPg::new(db_pool.clone());
    let friend_repo = FriendRepositoryPg::new(db_pool.clone());

    let user_service = UserService::with_dependencies(Arc::new(user_repo.clone()));
    let friend_service =
        FriendService::with_dependencies(Arc::new(friend_repo), Arc::new(user_repo.clone()));
    let group_service =
        GroupService::with_dependencies(Arc::new(GroupRepositoryPg::new(db_pool.clone())));
    let user_game_service =
        UserGameService::with_dependencies(Arc::new(UserGameRepositoryPg::new(db_pool.clone())));
    let review_service =
        GameReviewService::with_dependencies(Arc::new(GameReviewRepositoryPg::new(db_pool.clone())));
    let profile_service = GameProfileService::with_dependencies(Arc::new(
        GameProfileRepositoryPg::new(db_pool.clone()),
    ));

    let rawg = RawgClient::new(&ENV.rawg_base_url, ENV.rawg_api_key.clone())
        .map_err(|e| std::io::Error::other(format!("Catalog client error: {e}")))?;
    let cache_ttl =
        TimeDelta::try_seconds(ENV.catalog_cache_ttl_secs).unwrap_or_else(|| TimeDelta::hours(1));
    let catalog_service = web::Data::new(CatalogService::with_dependencies(
        Arc::new(rawg),
        cache_ttl,
        Arc::new(mockable::DefaultClock),
    ));

    let oauth_service = match &ENV.google {
        Some(google) => {
            let client = GoogleOAuthClient::new(google)
                .map_err(|e| std::io::Error::other(format!("Google client error: {e}")))?;
            Some(OAuthService::with_dependencies(Arc::new(client), user_service.clone()))
        }
        None => {
            log::warn!("Google OAuth is not configured; /auth/google is disabled");
            None
        }
    };

    let page_root = PageRoot::new(ENV.public_dir.as_str());

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&ENV.frontend_url)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(friend_service.clone()))
            .app_data(web::Data::new(group_service.clone()))
            .app_data(web::Data::new(user_game_service.clone()))
            .app_data(web::Data::new(review_service.clone()))
            .app_data(web::Data::new(profile_service.clone()))
            .app_data(catalog_service.clone())
            .app_data(web::Data::new(page_root.clone()))
            .configure(|cfg| {
                if let Some(oauth) = &oauth_service {
                    cfg.app_data(web::Data::new(oauth.clone()));
                }
            })
            .wrap(from_fn(resolve_identity))
            .wrap(session_middleware(session_store.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .service(health_check)
            .service(
                web::scope("/auth")
                    .configure(modules::user::route::configure_auth)
                    .configure(modules::identity::route::configure_auth)
                    .configure(modules::oauth::route::configure_auth),
            )
            .configure(modules::identity::route::configure)
            .configure(modules::user::route::configure)
            .service(
                web::scope("/api")
                    .wrap(from_fn(require_authenticated))
                    .configure(modules::user::route::configure_api)
                    .configure(modules::friend::route::configure)
                    .configure(modules::group::route::configure)
                    .configure(modules::catalog::route::configure_api),
            )
            .configure(modules::user_game::route::configure)
            .configure(modules::game_review::route::configure)
            .configure(modules::game_review::route::configure_mine)
            .configure(modules::game_profile::route::configure)
            .configure(modules::catalog::route::configure)
            .configure(modules::page::route::configure)
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
