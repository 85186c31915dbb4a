use actix_web::{delete, get, middleware::from_fn, post, web};

use crate::{
    api::{error, success},
    middlewares::require_admin,
    modules::game_profile::{
        model::SaveGameProfileBody, schema::GameProfileEntity, service::GameProfileService,
    },
    utils::{parse_game_id, ValidatedJson},
};

#[get("/{game_id}")]
pub async fn get_game_profile(
    profile_service: web::Data<GameProfileService>,
    game_id: web::Path<String>,
) -> Result<success::Success<GameProfileEntity>, error::Error> {
    let game_id = parse_game_id(&game_id)?;
    let profile = profile_service.get(game_id).await?;
    Ok(success::Success::ok(Some(profile)))
}

#[post("", wrap = "from_fn(require_admin)")]
pub async fn save_game_profile(
    profile_service: web::Data<GameProfileService>,
    body: ValidatedJson<SaveGameProfileBody>,
) -> Result<success::Success<()>, error::Error> {
    profile_service.save(body.0).await?;
    Ok(success::Success::ok(None).message("Game profile saved successfully."))
}

#[delete("/{game_id}", wrap = "from_fn(require_admin)")]
pub async fn delete_game_profile(
    profile_service: web::Data<GameProfileService>,
    game_id: web::Path<String>,
) -> Result<success::Success<()>, error::Error> {
    let game_id = parse_game_id(&game_id)?;
    profile_service.delete(game_id).await?;
    Ok(success::Success::ok(None).message("Game profile deleted successfully."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        middlewares::resolve_identity,
        modules::{
            game_profile::route, identity::session::SessionContext, user::schema::UserRole,
        },
        test::{
            fakes::{InMemoryGameProfiles, InMemoryUsers},
            session_cookie, test_session_middleware, user_service,
        },
    };
    use actix_web::{cookie::Cookie, http::StatusCode, test, App, HttpResponse};
    use serde_json::json;
    use std::sync::Arc;

    async fn log_in_as(
        session: SessionContext,
        user_id: web::Path<i64>,
    ) -> Result<HttpResponse, error::Error> {
        let role = if *user_id == 1 { UserRole::Admin } else { UserRole::User };
        session.establish(*user_id, "someone", &role)?;
        Ok(HttpResponse::Ok().finish())
    }

    macro_rules! app {
        ($profiles:expr) => {{
            let users = InMemoryUsers::default();
            users.seed("admin", "admin@example.com", "", UserRole::Admin);
            users.seed("player", "player@example.com", "", UserRole::User);
            test::init_service(
                App::new()
                    .app_data(web::Data::new(user_service(users)))
                    .app_data(web::Data::new(GameProfileService::with_dependencies(Arc::new(
                        $profiles,
                    ))))
                    .wrap(from_fn(resolve_identity))
                    .wrap(test_session_middleware())
                    .route("/login/{user_id}", web::get().to(log_in_as))
                    .configure(route::configure),
            )
            .await
        }};
    }

    fn login(user_id: i64) -> test::TestRequest {
        test::TestRequest::get().uri(&format!("/login/{user_id}"))
    }

    fn save(cookie: Cookie<'static>) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/game-profile")
            .cookie(cookie)
            .set_json(json!({ "gameId": 3498, "genre": "Action", "developer": "  " }))
    }

    #[actix_web::test]
    async fn admin_saves_at_the_scope_root() {
        let profiles = InMemoryGameProfiles::default();
        let app = app!(profiles.clone());
        let cookie = session_cookie(&test::call_service(&app, login(1).to_request()).await);

        let res = test::call_service(&app, save(cookie).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(profiles.has_game(3498));

        let req = test::TestRequest::get().uri("/game-profile/3498").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["genre"], "Action");
        assert_eq!(body["data"]["developer"], serde_json::Value::Null);
    }

    #[actix_web::test]
    async fn players_cannot_save_profiles() {
        let profiles = InMemoryGameProfiles::default();
        let app = app!(profiles.clone());
        let cookie = session_cookie(&test::call_service(&app, login(2).to_request()).await);

        let res = test::call_service(&app, save(cookie).to_request()).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert!(!profiles.has_game(3498));
    }
}
