use actix_web::{delete, get, post, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::current_actor,
    modules::user_game::{
        model::{SaveUserGameBody, UserGameQuery},
        schema::UserGameEntity,
        service::UserGameService,
    },
    utils::{parse_game_id, ValidatedJson, ValidatedQuery},
};

#[post("")]
pub async fn save_user_game(
    user_game_service: web::Data<UserGameService>,
    body: ValidatedJson<SaveUserGameBody>,
    req: HttpRequest,
) -> Result<success::Success<UserGameEntity>, error::Error> {
    let user_id = current_actor(&req)?.user_id;
    let entry = user_game_service.save(user_id, body.0).await?;
    Ok(success::Success::ok(Some(entry)).message("User_Game saved"))
}

#[get("")]
pub async fn list_user_games(
    user_game_service: web::Data<UserGameService>,
    query: ValidatedQuery<UserGameQuery>,
    req: HttpRequest,
) -> Result<success::Success<Vec<UserGameEntity>>, error::Error> {
    let user_id = current_actor(&req)?.user_id;
    let entries = user_game_service.list(user_id, query.0).await?;
    Ok(success::Success::ok(Some(entries)))
}

#[delete("/{game_id}")]
pub async fn delete_user_game(
    user_game_service: web::Data<UserGameService>,
    game_id: web::Path<String>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let game_id = parse_game_id(&game_id)?;
    let user_id = current_actor(&req)?.user_id;
    user_game_service.remove(user_id, game_id).await?;
    Ok(success::Success::ok(None).message("User_Game deleted"))
}
