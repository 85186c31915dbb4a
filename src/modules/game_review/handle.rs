use actix_web::{delete, get, middleware::from_fn, post, put, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::{current_actor, require_authenticated},
    modules::game_review::{
        model::{GameReviewStats, MyReview, ReviewBody, SaveReviewBody},
        schema::GameReviewEntity,
        service::GameReviewService,
    },
    utils::{parse_game_id, ValidatedJson},
};

#[post("/{game_id}", wrap = "from_fn(require_authenticated)")]
pub async fn review_game(
    review_service: web::Data<GameReviewService>,
    game_id: web::Path<String>,
    body: ValidatedJson<ReviewBody>,
    req: HttpRequest,
) -> Result<success::Success<GameReviewEntity>, error::Error> {
    let game_id = parse_game_id(&game_id)?;
    let user_id = current_actor(&req)?.user_id;
    let review = review_service.review_game(user_id, game_id, body.0).await?;
    Ok(success::Success::ok(Some(review)).message("Review saved"))
}

#[get("/{game_id}")]
pub async fn get_game_reviews(
    review_service: web::Data<GameReviewService>,
    game_id: web::Path<String>,
) -> Result<success::Success<GameReviewStats>, error::Error> {
    let game_id = parse_game_id(&game_id)?;
    let stats = review_service.game_reviews(game_id).await?;
    Ok(success::Success::ok(Some(stats)))
}

#[get("")]
pub async fn list_my_reviews(
    review_service: web::Data<GameReviewService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<MyReview>>, error::Error> {
    let user_id = current_actor(&req)?.user_id;
    let reviews = review_service.my_reviews(user_id).await?;
    Ok(success::Success::ok(Some(reviews)))
}

#[get("/{game_id}")]
pub async fn get_my_review(
    review_service: web::Data<GameReviewService>,
    game_id: web::Path<String>,
    req: HttpRequest,
) -> Result<success::Success<GameReviewEntity>, error::Error> {
    let game_id = parse_game_id(&game_id)?;
    let user_id = current_actor(&req)?.user_id;
    let review = review_service.my_review(user_id, game_id).await?;
    Ok(success::Success::ok(Some(review)))
}

#[post("")]
pub async fn save_my_review(
    review_service: web::Data<GameReviewService>,
    body: ValidatedJson<SaveReviewBody>,
    req: HttpRequest,
) -> Result<success::Success<GameReviewEntity>, error::Error> {
    let user_id = current_actor(&req)?.user_id;
    let review = review_service.save_review(user_id, body.0).await?;
    Ok(success::Success::ok(Some(review)).message("Review saved"))
}

#[put("/{game_id}")]
pub async fn update_my_review(
    review_service: web::Data<GameReviewService>,
    game_id: web::Path<String>,
    body: ValidatedJson<ReviewBody>,
    req: HttpRequest,
) -> Result<success::Success<GameReviewEntity>, error::Error> {
    let game_id = parse_game_id(&game_id)?;
    let user_id = current_actor(&req)?.user_id;
    let review = review_service.update_review(user_id, game_id, body.0).await?;
    Ok(success::Success::ok(Some(review)).message("Review updated"))
}

#[delete("/{game_id}")]
pub async fn delete_my_review(
    review_service: web::Data<GameReviewService>,
    game_id: web::Path<String>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let game_id = parse_game_id(&game_id)?;
    let user_id = current_actor(&req)?.user_id;
    review_service.delete_review(user_id, game_id).await?;
    Ok(success::Success::ok(None).message("Review deleted"))
}
