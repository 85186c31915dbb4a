use crate::{middlewares::require_authenticated, modules::game_review::handle::*};
use actix_web::{
    middleware::from_fn,
    web::{scope, ServiceConfig},
};

/// Public per-game listing; submitting needs a session.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/game-reviews").service(review_game).service(get_game_reviews));
}

pub fn configure_mine(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/user-review")
            .wrap(from_fn(require_authenticated))
            .service(list_my_reviews)
            .service(save_my_review)
            .service(get_my_review)
            .service(update_my_review)
            .service(delete_my_review),
    );
}
