use crate::{middlewares::require_authenticated, modules::user_game::handle::*};
use actix_web::{
    middleware::from_fn,
    web::{scope, ServiceConfig},
};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/user-games")
            .wrap(from_fn(require_authenticated))
            .service(save_user_game)
            .service(list_user_games)
            .service(delete_user_game),
    );
}
