use crate::{middlewares::require_authenticated, modules::catalog::handle::*};
use actix_web::{
    middleware::from_fn,
    web::{scope, ServiceConfig},
};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/rawg")
            .wrap(from_fn(require_authenticated))
            .service(get_games_batch)
            .service(get_game)
            .service(list_games),
    )
    .service(
        scope("/games")
            .wrap(from_fn(require_authenticated))
            .service(search_games)
            .service(get_game_details),
    );
}

/// Same search and detail routes, mounted inside the already-guarded `/api` scope.
pub fn configure_api(cfg: &mut ServiceConfig) {
    cfg.service(scope("/games").service(search_games).service(get_game_details));
}
