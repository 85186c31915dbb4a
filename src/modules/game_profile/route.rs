use crate::modules::game_profile::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/game-profile")
            .service(get_game_profile)
            .service(save_game_profile)
            .service(delete_game_profile),
    );
}
