use crate::modules::identity::handle::*;
use actix_web::web::ServiceConfig;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(get_current_user);
}

/// Mounted inside the shared `/auth` scope.
pub fn configure_auth(cfg: &mut ServiceConfig) {
    cfg.service(logout);
}
