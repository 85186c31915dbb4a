use crate::modules::oauth::handle::*;
use actix_web::web::ServiceConfig;

/// Mounted inside the shared `/auth` scope.
pub fn configure_auth(cfg: &mut ServiceConfig) {
    cfg.service(google_login).service(google_callback);
}
