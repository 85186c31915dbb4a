use crate::modules::page::handle::*;
use actix_web::web::ServiceConfig;

/// Registered after every API scope: the catch-all patterns would shadow them.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(home)
        .service(dashboard_page)
        .service(profile_page)
        .service(admin_page)
        .service(pages)
        .service(public_page)
        .service(asset);
}
