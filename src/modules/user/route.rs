use crate::{middlewares::require_admin, modules::user::handle::*};
use actix_web::{
    middleware::from_fn,
    web::{scope, ServiceConfig},
};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(sign_up).service(get_profile).service(update_profile).service(
        scope("/admin/users")
            .wrap(from_fn(require_admin))
            .service(list_users)
            .service(get_user)
            .service(update_user)
            .service(delete_user),
    );
}

/// Mounted inside the shared `/auth` scope.
pub fn configure_auth(cfg: &mut ServiceConfig) {
    cfg.service(sign_in);
}

/// Mounted inside the authenticated `/api` scope.
pub fn configure_api(cfg: &mut ServiceConfig) {
    cfg.service(scope("/users").service(search_users));
}
