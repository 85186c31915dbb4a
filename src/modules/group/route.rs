use crate::modules::group::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/groups")
            .service(search_groups)
            .service(list_my_groups)
            .service(create_group)
            .service(join_group)
            .service(leave_group),
    );
}
