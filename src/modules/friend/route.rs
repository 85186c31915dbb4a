use crate::modules::friend::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/friends")
            .service(list_friends)
            .service(list_incoming_requests)
            .service(list_outgoing_requests)
            .service(send_friend_request)
            .service(respond_to_friend_request)
            .service(remove_friend),
    );
}
