use actix_web::{get, http::header, HttpRequest, HttpResponse};

use crate::{
    api::{error, success},
    middlewares::current_actor,
    modules::identity::{model::CurrentUserResponse, session::SessionContext},
};

#[get("/get-user")]
pub async fn get_current_user(
    req: HttpRequest,
) -> Result<success::Success<CurrentUserResponse>, error::Error> {
    let actor = current_actor(&req)?;
    Ok(success::Success::ok(Some(CurrentUserResponse::from(actor))).no_store())
}

#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.end();
    HttpResponse::Found().insert_header((header::LOCATION, "/")).finish()
}
