use actix_web::{get, http::header, web, HttpResponse};

use crate::{
    api::error,
    constants::{DASHBOARD_PAGE, LOGIN_PAGE},
    modules::{
        identity::{model::UserSnapshot, session::SessionContext},
        oauth::{model::CallbackQuery, service::OAuthService},
    },
};

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found().insert_header((header::LOCATION, location.to_string())).finish()
}

fn configured(
    oauth: Option<web::Data<OAuthService>>,
) -> Result<web::Data<OAuthService>, error::Error> {
    oauth.ok_or_else(|| error::Error::not_found("Google login is not configured"))
}

#[get("/google")]
pub async fn google_login(
    oauth: Option<web::Data<OAuthService>>,
    session: SessionContext,
) -> Result<HttpResponse, error::Error> {
    let oauth = configured(oauth)?;
    let state = OAuthService::new_state();
    session.stash_oauth_state(&state)?;
    Ok(redirect(&oauth.authorization_url(&state)?))
}

#[get("/google/callback")]
pub async fn google_callback(
    oauth: Option<web::Data<OAuthService>>,
    session: SessionContext,
    query: web::Query<CallbackQuery>,
) -> Result<HttpResponse, error::Error> {
    let oauth = configured(oauth)?;
    let expected = session.take_oauth_state();

    match oauth.complete(expected, query.into_inner()).await {
        Ok(user) => {
            session.establish_principal(&UserSnapshot::from(user))?;
            Ok(redirect(DASHBOARD_PAGE))
        }
        Err(e) => {
            log::warn!("Google login failed: {}", e);
            Ok(redirect(LOGIN_PAGE))
        }
    }
}
