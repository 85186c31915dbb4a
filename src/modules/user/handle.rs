use actix_web::{
    delete, get, http::header, middleware::from_fn, post, put, web, HttpRequest, HttpResponse,
};

use crate::{
    api::{error, success},
    middlewares::{current_actor, require_authenticated},
    modules::{
        identity::session::SessionContext,
        user::{model, schema::UserRole, service::UserService},
    },
    utils::{ValidatedJson, ValidatedQuery},
};

#[post("/signup")]
pub async fn sign_up(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<model::SignUpModel>,
) -> Result<success::Success<model::SignUpResponse>, error::Error> {
    let user_id = user_service.register(user_data.0).await?;
    Ok(success::Success::created(Some(model::SignUpResponse { user_id }))
        .message("User registered successfully."))
}

#[post("")]
pub async fn sign_in(
    user_service: web::Data<UserService>,
    session: SessionContext,
    user_data: ValidatedJson<model::SignInModel>,
) -> Result<success::Success<model::SignInResponse>, error::Error> {
    let user = user_service.login(user_data.0).await?;
    session.establish(user.id, &user.username, &user.role)?;

    let response =
        model::SignInResponse { is_admin: user.role == UserRole::Admin, username: user.username };
    Ok(success::Success::ok(Some(response)).message("Login successful!"))
}

#[get("/profile", wrap = "from_fn(require_authenticated)")]
pub async fn get_profile() -> HttpResponse {
    HttpResponse::Found().insert_header((header::LOCATION, "/get-user")).finish()
}

#[put("/profile", wrap = "from_fn(require_authenticated)")]
pub async fn update_profile(
    user_service: web::Data<UserService>,
    session: SessionContext,
    changes: ValidatedJson<model::UpdateProfileModel>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let actor = current_actor(&req)?;
    if let Some(username) = user_service.update_profile(actor.user_id, changes.0).await? {
        session.rename(&username)?;
    }
    Ok(success::Success::ok(None).message("Profile updated successfully."))
}

#[get("")]
pub async fn list_users(
    user_service: web::Data<UserService>,
) -> Result<success::Success<Vec<model::UserResponse>>, error::Error> {
    let users = user_service.list_users().await?;
    Ok(success::Success::ok(Some(users)))
}

#[get("/{id}")]
pub async fn get_user(
    user_service: web::Data<UserService>,
    user_id: web::Path<i64>,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let user = user_service.get_user(user_id.into_inner()).await?;
    Ok(success::Success::ok(Some(user)))
}

#[put("/{id}")]
pub async fn update_user(
    user_service: web::Data<UserService>,
    user_id: web::Path<i64>,
    user_data: ValidatedJson<model::AdminUpdateUserModel>,
) -> Result<success::Success<()>, error::Error> {
    user_service.update_user_admin(user_id.into_inner(), user_data.0).await?;
    Ok(success::Success::ok(None).message("User updated"))
}

#[delete("/{id}")]
pub async fn delete_user(
    user_service: web::Data<UserService>,
    user_id: web::Path<i64>,
) -> Result<success::Success<()>, error::Error> {
    user_service.delete_user(user_id.into_inner()).await?;
    Ok(success::Success::ok(None).message("User deleted"))
}

#[get("/search")]
pub async fn search_users(
    user_service: web::Data<UserService>,
    query: ValidatedQuery<model::UserSearchQuery>,
) -> Result<success::Success<Vec<model::UserResponse>>, error::Error> {
    let users = user_service.search_users(&query.0.q).await?;
    Ok(success::Success::ok(Some(users)))
}
