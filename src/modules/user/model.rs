use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::user::schema::{UserEntity, UserRole};

#[derive(Deserialize, Validate)]
pub struct SignUpModel {
    #[validate(length(min = 1, max = 50, message = "Username is required"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct SignInModel {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Absent or empty username and password mean "leave unchanged"; bio may be
/// cleared by sending an empty string.
#[derive(Deserialize, Validate, Default)]
pub struct UpdateProfileModel {
    #[validate(length(max = 50, message = "Username must be at most 50 characters"))]
    pub username: Option<String>,
    pub password: Option<String>,
    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,
}

#[derive(Deserialize, Validate, Default)]
pub struct AdminUpdateUserModel {
    pub username: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub bio: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Deserialize, Validate)]
pub struct UserSearchQuery {
    #[validate(length(min = 1, message = "Search term is required"))]
    pub q: String,
}

pub struct InsertUser {
    pub username: String,
    pub email: String,
    pub hash_password: String,
    pub bio: String,
}

#[derive(Default)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub hash_password: Option<String>,
    pub bio: Option<String>,
}

#[derive(Default)]
pub struct AdminUserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub user_id: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub username: String,
    pub is_admin: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub role: UserRole,
}

impl From<UserEntity> for UserResponse {
    fn from(entity: UserEntity) -> Self {
        UserResponse {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            bio: entity.bio,
            role: entity.role,
        }
    }
}
