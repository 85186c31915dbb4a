use crate::{
    api::error,
    modules::user::{
        model::{AdminUserChanges, InsertUser, ProfileChanges},
        schema::UserEntity,
    },
};

#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, error::SystemError>;
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, error::SystemError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError>;
    /// True when someone other than `except_id` already holds `username`.
    async fn username_taken_by_other(
        &self,
        username: &str,
        except_id: i64,
    ) -> Result<bool, error::SystemError>;
    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError>;
    async fn update_profile(
        &self,
        id: i64,
        changes: &ProfileChanges,
    ) -> Result<bool, error::SystemError>;
    async fn update_by_admin(
        &self,
        id: i64,
        changes: &AdminUserChanges,
    ) -> Result<bool, error::SystemError>;
    async fn delete(&self, id: i64) -> Result<bool, error::SystemError>;
    async fn find_all(&self) -> Result<Vec<UserEntity>, error::SystemError>;

    /// Case-insensitive substring match on username or email.
    async fn search_users(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<UserEntity>, error::SystemError>;
}
