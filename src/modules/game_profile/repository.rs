use crate::{api::error, modules::game_profile::schema::GameProfileEntity};

#[async_trait::async_trait]
pub trait GameProfileRepository {
    async fn find(&self, game_id: i64) -> Result<Option<GameProfileEntity>, error::SystemError>;

    /// Replaces every descriptive field; the parent game row is created first.
    async fn upsert(&self, profile: &GameProfileEntity) -> Result<(), error::SystemError>;

    async fn delete(&self, game_id: i64) -> Result<bool, error::SystemError>;
}
