use crate::{
    api::error,
    modules::user_game::{
        model::SaveUserGameBody,
        schema::{GameStatus, UserGameEntity},
    },
};

#[async_trait::async_trait]
pub trait UserGameRepository {
    /// One row per (user, game); a repeated save overwrites rating, review and status.
    async fn upsert(
        &self,
        user_id: i64,
        entry: &SaveUserGameBody,
    ) -> Result<UserGameEntity, error::SystemError>;

    async fn find_for_user(
        &self,
        user_id: i64,
        status: Option<GameStatus>,
        limit: Option<i64>,
    ) -> Result<Vec<UserGameEntity>, error::SystemError>;

    async fn delete(&self, user_id: i64, game_id: i64) -> Result<bool, error::SystemError>;
}
