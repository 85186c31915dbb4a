use std::sync::Arc;

use crate::{
    api::error,
    modules::user_game::{
        model::{SaveUserGameBody, UserGameQuery},
        repository::UserGameRepository,
        schema::UserGameEntity,
    },
    utils::non_blank,
};

#[derive(Clone)]
pub struct UserGameService {
    repo: Arc<dyn UserGameRepository + Send + Sync>,
}

impl UserGameService {
    pub fn with_dependencies(repo: Arc<dyn UserGameRepository + Send + Sync>) -> Self {
        log::info!("UserGameService initialized with dependencies");
        UserGameService { repo }
    }

    pub async fn save(
        &self,
        user_id: i64,
        mut entry: SaveUserGameBody,
    ) -> Result<UserGameEntity, error::SystemError> {
        entry.review = non_blank(entry.review);
        self.repo.upsert(user_id, &entry).await
    }

    pub async fn list(
        &self,
        user_id: i64,
        query: UserGameQuery,
    ) -> Result<Vec<UserGameEntity>, error::SystemError> {
        self.repo.find_for_user(user_id, query.status, query.limit).await
    }

    /// Deleting an entry that is not there still succeeds.
    pub async fn remove(&self, user_id: i64, game_id: i64) -> Result<(), error::SystemError> {
        self.repo.delete(user_id, game_id).await?;
        Ok(())
    }
}
