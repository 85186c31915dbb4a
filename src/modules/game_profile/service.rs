use std::sync::Arc;

use crate::{
    api::error,
    modules::game_profile::{
        model::SaveGameProfileBody, repository::GameProfileRepository, schema::GameProfileEntity,
    },
    utils::non_blank,
};

#[derive(Clone)]
pub struct GameProfileService {
    repo: Arc<dyn GameProfileRepository + Send + Sync>,
}

impl GameProfileService {
    pub fn with_dependencies(repo: Arc<dyn GameProfileRepository + Send + Sync>) -> Self {
        log::info!("GameProfileService initialized with dependencies");
        GameProfileService { repo }
    }

    pub async fn get(&self, game_id: i64) -> Result<GameProfileEntity, error::SystemError> {
        self.repo
            .find(game_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("No profile found for that gameId"))
    }

    pub async fn save(&self, body: SaveGameProfileBody) -> Result<(), error::SystemError> {
        let profile = GameProfileEntity {
            game_id: body.game_id,
            genre: non_blank(body.genre),
            player_count: non_blank(body.player_count),
            developer: non_blank(body.developer),
        };
        self.repo.upsert(&profile).await
    }

    pub async fn delete(&self, game_id: i64) -> Result<(), error::SystemError> {
        if !self.repo.delete(game_id).await? {
            return Err(error::SystemError::not_found("No profile found to delete."));
        }
        Ok(())
    }
}
