use crate::{
    api::error,
    modules::{
        game::schema::GameEntity,
        game_review::{
            model::{MyReview, PublicReview, ReviewWrite},
            schema::GameReviewEntity,
        },
    },
};

#[async_trait::async_trait]
pub trait GameReviewRepository {
    /// Creates the review or replaces rating and text of the existing one.
    /// The parent game row is created, or refreshed from `metadata`, first.
    async fn upsert(
        &self,
        user_id: i64,
        review: &ReviewWrite,
        metadata: Option<GameEntity>,
    ) -> Result<GameReviewEntity, error::SystemError>;

    async fn find_one(
        &self,
        user_id: i64,
        game_id: i64,
    ) -> Result<Option<GameReviewEntity>, error::SystemError>;

    async fn find_for_user(&self, user_id: i64) -> Result<Vec<MyReview>, error::SystemError>;

    async fn find_for_game(&self, game_id: i64) -> Result<Vec<PublicReview>, error::SystemError>;

    /// Only touches an existing review.
    async fn update(
        &self,
        user_id: i64,
        review: &ReviewWrite,
    ) -> Result<Option<GameReviewEntity>, error::SystemError>;

    async fn delete(&self, user_id: i64, game_id: i64) -> Result<bool, error::SystemError>;
}
