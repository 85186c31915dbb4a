use crate::{
    api::error,
    modules::{
        game::{self, schema::GameEntity},
        game_review::{
            model::{MyReview, PublicReview, ReviewWrite},
            repository::GameReviewRepository,
            schema::GameReviewEntity,
        },
    },
    utils::in_transaction,
};

#[derive(Clone)]
pub struct GameReviewRepositoryPg {
    pool: sqlx::PgPool,
}

impl GameReviewRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl GameReviewRepository for GameReviewRepositoryPg {
    async fn upsert(
        &self,
        user_id: i64,
        review: &ReviewWrite,
        metadata: Option<GameEntity>,
    ) -> Result<GameReviewEntity, error::SystemError> {
        let review = review.clone();
        in_transaction(&self.pool, move |conn| {
            Box::pin(async move {
                match &metadata {
                    Some(game) => game::repository_pg::upsert_metadata(&mut *conn, game).await?,
                    None => game::repository_pg::ensure_exists(&mut *conn, review.game_id).await?,
                }

                let saved = sqlx::query_as::<_, GameReviewEntity>(
                    r#"
                    INSERT INTO game_reviews (game_id, user_id, rating, review)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (user_id, game_id) DO UPDATE SET
                        rating     = EXCLUDED.rating,
                        review     = EXCLUDED.review,
                        updated_at = NOW()
                    RETURNING *
                    "#,
                )
                .bind(review.game_id)
                .bind(user_id)
                .bind(review.rating)
                .bind(&review.review)
                .fetch_one(&mut *conn)
                .await?;

                Ok(saved)
            })
        })
        .await
    }

    async fn find_one(
        &self,
        user_id: i64,
        game_id: i64,
    ) -> Result<Option<GameReviewEntity>, error::SystemError> {
        let review = sqlx::query_as::<_, GameReviewEntity>(
            "SELECT * FROM game_reviews WHERE user_id = $1 AND game_id = $2",
        )
        .bind(user_id)
        .bind(game_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(review)
    }

    async fn find_for_user(&self, user_id: i64) -> Result<Vec<MyReview>, error::SystemError> {
        let reviews = sqlx::query_as::<_, MyReview>(
            r#"
            SELECT
                gr.game_id,
                g.title AS game_name,
                gr.rating,
                gr.review,
                gr.created_at,
                gr.updated_at
            FROM game_reviews gr
            LEFT JOIN games g ON g.id = gr.game_id
            WHERE gr.user_id = $1
            ORDER BY gr.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    async fn find_for_game(&self, game_id: i64) -> Result<Vec<PublicReview>, error::SystemError> {
        let reviews = sqlx::query_as::<_, PublicReview>(
            r#"
            SELECT
                gr.user_id,
                u.username,
                gr.rating,
                gr.review,
                gr.created_at
            FROM game_reviews gr
            JOIN users u ON u.id = gr.user_id
            WHERE gr.game_id = $1
            ORDER BY gr.created_at DESC
            "#,
        )
        .bind(game_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    async fn update(
        &self,
        user_id: i64,
        review: &ReviewWrite,
    ) -> Result<Option<GameReviewEntity>, error::SystemError> {
        let updated = sqlx::query_as::<_, GameReviewEntity>(
            r#"
            UPDATE game_reviews
            SET rating = $3, review = $4, updated_at = NOW()
            WHERE user_id = $1 AND game_id = $2
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(review.game_id)
        .bind(review.rating)
        .bind(&review.review)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, user_id: i64, game_id: i64) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM game_reviews WHERE user_id = $1 AND game_id = $2")
            .bind(user_id)
            .bind(game_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }
}
