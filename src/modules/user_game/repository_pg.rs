use crate::{
    api::error,
    modules::{
        game,
        user_game::{
            model::SaveUserGameBody,
            repository::UserGameRepository,
            schema::{GameStatus, UserGameEntity},
        },
    },
    utils::in_transaction,
};

#[derive(Clone)]
pub struct UserGameRepositoryPg {
    pool: sqlx::PgPool,
}

impl UserGameRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserGameRepository for UserGameRepositoryPg {
    async fn upsert(
        &self,
        user_id: i64,
        entry: &SaveUserGameBody,
    ) -> Result<UserGameEntity, error::SystemError> {
        let entry = entry.clone();
        in_transaction(&self.pool, move |conn| {
            Box::pin(async move {
                game::repository_pg::ensure_exists(&mut *conn, entry.game_id).await?;

                let saved = sqlx::query_as::<_, UserGameEntity>(
                    r#"
                    INSERT INTO user_games (user_id, game_id, rating, review, status)
                    VALUES ($1, $2, $3, $4, $5)
                    ON CONFLICT (user_id, game_id) DO UPDATE SET
                        rating = EXCLUDED.rating,
                        review = EXCLUDED.review,
                        status = EXCLUDED.status
                    RETURNING *
                    "#,
                )
                .bind(user_id)
                .bind(entry.game_id)
                .bind(entry.rating)
                .bind(&entry.review)
                .bind(entry.status)
                .fetch_one(&mut *conn)
                .await?;

                Ok(saved)
            })
        })
        .await
    }

    async fn find_for_user(
        &self,
        user_id: i64,
        status: Option<GameStatus>,
        limit: Option<i64>,
    ) -> Result<Vec<UserGameEntity>, error::SystemError> {
        let entries = sqlx::query_as::<_, UserGameEntity>(
            r#"
            SELECT * FROM user_games
            WHERE user_id = $1
              AND ($2::game_status IS NULL OR status = $2)
            ORDER BY game_id
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(status)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn delete(&self, user_id: i64, game_id: i64) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM user_games WHERE user_id = $1 AND game_id = $2")
            .bind(user_id)
            .bind(game_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }
}
