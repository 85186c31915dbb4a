use crate::{
    api::error,
    modules::{
        game,
        game_profile::{repository::GameProfileRepository, schema::GameProfileEntity},
    },
    utils::in_transaction,
};

#[derive(Clone)]
pub struct GameProfileRepositoryPg {
    pool: sqlx::PgPool,
}

impl GameProfileRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl GameProfileRepository for GameProfileRepositoryPg {
    async fn find(&self, game_id: i64) -> Result<Option<GameProfileEntity>, error::SystemError> {
        let profile = sqlx::query_as::<_, GameProfileEntity>(
            "SELECT game_id, genre, player_count, developer FROM game_profiles WHERE game_id = $1",
        )
        .bind(game_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn upsert(&self, profile: &GameProfileEntity) -> Result<(), error::SystemError> {
        let profile = profile.clone();
        in_transaction(&self.pool, move |conn| {
            Box::pin(async move {
                game::repository_pg::ensure_exists(&mut *conn, profile.game_id).await?;

                sqlx::query(
                    r#"
                    INSERT INTO game_profiles (game_id, genre, player_count, developer)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (game_id) DO UPDATE SET
                        genre        = EXCLUDED.genre,
                        player_count = EXCLUDED.player_count,
                        developer    = EXCLUDED.developer
                    "#,
                )
                .bind(profile.game_id)
                .bind(&profile.genre)
                .bind(&profile.player_count)
                .bind(&profile.developer)
                .execute(&mut *conn)
                .await?;

                Ok(())
            })
        })
        .await
    }

    async fn delete(&self, game_id: i64) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM game_profiles WHERE game_id = $1")
            .bind(game_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }
}
