use sqlx::PgConnection;

use crate::{api::error, modules::game::schema::GameEntity};

/// Inserts a bare `games` row unless one already exists.
pub async fn ensure_exists(conn: &mut PgConnection, game_id: i64) -> Result<(), error::SystemError> {
    sqlx::query("INSERT INTO games (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
        .bind(game_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Writes catalog metadata; a missing date or rating keeps the stored value.
pub async fn upsert_metadata(
    conn: &mut PgConnection,
    game: &GameEntity,
) -> Result<(), error::SystemError> {
    sqlx::query(
        r#"
        INSERT INTO games (id, title, release_date, rating)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE SET
            title        = EXCLUDED.title,
            release_date = COALESCE(EXCLUDED.release_date, games.release_date),
            rating       = COALESCE(EXCLUDED.rating, games.rating)
        "#,
    )
    .bind(game.id)
    .bind(&game.title)
    .bind(game.release_date)
    .bind(game.rating)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
