use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(type_name = "game_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Wishlist,
    Played,
    Collection,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserGameEntity {
    pub user_id: i64,
    pub game_id: i64,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub status: GameStatus,
}
