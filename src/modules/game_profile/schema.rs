use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GameProfileEntity {
    pub game_id: i64,
    pub genre: Option<String>,
    pub player_count: Option<String>,
    pub developer: Option<String>,
}
