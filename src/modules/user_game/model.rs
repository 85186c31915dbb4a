use serde::Deserialize;
use validator::Validate;

use crate::modules::user_game::schema::GameStatus;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveUserGameBody {
    #[validate(range(min = 1, message = "gameId must be a positive integer"))]
    pub game_id: i64,
    #[validate(range(min = 1, max = 10, message = "rating must be an integer between 1 and 10"))]
    pub rating: Option<i32>,
    #[validate(length(max = 1000, message = "review must be a string up to 1000 characters"))]
    pub review: Option<String>,
    pub status: GameStatus,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UserGameQuery {
    pub status: Option<GameStatus>,
    #[validate(range(min = 1, message = "limit must be a positive integer"))]
    pub limit: Option<i64>,
}
