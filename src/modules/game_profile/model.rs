use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveGameProfileBody {
    #[validate(range(min = 1, message = "gameId must be a positive integer"))]
    pub game_id: i64,
    pub genre: Option<String>,
    pub player_count: Option<String>,
    pub developer: Option<String>,
}
