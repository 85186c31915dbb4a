use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::modules::game::schema::GameEntity;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewBody {
    #[validate(range(min = 1, max = 10, message = "Rating must be between 1 and 10"))]
    pub rating: i32,
    #[validate(length(max = 1000, message = "review must be a string up to 1000 characters"))]
    pub review: Option<String>,
}

/// Review submission that may also carry catalog metadata for the game.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveReviewBody {
    #[validate(range(min = 1, message = "Invalid gameId"))]
    pub game_id: i64,
    #[validate(range(min = 1, max = 10, message = "Rating must be between 1 and 10"))]
    pub rating: i32,
    #[validate(length(max = 1000, message = "review must be a string up to 1000 characters"))]
    pub review: Option<String>,
    pub game_name: Option<String>,
    pub release_date: Option<chrono::NaiveDate>,
    pub meta_rating: Option<f64>,
}

impl SaveReviewBody {
    pub fn game_metadata(&self) -> Option<GameEntity> {
        let title = self.game_name.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        Some(GameEntity {
            id: self.game_id,
            title: Some(title.to_string()),
            release_date: self.release_date,
            rating: self.meta_rating,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ReviewWrite {
    pub game_id: i64,
    pub rating: i32,
    pub review: Option<String>,
}

/// The caller's review joined with the local game title.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MyReview {
    pub game_id: i64,
    pub game_name: Option<String>,
    pub rating: i32,
    pub review: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PublicReview {
    pub user_id: i64,
    pub username: String,
    pub rating: i32,
    pub review: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameReviewStats {
    pub average_rating: f64,
    pub total_reviews: usize,
    pub reviews: Vec<PublicReview>,
}
