use serde::Serialize;
use sqlx::prelude::FromRow;

/// Local copy of a catalog game; rows are created on demand so that entries,
/// reviews and profiles always have a parent.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GameEntity {
    pub id: i64,
    pub title: Option<String>,
    pub release_date: Option<chrono::NaiveDate>,
    pub rating: Option<f64>,
}
