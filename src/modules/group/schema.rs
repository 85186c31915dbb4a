use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GroupEntity {
    pub id: i64,
    pub name: String,
    pub bio: Option<String>,
    pub group_type: Option<String>,
    pub owner_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
