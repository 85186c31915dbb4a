use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupBody {
    #[validate(length(min = 1, max = 100, message = "Group name is required"))]
    pub name: String,
    #[serde(alias = "bio")]
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    pub group_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewGroup {
    pub name: String,
    pub bio: Option<String>,
    pub group_type: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GroupSearchQuery {
    #[validate(length(min = 1, message = "Search term is required"))]
    pub q: String,
}

/// Listing row: group fields plus the owner's name and the member count.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub group_type: Option<String>,
    pub owner: Option<String>,
    pub member_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    Left,
    GroupDeleted,
}
