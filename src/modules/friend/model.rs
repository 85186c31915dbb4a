use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::modules::friend::schema::FriendRequestStatus;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestBody {
    #[validate(range(min = 1, message = "Receiver ID is required"))]
    pub receiver_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestAction {
    Accept,
    Reject,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RespondFriendRequestBody {
    pub action: FriendRequestAction,
}

/// Pending request addressed to the caller, with the sender's public fields.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct IncomingFriendRequest {
    pub request_id: i64,
    pub sender_id: i64,
    pub status: FriendRequestStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub username: String,
    pub email: String,
    pub bio: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingFriendRequest {
    pub request_id: i64,
    pub receiver_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FriendResponse {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub friends_since: chrono::DateTime<chrono::Utc>,
}
