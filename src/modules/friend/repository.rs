use crate::api::error;
use crate::modules::friend::model::{FriendResponse, IncomingFriendRequest, OutgoingFriendRequest};
use crate::modules::friend::schema::FriendRequestEntity;

#[async_trait::async_trait]
pub trait FriendRepository {
    /// Friendship is symmetric; either ordering of the pair matches.
    async fn are_friends(&self, user_id_a: i64, user_id_b: i64)
    -> Result<bool, error::SystemError>;

    async fn find_friends(&self, user_id: i64)
    -> Result<Vec<FriendResponse>, error::SystemError>;

    async fn delete_friendship(
        &self,
        user_id_a: i64,
        user_id_b: i64,
    ) -> Result<bool, error::SystemError>;
}

#[async_trait::async_trait]
pub trait FriendRequestRepository {
    /// Only the `sender -> receiver` direction is considered.
    async fn has_pending_request(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> Result<bool, error::SystemError>;

    async fn find_incoming_requests(
        &self,
        user_id: i64,
    ) -> Result<Vec<IncomingFriendRequest>, error::SystemError>;

    async fn find_outgoing_requests(
        &self,
        user_id: i64,
    ) -> Result<Vec<OutgoingFriendRequest>, error::SystemError>;

    async fn create_friend_request(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> Result<FriendRequestEntity, error::SystemError>;
}

#[async_trait::async_trait]
pub trait FriendRepo: FriendRepository + FriendRequestRepository + Send + Sync {
    /// Marks a pending request addressed to `receiver_id` accepted and records
    /// the friendship in the same transaction.
    async fn accept_friend_request_atomic(
        &self,
        request_id: i64,
        receiver_id: i64,
    ) -> Result<FriendRequestEntity, error::SystemError>;

    async fn reject_friend_request(
        &self,
        request_id: i64,
        receiver_id: i64,
    ) -> Result<FriendRequestEntity, error::SystemError>;
}
