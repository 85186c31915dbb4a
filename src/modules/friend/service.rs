use std::sync::Arc;

use crate::{
    api::error,
    modules::{
        friend::{
            model::{FriendRequestAction, FriendResponse, IncomingFriendRequest, OutgoingFriendRequest},
            repository::FriendRepo,
            schema::FriendRequestEntity,
        },
        user::repository::UserRepository,
    },
};

#[derive(Clone)]
pub struct FriendService<R, U>
where
    R: FriendRepo + Send + Sync,
    U: UserRepository + Send + Sync,
{
    friend_repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> FriendService<R, U>
where
    R: FriendRepo + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(friend_repo: Arc<R>, user_repo: Arc<U>) -> Self {
        log::info!("FriendService initialized with dependencies");
        FriendService { friend_repo, user_repo }
    }

    pub async fn get_friends(&self, user_id: i64) -> Result<Vec<FriendResponse>, error::SystemError> {
        self.friend_repo.find_friends(user_id).await
    }

    /// Removing a friendship that does not exist is not an error.
    pub async fn remove_friend(&self, user_id: i64, friend_id: i64) -> Result<(), error::SystemError> {
        if !self.friend_repo.delete_friendship(user_id, friend_id).await? {
            log::debug!("No friendship between {} and {} to remove", user_id, friend_id);
        }
        Ok(())
    }

    pub async fn send_friend_request(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        if receiver_id == sender_id {
            return Err(error::SystemError::bad_request(
                "You cannot send a friend request to yourself.",
            ));
        }

        if self.user_repo.find_by_id(receiver_id).await?.is_none() {
            return Err(error::SystemError::not_found("User not found"));
        }

        let (friends, pending) = tokio::try_join!(
            self.friend_repo.are_friends(sender_id, receiver_id),
            self.friend_repo.has_pending_request(sender_id, receiver_id),
        )?;

        if friends {
            return Err(error::SystemError::conflict("Already friends"));
        }

        if pending {
            return Err(error::SystemError::conflict("Friend request already sent"));
        }

        // The pending-request unique index closes the race between the check
        // above and this insert.
        self.friend_repo.create_friend_request(sender_id, receiver_id).await
    }

    pub async fn respond_to_friend_request(
        &self,
        user_id: i64,
        request_id: i64,
        action: FriendRequestAction,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        match action {
            FriendRequestAction::Accept => {
                self.friend_repo.accept_friend_request_atomic(request_id, user_id).await
            }
            FriendRequestAction::Reject => {
                self.friend_repo.reject_friend_request(request_id, user_id).await
            }
        }
    }

    pub async fn get_incoming_requests(
        &self,
        user_id: i64,
    ) -> Result<Vec<IncomingFriendRequest>, error::SystemError> {
        self.friend_repo.find_incoming_requests(user_id).await
    }

    pub async fn get_outgoing_requests(
        &self,
        user_id: i64,
    ) -> Result<Vec<OutgoingFriendRequest>, error::SystemError> {
        self.friend_repo.find_outgoing_requests(user_id).await
    }
}
