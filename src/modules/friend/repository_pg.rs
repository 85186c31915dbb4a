use sqlx::PgConnection;

use crate::{
    api::error,
    modules::friend::{
        model::{FriendResponse, IncomingFriendRequest, OutgoingFriendRequest},
        repository::{FriendRepo, FriendRepository, FriendRequestRepository},
        schema::{FriendRequestEntity, FriendRequestStatus},
    },
    utils::in_transaction,
};

#[derive(Clone)]
pub struct FriendRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

/// Locks the request row for the rest of the transaction and checks it is
/// still pending and addressed to `receiver_id`.
async fn lock_pending_request(
    conn: &mut PgConnection,
    request_id: i64,
    receiver_id: i64,
) -> Result<FriendRequestEntity, error::SystemError> {
    let request = sqlx::query_as::<_, FriendRequestEntity>(
        "SELECT * FROM friend_requests WHERE id = $1 AND receiver_id = $2 FOR UPDATE",
    )
    .bind(request_id)
    .bind(receiver_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| error::SystemError::not_found("Friend request not found"))?;

    if request.status != FriendRequestStatus::Pending {
        return Err(error::SystemError::conflict("Friend request already handled"));
    }

    Ok(request)
}

async fn set_request_status(
    conn: &mut PgConnection,
    request_id: i64,
    status: FriendRequestStatus,
) -> Result<FriendRequestEntity, error::SystemError> {
    let request = sqlx::query_as::<_, FriendRequestEntity>(
        "UPDATE friend_requests SET status = $2 WHERE id = $1 RETURNING *",
    )
    .bind(request_id)
    .bind(status)
    .fetch_one(&mut *conn)
    .await?;

    Ok(request)
}

#[async_trait::async_trait]
impl FriendRepository for FriendRepositoryPg {
    async fn are_friends(
        &self,
        user_id_a: i64,
        user_id_b: i64,
    ) -> Result<bool, error::SystemError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM friends
                WHERE (user_id_1 = $1 AND user_id_2 = $2)
                   OR (user_id_1 = $2 AND user_id_2 = $1)
            )
            "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_friends(&self, user_id: i64) -> Result<Vec<FriendResponse>, error::SystemError> {
        let friends = sqlx::query_as::<_, FriendResponse>(
            r#"
            SELECT
                u.id AS user_id,
                u.username,
                u.email,
                u.bio,
                f.created_at AS friends_since
            FROM friends f
            JOIN users u
                ON u.id = CASE
                    WHEN f.user_id_1 = $1 THEN f.user_id_2
                    ELSE f.user_id_1
                END
            WHERE f.user_id_1 = $1
               OR f.user_id_2 = $1
            ORDER BY u.username
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(friends)
    }

    async fn delete_friendship(
        &self,
        user_id_a: i64,
        user_id_b: i64,
    ) -> Result<bool, error::SystemError> {
        let rows = sqlx::query(
            r#"
            DELETE FROM friends
            WHERE (user_id_1 = $1 AND user_id_2 = $2)
               OR (user_id_1 = $2 AND user_id_2 = $1)
            "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }
}

#[async_trait::async_trait]
impl FriendRequestRepository for FriendRepositoryPg {
    async fn has_pending_request(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> Result<bool, error::SystemError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM friend_requests
                WHERE sender_id = $1 AND receiver_id = $2 AND status = 'pending'
            )
            "#,
        )
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_incoming_requests(
        &self,
        user_id: i64,
    ) -> Result<Vec<IncomingFriendRequest>, error::SystemError> {
        let requests = sqlx::query_as::<_, IncomingFriendRequest>(
            r#"
            SELECT
                fr.id AS request_id,
                fr.sender_id,
                fr.status,
                fr.created_at,
                u.username,
                u.email,
                u.bio
            FROM friend_requests fr
            JOIN users u ON u.id = fr.sender_id
            WHERE fr.receiver_id = $1 AND fr.status = 'pending'
            ORDER BY fr.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    async fn find_outgoing_requests(
        &self,
        user_id: i64,
    ) -> Result<Vec<OutgoingFriendRequest>, error::SystemError> {
        let requests = sqlx::query_as::<_, OutgoingFriendRequest>(
            r#"
            SELECT id AS request_id, receiver_id, created_at
            FROM friend_requests
            WHERE sender_id = $1 AND status = 'pending'
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    async fn create_friend_request(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let request = sqlx::query_as::<_, FriendRequestEntity>(
            r#"
            INSERT INTO friend_requests (sender_id, receiver_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }
}

#[async_trait::async_trait]
impl FriendRepo for FriendRepositoryPg {
    async fn accept_friend_request_atomic(
        &self,
        request_id: i64,
        receiver_id: i64,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        in_transaction(&self.pool, move |conn| {
            Box::pin(async move {
                let request = lock_pending_request(&mut *conn, request_id, receiver_id).await?;
                let accepted =
                    set_request_status(&mut *conn, request_id, FriendRequestStatus::Accepted)
                        .await?;

                sqlx::query("INSERT INTO friends (user_id_1, user_id_2) VALUES ($1, $2)")
                    .bind(request.sender_id)
                    .bind(request.receiver_id)
                    .execute(&mut *conn)
                    .await?;

                Ok(accepted)
            })
        })
        .await
    }

    async fn reject_friend_request(
        &self,
        request_id: i64,
        receiver_id: i64,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        in_transaction(&self.pool, move |conn| {
            Box::pin(async move {
                lock_pending_request(&mut *conn, request_id, receiver_id).await?;
                set_request_status(&mut *conn, request_id, FriendRequestStatus::Rejected).await
            })
        })
        .await
    }
}
