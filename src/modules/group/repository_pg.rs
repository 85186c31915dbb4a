use crate::{
    api::error,
    modules::group::{
        model::{GroupSummary, NewGroup},
        repository::GroupRepository,
        schema::GroupEntity,
    },
    utils::{in_transaction, like_pattern},
};

#[derive(Clone)]
pub struct GroupRepositoryPg {
    pool: sqlx::PgPool,
}

impl GroupRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

const SUMMARY_COLUMNS: &str = r#"
    g.id,
    g.name,
    g.bio AS description,
    g.group_type,
    u.username AS owner,
    (SELECT COUNT(*) FROM group_memberships m WHERE m.group_id = g.id) AS member_count
"#;

#[async_trait::async_trait]
impl GroupRepository for GroupRepositoryPg {
    async fn create_with_owner(
        &self,
        owner_id: i64,
        group: &NewGroup,
    ) -> Result<GroupEntity, error::SystemError> {
        let group = group.clone();
        in_transaction(&self.pool, move |conn| {
            Box::pin(async move {
                let created = sqlx::query_as::<_, GroupEntity>(
                    r#"
                    INSERT INTO user_groups (name, bio, group_type, owner_id)
                    VALUES ($1, $2, $3, $4)
                    RETURNING *
                    "#,
                )
                .bind(&group.name)
                .bind(&group.bio)
                .bind(&group.group_type)
                .bind(owner_id)
                .fetch_one(&mut *conn)
                .await?;

                sqlx::query("INSERT INTO group_memberships (user_id, group_id) VALUES ($1, $2)")
                    .bind(owner_id)
                    .bind(created.id)
                    .execute(&mut *conn)
                    .await?;

                Ok(created)
            })
        })
        .await
    }

    async fn find_by_id(&self, group_id: i64) -> Result<Option<GroupEntity>, error::SystemError> {
        let group = sqlx::query_as::<_, GroupEntity>("SELECT * FROM user_groups WHERE id = $1")
            .bind(group_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(group)
    }

    async fn is_member(&self, group_id: i64, user_id: i64) -> Result<bool, error::SystemError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM group_memberships WHERE group_id = $1 AND user_id = $2)",
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn add_member(&self, group_id: i64, user_id: i64) -> Result<(), error::SystemError> {
        sqlx::query("INSERT INTO group_memberships (user_id, group_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(group_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn remove_member(&self, group_id: i64, user_id: i64) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM group_memberships WHERE group_id = $1 AND user_id = $2")
            .bind(group_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }

    async fn delete_group(&self, group_id: i64) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM user_groups WHERE id = $1")
            .bind(group_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }

    async fn search(
        &self,
        term: &str,
        limit: i64,
    ) -> Result<Vec<GroupSummary>, error::SystemError> {
        let sql = format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
            FROM user_groups g
            LEFT JOIN users u ON u.id = g.owner_id
            WHERE g.name ILIKE $1 OR g.bio ILIKE $1
            ORDER BY g.name
            LIMIT $2
            "#
        );
        let groups = sqlx::query_as::<_, GroupSummary>(&sql)
            .bind(like_pattern(term))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(groups)
    }

    async fn find_for_member(
        &self,
        user_id: i64,
    ) -> Result<Vec<GroupSummary>, error::SystemError> {
        let sql = format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
            FROM group_memberships gm
            JOIN user_groups g ON g.id = gm.group_id
            LEFT JOIN users u ON u.id = g.owner_id
            WHERE gm.user_id = $1
            ORDER BY g.name
            "#
        );
        let groups = sqlx::query_as::<_, GroupSummary>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(groups)
    }
}
