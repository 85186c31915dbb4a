use crate::{
    api::error,
    modules::group::{
        model::{GroupSummary, NewGroup},
        schema::GroupEntity,
    },
};

#[async_trait::async_trait]
pub trait GroupRepository {
    /// Inserts the group and the owner's membership as one unit.
    async fn create_with_owner(
        &self,
        owner_id: i64,
        group: &NewGroup,
    ) -> Result<GroupEntity, error::SystemError>;

    async fn find_by_id(&self, group_id: i64) -> Result<Option<GroupEntity>, error::SystemError>;

    async fn is_member(&self, group_id: i64, user_id: i64) -> Result<bool, error::SystemError>;

    async fn add_member(&self, group_id: i64, user_id: i64) -> Result<(), error::SystemError>;

    async fn remove_member(&self, group_id: i64, user_id: i64) -> Result<bool, error::SystemError>;

    /// Memberships go with the group.
    async fn delete_group(&self, group_id: i64) -> Result<bool, error::SystemError>;

    async fn search(&self, term: &str, limit: i64)
    -> Result<Vec<GroupSummary>, error::SystemError>;

    async fn find_for_member(&self, user_id: i64)
    -> Result<Vec<GroupSummary>, error::SystemError>;
}
