use std::sync::Arc;

use crate::{
    api::error,
    modules::group::{
        model::{CreateGroupBody, GroupSummary, LeaveOutcome, NewGroup},
        repository::GroupRepository,
        schema::GroupEntity,
    },
    utils::non_blank,
};

pub const GROUP_SEARCH_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct GroupService {
    repo: Arc<dyn GroupRepository + Send + Sync>,
}

impl GroupService {
    pub fn with_dependencies(repo: Arc<dyn GroupRepository + Send + Sync>) -> Self {
        log::info!("GroupService initialized with dependencies");
        GroupService { repo }
    }

    pub async fn create_group(
        &self,
        owner_id: i64,
        body: CreateGroupBody,
    ) -> Result<GroupEntity, error::SystemError> {
        let name = body.name.trim().to_string();
        if name.is_empty() {
            return Err(error::SystemError::bad_request("Group name is required"));
        }

        let group = NewGroup {
            name,
            bio: non_blank(body.description),
            group_type: non_blank(body.group_type),
        };
        self.repo.create_with_owner(owner_id, &group).await
    }

    pub async fn join_group(&self, user_id: i64, group_id: i64) -> Result<(), error::SystemError> {
        if self.repo.find_by_id(group_id).await?.is_none() {
            return Err(error::SystemError::not_found("Group not found"));
        }

        if self.repo.is_member(group_id, user_id).await? {
            return Err(error::SystemError::conflict("Already a member of this group"));
        }

        self.repo.add_member(group_id, user_id).await
    }

    /// An owner leaving takes the whole group, and every membership, with them.
    pub async fn leave_group(
        &self,
        user_id: i64,
        group_id: i64,
    ) -> Result<LeaveOutcome, error::SystemError> {
        let group = self
            .repo
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Group not found"))?;

        if group.owner_id == user_id {
            self.repo.delete_group(group_id).await?;
            log::info!("Group {} deleted because its owner left", group_id);
            return Ok(LeaveOutcome::GroupDeleted);
        }

        if !self.repo.remove_member(group_id, user_id).await? {
            return Err(error::SystemError::not_found("You are not a member of this group"));
        }
        Ok(LeaveOutcome::Left)
    }

    pub async fn search_groups(&self, term: &str) -> Result<Vec<GroupSummary>, error::SystemError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(error::SystemError::bad_request("Search term is required"));
        }
        self.repo.search(term, GROUP_SEARCH_LIMIT).await
    }

    pub async fn my_groups(&self, user_id: i64) -> Result<Vec<GroupSummary>, error::SystemError> {
        self.repo.find_for_member(user_id).await
    }
}
