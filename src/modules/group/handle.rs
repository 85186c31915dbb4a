use actix_web::{delete, get, post, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::current_actor,
    modules::group::{
        model::{CreateGroupBody, GroupSearchQuery, GroupSummary, LeaveOutcome},
        schema::GroupEntity,
        service::GroupService,
    },
    utils::{ValidatedJson, ValidatedQuery},
};

#[get("/search")]
pub async fn search_groups(
    group_service: web::Data<GroupService>,
    query: ValidatedQuery<GroupSearchQuery>,
) -> Result<success::Success<Vec<GroupSummary>>, error::Error> {
    let groups = group_service.search_groups(&query.0.q).await?;
    Ok(success::Success::ok(Some(groups)))
}

#[get("")]
pub async fn list_my_groups(
    group_service: web::Data<GroupService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<GroupSummary>>, error::Error> {
    let user_id = current_actor(&req)?.user_id;
    let groups = group_service.my_groups(user_id).await?;
    Ok(success::Success::ok(Some(groups)))
}

#[post("")]
pub async fn create_group(
    group_service: web::Data<GroupService>,
    body: ValidatedJson<CreateGroupBody>,
    req: HttpRequest,
) -> Result<success::Success<GroupEntity>, error::Error> {
    let owner_id = current_actor(&req)?.user_id;
    let group = group_service.create_group(owner_id, body.0).await?;
    Ok(success::Success::created(Some(group)).message("Group created"))
}

#[post("/{group_id}/join")]
pub async fn join_group(
    group_service: web::Data<GroupService>,
    group_id: web::Path<i64>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = current_actor(&req)?.user_id;
    group_service.join_group(user_id, *group_id).await?;
    Ok(success::Success::created(None).message("Joined group"))
}

#[delete("/{group_id}/leave")]
pub async fn leave_group(
    group_service: web::Data<GroupService>,
    group_id: web::Path<i64>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = current_actor(&req)?.user_id;
    let message = match group_service.leave_group(user_id, *group_id).await? {
        LeaveOutcome::GroupDeleted => "Group deleted because owner left",
        LeaveOutcome::Left => "Left group",
    };
    Ok(success::Success::ok(None).message(message))
}
