use actix_web::{delete, get, post, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::current_actor,
    modules::{
        friend::{
            model::{
                FriendRequestAction, FriendRequestBody, FriendResponse, IncomingFriendRequest, OutgoingFriendRequest,
                RespondFriendRequestBody,
            },
            repository_pg::FriendRepositoryPg,
            schema::FriendRequestEntity,
            service::FriendService,
        },
        user::repository_pg::UserRepositoryPg,
    },
    utils::ValidatedJson,
};

pub type FriendSvc = FriendService<FriendRepositoryPg, UserRepositoryPg>;

#[post("/request")]
pub async fn send_friend_request(
    friend_service: web::Data<FriendSvc>,
    body: ValidatedJson<FriendRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<FriendRequestEntity>, error::Error> {
    let sender_id = current_actor(&req)?.user_id;
    let request = friend_service.send_friend_request(sender_id, body.0.receiver_id).await?;

    Ok(success::Success::created(Some(request)).message("Friend request sent"))
}

#[post("/request/{request_id}")]
pub async fn respond_to_friend_request(
    friend_service: web::Data<FriendSvc>,
    request_id: web::Path<i64>,
    body: ValidatedJson<RespondFriendRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<FriendRequestEntity>, error::Error> {
    let receiver_id = current_actor(&req)?.user_id;
    let action = body.0.action;
    let request =
        friend_service.respond_to_friend_request(receiver_id, *request_id, action).await?;

    let message = match action {
        FriendRequestAction::Accept => "Friend request accepted",
        FriendRequestAction::Reject => "Friend request rejected",
    };
    Ok(success::Success::ok(Some(request)).message(message))
}

#[get("")]
pub async fn list_friends(
    friend_service: web::Data<FriendSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendResponse>>, error::Error> {
    let user_id = current_actor(&req)?.user_id;
    let friends = friend_service.get_friends(user_id).await?;

    Ok(success::Success::ok(Some(friends)))
}

#[get("/requests")]
pub async fn list_incoming_requests(
    friend_service: web::Data<FriendSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<IncomingFriendRequest>>, error::Error> {
    let user_id = current_actor(&req)?.user_id;
    let requests = friend_service.get_incoming_requests(user_id).await?;

    Ok(success::Success::ok(Some(requests)))
}

#[get("/requests/sent")]
pub async fn list_outgoing_requests(
    friend_service: web::Data<FriendSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<OutgoingFriendRequest>>, error::Error> {
    let user_id = current_actor(&req)?.user_id;
    let requests = friend_service.get_outgoing_requests(user_id).await?;

    Ok(success::Success::ok(Some(requests)))
}

#[delete("/{friend_id}")]
pub async fn remove_friend(
    friend_service: web::Data<FriendSvc>,
    friend_id: web::Path<i64>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = current_actor(&req)?.user_id;
    friend_service.remove_friend(user_id, *friend_id).await?;
    Ok(success::Success::ok(None).message("Friend removed"))
}
