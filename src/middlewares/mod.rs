use actix_session::SessionExt;
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::header,
    middleware::Next,
    web, Error, HttpMessage, HttpRequest, HttpResponse,
};

use crate::{
    api::error,
    constants::{ACCESS_DENIED_PAGE, AUTH_REQUIRED_PAGE},
    modules::{
        identity::{
            model::{Actor, Identity},
            resolver,
            session::SessionContext,
        },
        user::service::UserService,
    },
};

/// Resolves the caller once and stores the resulting [`Identity`] in the
/// request extensions for every guard and handler downstream.
pub async fn resolve_identity<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, Error>
where
    B: MessageBody + 'static,
{
    let identity = match req.app_data::<web::Data<UserService>>().cloned() {
        Some(users) => {
            let session = SessionContext::new(req.get_session());
            resolver::resolve_request(&session, &users).await
        }
        None => {
            log::warn!("UserService missing from app data; treating request as anonymous");
            Identity::Anonymous
        }
    };

    req.extensions_mut().insert(identity);

    next.call(req).await
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Access {
    Authenticated,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Denial {
    Unauthenticated,
    NotAdmin,
}

pub fn check_access(identity: &Identity, access: Access) -> Result<(), Denial> {
    let actor = identity.actor().ok_or(Denial::Unauthenticated)?;
    match access {
        Access::Authenticated => Ok(()),
        Access::Admin if actor.is_admin() => Ok(()),
        Access::Admin => Err(Denial::NotAdmin),
    }
}

fn request_identity(req: &HttpRequest) -> Identity {
    req.extensions().get::<Identity>().cloned().unwrap_or(Identity::Anonymous)
}

async fn api_gate<B>(
    req: ServiceRequest,
    next: Next<B>,
    access: Access,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody + 'static,
{
    let denied = match check_access(&request_identity(req.request()), access) {
        Ok(()) => return next.call(req).await.map(ServiceResponse::map_into_left_body),
        Err(Denial::Unauthenticated) => error::Error::unauthorized("Not logged in"),
        Err(Denial::NotAdmin) => error::Error::forbidden("Access denied"),
    };
    Ok(req.error_response(denied).map_into_right_body())
}

pub async fn require_authenticated<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody + 'static,
{
    api_gate(req, next, Access::Authenticated).await
}

pub async fn require_admin<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody + 'static,
{
    api_gate(req, next, Access::Admin).await
}

async fn page_gate<B>(
    req: ServiceRequest,
    next: Next<B>,
    access: Access,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody + 'static,
{
    match check_access(&request_identity(req.request()), access) {
        Ok(()) => next.call(req).await.map(ServiceResponse::map_into_left_body),
        Err(denial) => {
            let location = match denial {
                Denial::Unauthenticated => AUTH_REQUIRED_PAGE,
                Denial::NotAdmin => ACCESS_DENIED_PAGE,
            };
            let response = HttpResponse::Found().insert_header((header::LOCATION, location)).finish();
            Ok(req.into_response(response).map_into_right_body())
        }
    }
}

pub async fn require_authenticated_page<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody + 'static,
{
    page_gate(req, next, Access::Authenticated).await
}

pub async fn require_admin_page<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody + 'static,
{
    page_gate(req, next, Access::Admin).await
}

pub fn get_extensions<T: Clone + 'static>(req: &HttpRequest) -> Result<T, error::Error> {
    let extensions = req.extensions();

    let value = extensions
        .get::<T>()
        .ok_or_else(|| error::Error::unauthorized("Unauthorized"))?
        .clone();

    Ok(value)
}

/// The authenticated caller; handlers behind a gate can rely on it.
pub fn current_actor(req: &HttpRequest) -> Result<Actor, error::Error> {
    match get_extensions::<Identity>(req)? {
        Identity::Authenticated(actor) => Ok(actor),
        Identity::Anonymous => Err(error::Error::unauthorized("Not logged in")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        modules::{identity::session::SessionContext, user::schema::UserRole},
        test::{fakes::InMemoryUsers, session_cookie, test_session_middleware, user_service},
    };
    use actix_web::{http::StatusCode, middleware::from_fn, test as actix_test, App};
    use rstest::rstest;

    fn actor(role: UserRole) -> Identity {
        Identity::Authenticated(Actor {
            user_id: 1,
            username: "alice".into(),
            role,
            email: None,
            bio: None,
        })
    }

    #[rstest]
    #[case(Identity::Anonymous, Access::Authenticated, Err(Denial::Unauthenticated))]
    #[case(Identity::Anonymous, Access::Admin, Err(Denial::Unauthenticated))]
    #[case(actor(UserRole::User), Access::Authenticated, Ok(()))]
    #[case(actor(UserRole::User), Access::Admin, Err(Denial::NotAdmin))]
    #[case(actor(UserRole::Admin), Access::Admin, Ok(()))]
    fn access_matrix(
        #[case] identity: Identity,
        #[case] access: Access,
        #[case] expected: Result<(), Denial>,
    ) {
        assert_eq!(check_access(&identity, access), expected);
    }

    #[actix_web::test]
    async fn api_gates_answer_with_status_codes() {
        let users = InMemoryUsers::default();
        let alice = users.seed("alice", "alice@example.com", "", UserRole::User);
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(user_service(users)))
                .wrap(from_fn(resolve_identity))
                .wrap(test_session_middleware())
                .route(
                    "/login",
                    web::get().to(move |session: SessionContext| async move {
                        session.establish(alice, "alice", &UserRole::User)?;
                        Ok::<_, error::Error>(HttpResponse::Ok().finish())
                    }),
                )
                .service(
                    web::resource("/me")
                        .wrap(from_fn(require_authenticated))
                        .to(|req: HttpRequest| async move {
                            let actor = current_actor(&req)?;
                            Ok::<_, error::Error>(HttpResponse::Ok().body(actor.username))
                        }),
                )
                .service(
                    web::resource("/admin")
                        .wrap(from_fn(require_admin))
                        .to(|| async { HttpResponse::Ok().finish() }),
                ),
        )
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/login").to_request()).await;
        let cookie = session_cookie(&res);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/me").cookie(cookie.clone()).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(res).await, "alice");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/admin").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn page_gates_redirect() {
        let users = InMemoryUsers::default();
        let bob = users.seed("bob", "bob@example.com", "", UserRole::User);
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(user_service(users)))
                .wrap(from_fn(resolve_identity))
                .wrap(test_session_middleware())
                .route(
                    "/login",
                    web::get().to(move |session: SessionContext| async move {
                        session.establish(bob, "bob", &UserRole::User)?;
                        Ok::<_, error::Error>(HttpResponse::Ok().finish())
                    }),
                )
                .service(
                    web::resource("/dashboard.html")
                        .wrap(from_fn(require_authenticated_page))
                        .to(|| async { HttpResponse::Ok().finish() }),
                )
                .service(
                    web::resource("/admin.html")
                        .wrap(from_fn(require_admin_page))
                        .to(|| async { HttpResponse::Ok().finish() }),
                ),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/dashboard.html").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), AUTH_REQUIRED_PAGE);

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/login").to_request()).await;
        let cookie = session_cookie(&res);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/dashboard.html").cookie(cookie.clone()).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/admin.html").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), ACCESS_DENIED_PAGE);
    }

    #[actix_web::test]
    async fn session_for_deleted_user_is_anonymous() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(user_service(InMemoryUsers::default())))
                .wrap(from_fn(resolve_identity))
                .wrap(test_session_middleware())
                .route(
                    "/login",
                    web::get().to(|session: SessionContext| async move {
                        session.establish(99, "ghost", &UserRole::Admin)?;
                        Ok::<_, error::Error>(HttpResponse::Ok().finish())
                    }),
                )
                .service(
                    web::resource("/me")
                        .wrap(from_fn(require_authenticated))
                        .to(|| async { HttpResponse::Ok().finish() }),
                ),
        )
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/login").to_request()).await;
        let cookie = session_cookie(&res);
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/me").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
