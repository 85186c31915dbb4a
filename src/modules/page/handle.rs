use std::path::PathBuf;

use actix_web::{
    get, http::header::ContentType, middleware::from_fn, web, HttpResponse,
};

use crate::{
    api::error,
    middlewares::{require_admin_page, require_authenticated_page},
    modules::page::model::{is_public_page, PageRoot},
};

async fn send_file(path: PathBuf) -> Result<HttpResponse, error::Error> {
    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    let display = path.display().to_string();

    let bytes = web::block(move || std::fs::read(path))
        .await
        .map_err(|e| {
            log::error!("File read task failed: {}", e);
            error::Error::InternalServer
        })?
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => error::Error::not_found("Page not found"),
            _ => {
                log::error!("Failed to read {}: {}", display, e);
                error::Error::InternalServer
            }
        })?;

    Ok(HttpResponse::Ok().insert_header(ContentType(mime)).body(bytes))
}

async fn send_page(root: &PageRoot, name: &str) -> Result<HttpResponse, error::Error> {
    let path = root.page(name).ok_or_else(|| error::Error::not_found("Page not found"))?;
    send_file(path).await
}

#[get("/")]
pub async fn home(root: web::Data<PageRoot>) -> Result<HttpResponse, error::Error> {
    send_page(&root, "index.html").await
}

#[get("/pages/dashboard.html", wrap = "from_fn(require_authenticated_page)")]
pub async fn dashboard_page(root: web::Data<PageRoot>) -> Result<HttpResponse, error::Error> {
    send_page(&root, "dashboard.html").await
}

#[get("/pages/profile.html", wrap = "from_fn(require_authenticated_page)")]
pub async fn profile_page(root: web::Data<PageRoot>) -> Result<HttpResponse, error::Error> {
    send_page(&root, "profile.html").await
}

#[get("/pages/admin.html", wrap = "from_fn(require_admin_page)")]
pub async fn admin_page(root: web::Data<PageRoot>) -> Result<HttpResponse, error::Error> {
    send_page(&root, "admin.html").await
}

/// Any other page under `/pages`; the guard redirect targets live here too.
#[get("/pages/{page}")]
pub async fn pages(
    root: web::Data<PageRoot>,
    page: web::Path<String>,
) -> Result<HttpResponse, error::Error> {
    send_page(&root, &page).await
}

#[get("/{page}.html")]
pub async fn public_page(
    root: web::Data<PageRoot>,
    page: web::Path<String>,
) -> Result<HttpResponse, error::Error> {
    let name = format!("{}.html", page.into_inner());
    if !is_public_page(&name) {
        return Err(error::Error::not_found("Page not found"));
    }
    send_page(&root, &name).await
}

#[get("/{dir}/{file}")]
pub async fn asset(
    root: web::Data<PageRoot>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, error::Error> {
    let (dir, file) = path.into_inner();
    let path = root.asset(&dir, &file).ok_or_else(|| error::Error::not_found("Not found"))?;
    send_file(path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        modules::page::route,
        test::{fakes::InMemoryUsers, test_session_middleware, user_service},
        middlewares::resolve_identity,
    };
    use actix_web::{
        http::{header, StatusCode},
        test, App,
    };

    fn public_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("metaplay-pages-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("pages")).unwrap();
        std::fs::create_dir_all(dir.join("js")).unwrap();
        std::fs::write(dir.join("pages/index.html"), "<h1>MetaPlay</h1>").unwrap();
        std::fs::write(dir.join("pages/login.html"), "<form></form>").unwrap();
        std::fs::write(dir.join("pages/dashboard.html"), "<h1>Dashboard</h1>").unwrap();
        std::fs::write(dir.join("js/header.js"), "console.log(1)").unwrap();
        dir
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(PageRoot::new(public_dir())))
                    .app_data(web::Data::new(user_service(InMemoryUsers::default())))
                    .wrap(from_fn(resolve_identity))
                    .wrap(test_session_middleware())
                    .configure(route::configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn public_pages_are_served_with_their_mime_type() {
        let app = app!();

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get(header::CONTENT_TYPE).unwrap(), "text/html");

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/login.html").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/js/header.js").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn protected_pages_redirect_anonymous_visitors() {
        let app = app!();

        let req = test::TestRequest::get().uri("/pages/dashboard.html").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FOUND);

        // not reachable through the public shortcut either
        let req = test::TestRequest::get().uri("/dashboard.html").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn traversal_is_refused() {
        let app = app!();
        let req = test::TestRequest::get().uri("/pages/..%2F..%2Fetc%2Fpasswd").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
