use actix_session::{
    config::{PersistentSession, TtlExtensionPolicy},
    storage::{RedisSessionStore, SessionStore},
    SessionMiddleware,
};
use actix_web::cookie::{time, Key, SameSite};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{api::error, ENV};

pub const SESSION_COOKIE: &str = "sid";

pub async fn connect_database() -> Result<PgPool, error::SystemError> {
    let pool = PgPoolOptions::new()
        .max_connections(ENV.database_max_connections)
        .min_connections(1)
        .acquire_slow_threshold(std::time::Duration::from_secs(3))
        .connect(&ENV.database_url)
        .await?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| error::SystemError::DatabaseError(e.to_string().into()))?;
    log::info!("Database migrations applied");

    Ok(pool)
}

pub async fn connect_session_store() -> Result<RedisSessionStore, error::SystemError> {
    RedisSessionStore::new(ENV.redis_url.as_str())
        .await
        .map_err(|e| error::SystemError::SessionError(e.to_string().into()))
}

/// Server-side sessions behind an opaque `sid` cookie; the TTL rolls on every request.
pub fn session_middleware<S>(store: S) -> SessionMiddleware<S>
where
    S: SessionStore + 'static,
{
    SessionMiddleware::builder(store, Key::from(ENV.session_secret.as_bytes()))
        .cookie_name(SESSION_COOKIE.to_string())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(time::Duration::hours(ENV.session_ttl_hours))
                .session_ttl_extension_policy(TtlExtensionPolicy::OnEveryRequest),
        )
        .build()
}
