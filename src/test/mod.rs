//! Shared helpers for unit tests: session wiring, a settable clock and the
//! in-memory repositories in [`fakes`].


use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{
    cookie::{Cookie, Key},
    dev::ServiceResponse,
};
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::modules::user::service::UserService;

pub const TEST_SESSION_COOKIE: &str = "session";

/// Client-side session store so tests need no Redis.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(TEST_SESSION_COOKIE.to_string())
        .cookie_secure(false)
        .build()
}

/// The session cookie set by `res`, ready to send back on the next request.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|c| c.name() == TEST_SESSION_COOKIE)
        .map(|c| c.into_owned())
        .expect("response did not set a session cookie")
}

pub fn user_service(users: fakes::InMemoryUsers) -> UserService {
    UserService::with_dependencies(Arc::new(users))
}

pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}
