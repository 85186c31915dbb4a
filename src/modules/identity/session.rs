//! Typed access to the identity keys stored in the server-side session.
//!
//! Handlers and middleware go through [`SessionContext`] instead of touching
//! raw session keys, so the set of keys and their types live in one place.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::{
    api::error,
    modules::{
        identity::model::{SessionFlags, SessionSources, UserSnapshot},
        user::schema::UserRole,
    },
};

pub const USER_DATA_KEY: &str = "user_data";
pub const USERNAME_KEY: &str = "username";
pub const USER_ID_KEY: &str = "user_id";
pub const IS_ADMIN_KEY: &str = "is_admin";
pub const PRINCIPAL_KEY: &str = "principal";
pub const OAUTH_STATE_KEY: &str = "oauth_state";

#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Reads all identity evidence. Entries that fail to deserialize are
    /// treated as absent.
    pub fn sources(&self) -> SessionSources {
        SessionSources {
            cached: self.read(USER_DATA_KEY),
            flags: SessionFlags {
                username: self.read(USERNAME_KEY),
                user_id: self.read(USER_ID_KEY),
                is_admin: self.read(IS_ADMIN_KEY).unwrap_or(false),
            },
            principal: self.read(PRINCIPAL_KEY),
        }
    }

    pub fn cache_snapshot(&self, snapshot: &UserSnapshot) -> Result<(), error::SystemError> {
        self.0.insert(USER_DATA_KEY, snapshot)?;
        self.write_flags(snapshot.user_id, &snapshot.username, &snapshot.role)
    }

    /// Starts a fresh authenticated session after a password login.
    pub fn establish(
        &self,
        user_id: i64,
        username: &str,
        role: &UserRole,
    ) -> Result<(), error::SystemError> {
        self.rotate();
        self.write_flags(user_id, username, role)
    }

    /// Starts a fresh authenticated session for a federated login.
    pub fn establish_principal(&self, principal: &UserSnapshot) -> Result<(), error::SystemError> {
        self.rotate();
        self.0.insert(PRINCIPAL_KEY, principal)?;
        self.write_flags(principal.user_id, &principal.username, &principal.role)
    }

    /// Writes a new username back into every place the session remembers it.
    pub fn rename(&self, username: &str) -> Result<(), error::SystemError> {
        if let Some(mut cached) = self.read::<UserSnapshot>(USER_DATA_KEY) {
            cached.username = username.to_string();
            self.0.insert(USER_DATA_KEY, &cached)?;
        }
        if let Some(mut principal) = self.read::<UserSnapshot>(PRINCIPAL_KEY) {
            principal.username = username.to_string();
            self.0.insert(PRINCIPAL_KEY, &principal)?;
        }
        if self.read::<String>(USERNAME_KEY).is_some() {
            self.0.insert(USERNAME_KEY, username)?;
        }
        Ok(())
    }

    pub fn stash_oauth_state(&self, state: &str) -> Result<(), error::SystemError> {
        self.0.insert(OAUTH_STATE_KEY, state)?;
        Ok(())
    }

    /// Returns the pending federated login state and forgets it.
    pub fn take_oauth_state(&self) -> Option<String> {
        let state = self.read(OAUTH_STATE_KEY);
        self.0.remove(OAUTH_STATE_KEY);
        state
    }

    pub fn end(&self) {
        self.0.purge();
    }

    fn rotate(&self) {
        // Clearing and renewing issues a new session key while keeping the
        // request able to write into the fresh state.
        self.0.clear();
        self.0.renew();
    }

    fn write_flags(
        &self,
        user_id: i64,
        username: &str,
        role: &UserRole,
    ) -> Result<(), error::SystemError> {
        self.0.insert(USERNAME_KEY, username)?;
        self.0.insert(USER_ID_KEY, user_id)?;
        self.0.insert(IS_ADMIN_KEY, *role == UserRole::Admin)?;
        Ok(())
    }

    fn read<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.0.get::<T>(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Discarding unreadable session entry {key}: {e}");
                None
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
