use serde::{Deserialize, Serialize};

use crate::modules::user::schema::{UserEntity, UserRole};

/// Point-in-time copy of a user row kept in the session. Also used for the
/// federated principal, which carries the same fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub role: UserRole,
}

impl From<UserEntity> for UserSnapshot {
    fn from(user: UserEntity) -> Self {
        UserSnapshot {
            user_id: user.id,
            username: user.username,
            email: user.email,
            bio: Some(user.bio),
            role: user.role,
        }
    }
}

/// Discrete flags written at login. Only meaningful when both the name and id
/// are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionFlags {
    pub username: Option<String>,
    pub user_id: Option<i64>,
    pub is_admin: bool,
}

/// Every piece of identity evidence a session can hold.
#[derive(Debug, Clone, Default)]
pub struct SessionSources {
    pub cached: Option<UserSnapshot>,
    pub flags: SessionFlags,
    pub principal: Option<UserSnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
    pub email: Option<String>,
    pub bio: Option<String>,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl From<UserSnapshot> for Actor {
    fn from(snapshot: UserSnapshot) -> Self {
        Actor {
            user_id: snapshot.user_id,
            username: snapshot.username,
            role: snapshot.role,
            email: Some(snapshot.email),
            bio: snapshot.bio,
        }
    }
}

/// Resolved once per request and stored in the request extensions.
#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    Anonymous,
    Authenticated(Actor),
}

impl Identity {
    pub fn actor(&self) -> Option<&Actor> {
        match self {
            Identity::Authenticated(actor) => Some(actor),
            Identity::Anonymous => None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub user_id: i64,
    pub username: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub role: UserRole,
}

impl From<Actor> for CurrentUserResponse {
    fn from(actor: Actor) -> Self {
        CurrentUserResponse {
            user_id: actor.user_id,
            username: actor.username,
            email: actor.email,
            bio: actor.bio,
            role: actor.role,
        }
    }
}
