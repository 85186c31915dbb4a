use crate::modules::{
    identity::{
        model::{Actor, Identity, SessionSources},
        session::SessionContext,
    },
    user::{schema::UserRole, service::UserService},
};

/// Picks the actor from the session evidence: cached snapshot first, then the
/// login flags, then the federated principal.
pub fn resolve(sources: &SessionSources) -> Identity {
    if let Some(cached) = &sources.cached {
        return Identity::Authenticated(Actor::from(cached.clone()));
    }

    if let (Some(username), Some(user_id)) = (&sources.flags.username, sources.flags.user_id) {
        return Identity::Authenticated(Actor {
            user_id,
            username: username.clone(),
            role: if sources.flags.is_admin { UserRole::Admin } else { UserRole::User },
            email: None,
            bio: None,
        });
    }

    if let Some(principal) = &sources.principal {
        return Identity::Authenticated(Actor::from(principal.clone()));
    }

    Identity::Anonymous
}

/// Resolves the request's identity, filling the session cache from the user
/// store the first time an uncached session is seen.
pub async fn resolve_request(session: &SessionContext, users: &UserService) -> Identity {
    let sources = session.sources();
    if sources.cached.is_some() {
        return resolve(&sources);
    }

    let user_id = match resolve(&sources) {
        Identity::Authenticated(actor) => actor.user_id,
        Identity::Anonymous => return Identity::Anonymous,
    };

    match users.snapshot(user_id).await {
        Ok(Some(snapshot)) => {
            if let Err(e) = session.cache_snapshot(&snapshot) {
                log::warn!("Failed to cache user {} in session: {:?}", user_id, e);
            }
            Identity::Authenticated(Actor::from(snapshot))
        }
        Ok(None) => {
            log::info!("Session refers to missing user {}", user_id);
            Identity::Anonymous
        }
        Err(e) => {
            log::error!("Identity lookup for user {} failed: {:?}", user_id, e);
            Identity::Anonymous
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::identity::model::{SessionFlags, UserSnapshot};
    use rstest::{fixture, rstest};

    fn snapshot(user_id: i64, username: &str, role: UserRole) -> UserSnapshot {
        UserSnapshot {
            user_id,
            username: username.into(),
            email: format!("{username}@example.com"),
            bio: None,
            role,
        }
    }

    #[fixture]
    fn all_sources() -> SessionSources {
        SessionSources {
            cached: Some(snapshot(1, "cached", UserRole::Admin)),
            flags: SessionFlags { username: Some("flagged".into()), user_id: Some(2), is_admin: false },
            principal: Some(snapshot(3, "principal", UserRole::User)),
        }
    }

    fn resolved_id(identity: Identity) -> Option<i64> {
        identity.actor().map(|a| a.user_id)
    }

    #[rstest]
    fn cache_wins_over_everything(all_sources: SessionSources) {
        let identity = resolve(&all_sources);
        assert_eq!(resolved_id(identity.clone()), Some(1));
        assert!(identity.actor().is_some_and(Actor::is_admin));
    }

    #[rstest]
    fn flags_win_over_principal(mut all_sources: SessionSources) {
        all_sources.cached = None;
        let identity = resolve(&all_sources);
        assert_eq!(resolved_id(identity.clone()), Some(2));
        assert!(identity.actor().is_some_and(|a| !a.is_admin() && a.email.is_none()));
    }

    #[rstest]
    fn incomplete_flags_fall_through_to_principal(mut all_sources: SessionSources) {
        all_sources.cached = None;
        all_sources.flags.user_id = None;
        assert_eq!(resolved_id(resolve(&all_sources)), Some(3));
    }

    #[test]
    fn empty_session_is_anonymous() {
        assert_eq!(resolve(&SessionSources::default()), Identity::Anonymous);
    }
}
