use log::info;
use std::sync::Arc;

use crate::{
    api::error,
    modules::{
        identity::model::UserSnapshot,
        user::{
            model::{
                AdminUpdateUserModel, AdminUserChanges, InsertUser, ProfileChanges, SignInModel,
                SignUpModel, UpdateProfileModel, UserResponse,
            },
            repository::UserRepository,
            schema::UserEntity,
        },
    },
    utils::{burn_password_check, hash_password, non_blank, verify_password},
};

/// Username attempts during federated provisioning: the base name, then `_1`..`_9`.
pub const MAX_PROVISION_ATTEMPTS: usize = 10;
pub const FEDERATED_BIO: &str = "Google User";
pub const USER_SEARCH_LIMIT: i64 = 10;

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";
const INVALID_LOGIN: &str = "Invalid username or password";

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository + Send + Sync>,
}

/// Collapses whitespace runs in a display name into single underscores,
/// falling back to the e-mail local part when nothing is left.
pub fn derive_username(display_name: &str, email: &str) -> String {
    let joined = display_name.split_whitespace().collect::<Vec<_>>().join("_");
    if !joined.is_empty() {
        return joined;
    }
    email.split('@').next().filter(|local| !local.is_empty()).unwrap_or("player").to_string()
}

impl UserService {
    pub fn with_dependencies(repo: Arc<dyn UserRepository + Send + Sync>) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo }
    }

    pub async fn register(&self, user: SignUpModel) -> Result<i64, error::SystemError> {
        let username = user.username.trim().to_string();
        let email = user.email.trim().to_lowercase();
        if username.is_empty() || email.is_empty() {
            return Err(error::SystemError::bad_request(
                "Username, email, and password are required.",
            ));
        }

        let (by_username, by_email) = tokio::try_join!(
            self.repo.find_by_username(&username),
            self.repo.find_by_email(&email),
        )?;
        if by_username.is_some() {
            return Err(error::SystemError::conflict("Username is already taken."));
        }
        if by_email.is_some() {
            return Err(error::SystemError::conflict("Email is already in use."));
        }

        let new_user = InsertUser {
            username,
            email,
            hash_password: hash_password(&user.password)?,
            bio: user.bio.map(|b| b.trim().to_string()).unwrap_or_default(),
        };

        // A concurrent signup can still win the race; the unique constraint
        // surfaces as a conflict through the error mapping.
        let created = self.repo.create(&new_user).await?;
        info!("Registered user {}", created.id);
        Ok(created.id)
    }

    /// Verifies a password login. Unknown users and wrong passwords fail the
    /// same way and cost one hash verification each.
    pub async fn login(&self, credentials: SignInModel) -> Result<UserEntity, error::SystemError> {
        let username = credentials.username.trim();

        let user = match self.repo.find_by_username(username).await? {
            Some(user) if !user.hash_password.is_empty() => user,
            _ => {
                burn_password_check(&credentials.password);
                return Err(error::SystemError::unauthorized(INVALID_LOGIN));
            }
        };

        if !verify_password(&user.hash_password, &credentials.password)? {
            return Err(error::SystemError::unauthorized(INVALID_LOGIN));
        }

        Ok(user)
    }

    /// Finds or creates the local account for a verified external identity.
    pub async fn provision_from_federated_identity(
        &self,
        email: &str,
        display_name: &str,
    ) -> Result<UserEntity, error::SystemError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(error::SystemError::bad_request("Federated identity carries no email"));
        }

        if let Some(existing) = self.repo.find_by_email(&email).await? {
            return Ok(existing);
        }

        let base = derive_username(display_name, &email);
        for attempt in 0..MAX_PROVISION_ATTEMPTS {
            let username = if attempt == 0 { base.clone() } else { format!("{base}_{attempt}") };
            let candidate = InsertUser {
                username,
                email: email.clone(),
                hash_password: String::new(),
                bio: FEDERATED_BIO.to_string(),
            };

            match self.repo.create(&candidate).await {
                Ok(user) => {
                    info!("Provisioned federated user {} as {}", user.id, user.username);
                    return Ok(user);
                }
                Err(e) if e.is_unique_violation_on(USERNAME_CONSTRAINT) => continue,
                Err(e) if e.is_unique_violation_on(EMAIL_CONSTRAINT) => {
                    // Another login for the same address got there first.
                    return self.repo.find_by_email(&email).await?.ok_or_else(|| {
                        error::SystemError::ProvisioningFailed(
                            "Account vanished during provisioning".into(),
                        )
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Err(error::SystemError::ProvisioningFailed(
            format!("No free username derived from {base}").into(),
        ))
    }

    /// Applies a self-service profile change and returns the new username if
    /// it changed.
    pub async fn update_profile(
        &self,
        user_id: i64,
        changes: UpdateProfileModel,
    ) -> Result<Option<String>, error::SystemError> {
        let username = non_blank(changes.username);
        let password = changes.password.filter(|p| !p.is_empty());
        let bio = changes.bio.map(|b| b.trim().to_string());

        if username.is_none() && password.is_none() && bio.is_none() {
            return Err(error::SystemError::bad_request("Nothing to update"));
        }

        if let Some(name) = &username {
            if self.repo.username_taken_by_other(name, user_id).await? {
                return Err(error::SystemError::conflict("Username already taken."));
            }
        }

        let hash_password = password.as_deref().map(hash_password).transpose()?;
        let profile = ProfileChanges { username: username.clone(), hash_password, bio };

        let updated = self.repo.update_profile(user_id, &profile).await.map_err(|e| {
            if e.is_unique_violation_on(USERNAME_CONSTRAINT) {
                error::SystemError::conflict("Username already taken.")
            } else {
                e
            }
        })?;

        if !updated {
            return Err(error::SystemError::not_found("User not found"));
        }

        Ok(username)
    }

    pub async fn list_users(&self) -> Result<Vec<UserResponse>, error::SystemError> {
        let users = self.repo.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get_user(&self, id: i64) -> Result<UserResponse, error::SystemError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| error::SystemError::not_found("User not found."))
    }

    pub async fn update_user_admin(
        &self,
        id: i64,
        changes: AdminUpdateUserModel,
    ) -> Result<(), error::SystemError> {
        let changes = AdminUserChanges {
            username: non_blank(changes.username),
            email: non_blank(changes.email).map(|e| e.to_lowercase()),
            bio: changes.bio.map(|b| b.trim().to_string()),
            role: changes.role,
        };

        if changes.username.is_none()
            && changes.email.is_none()
            && changes.bio.is_none()
            && changes.role.is_none()
        {
            return Err(error::SystemError::bad_request("No fields to update."));
        }

        if !self.repo.update_by_admin(id, &changes).await? {
            return Err(error::SystemError::not_found("User not found."));
        }
        Ok(())
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), error::SystemError> {
        if !self.repo.delete(id).await? {
            return Err(error::SystemError::not_found("User not found."));
        }
        info!("Deleted user {}", id);
        Ok(())
    }

    pub async fn search_users(&self, term: &str) -> Result<Vec<UserResponse>, error::SystemError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(error::SystemError::bad_request("Search term is required"));
        }
        let users = self.repo.search_users(term, USER_SEARCH_LIMIT).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Fresh copy of the user row for the session cache.
    pub async fn snapshot(&self, id: i64) -> Result<Option<UserSnapshot>, error::SystemError> {
        Ok(self.repo.find_by_id(id).await?.map(UserSnapshot::from))
    }
}
