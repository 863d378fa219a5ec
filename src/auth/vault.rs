use std::sync::Arc;

use axum::extract::FromRef;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{
    password::{hash_password, verify_password, DUMMY_HASH},
    repo::UserRepo,
    repo_types::{NewUser, User},
};
use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    state::AppState,
};

/// Salted one-way password storage keyed by unique username.
#[derive(Clone)]
pub struct CredentialVault {
    users: Arc<dyn UserRepo>,
    clock: Arc<dyn Clock>,
}

impl FromRef<AppState> for CredentialVault {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.users.clone(), state.clock.clone())
    }
}

impl CredentialVault {
    pub fn new(users: Arc<dyn UserRepo>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }

    pub async fn register(&self, username: &str, password: &str) -> AppResult<Uuid> {
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::DuplicateUsername);
        }

        let plain = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&plain))
            .await
            .map_err(|e| AppError::Internal(e.into()))??;

        // The repo still enforces uniqueness for registrations that race past the check above.
        let user = self
            .users
            .create(NewUser {
                id: Uuid::new_v4(),
                username: username.to_owned(),
                password_hash,
                created_at: self.clock.now(),
            })
            .await?;
        debug!(user_id = %user.id, "credentials stored");
        Ok(user.id)
    }

    pub async fn verify(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self.users.find_by_username(username).await?;
        let hash = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| DUMMY_HASH.to_owned());

        let plain = password.to_owned();
        let matches = tokio::task::spawn_blocking(move || verify_password(&plain, &hash))
            .await
            .map_err(|e| AppError::Internal(e.into()))??;

        match user {
            Some(user) if matches => Ok(user),
            Some(user) => {
                warn!(user_id = %user.id, "password mismatch");
                Err(AppError::InvalidCredentials)
            }
            None => {
                warn!("unknown username");
                Err(AppError::InvalidCredentials)
            }
        }
    }
}
