use axum::extract::FromRef;
use tracing::info;

use super::{
    dto::{LoginResponse, RegisterResponse},
    jwt::JwtKeys,
    vault::CredentialVault,
};
use crate::{error::AppResult, state::AppState};

/// Registration and login on top of the vault and the token authority.
#[derive(Clone)]
pub struct IdentityManager {
    vault: CredentialVault,
    keys: JwtKeys,
}

impl FromRef<AppState> for IdentityManager {
    fn from_ref(state: &AppState) -> Self {
        Self::new(CredentialVault::from_ref(state), JwtKeys::from_ref(state))
    }
}

impl IdentityManager {
    pub fn new(vault: CredentialVault, keys: JwtKeys) -> Self {
        Self { vault, keys }
    }

    pub async fn register(&self, username: &str, password: &str) -> AppResult<RegisterResponse> {
        let user_id = self.vault.register(username, password).await?;
        info!(user_id = %user_id, username = %username, "user registered");
        Ok(RegisterResponse {
            message: "User registered successfully".into(),
        })
    }

    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResponse> {
        let user = self.vault.verify(username, password).await?;
        let access_token = self.keys.issue(user.id)?;
        info!(user_id = %user.id, username = %user.username, "user logged in");
        Ok(LoginResponse {
            access_token,
            user_id: user.id.to_string(),
            username: user.username,
        })
    }
}
