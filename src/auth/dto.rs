use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration requires both fields to be non-empty.
pub(crate) fn require_credentials(username: &str, password: &str) -> AppResult<()> {
    if username.is_empty() {
        return Err(AppError::InvalidRequest("username is required".into()));
    }
    if password.is_empty() {
        return Err(AppError::InvalidRequest("password is required".into()));
    }
    Ok(())
}

/// Returned after a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

/// Returned after login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user_id: String,
    pub username: String,
}
