use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

/// Every failure the service can report to a caller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Username already exists")]
    DuplicateUsername,

    /// Unknown username and wrong password are deliberately the same variant.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid expense: {0}")]
    InvalidExpense(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Storage unavailable")]
    StorageUnavailable(#[source] anyhow::Error),

    #[error("Internal error")]
    Internal(#[source] anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DuplicateUsername
            | AppError::InvalidExpense(_)
            | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials
            | AppError::MissingToken
            | AppError::TokenInvalid
            | AppError::TokenExpired => StatusCode::UNAUTHORIZED,
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::DuplicateUsername => "duplicate_username",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::MissingToken => "missing_token",
            AppError::TokenInvalid => "token_invalid",
            AppError::TokenExpired => "token_expired",
            AppError::InvalidExpense(_) => "invalid_expense",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::StorageUnavailable(_) => "storage_unavailable",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Server-side causes are logged here and never sent to the client.
        match &self {
            AppError::StorageUnavailable(e) | AppError::Internal(e) => {
                error!(error = ?e, code = self.code(), "request failed");
            }
            _ => {}
        }
        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: self.code(),
        });
        (status, body).into_response()
    }
}

const USERNAME_CONSTRAINT: &str = "users_username_key";

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation()
                && db_err.constraint() == Some(USERNAME_CONSTRAINT)
            {
                return AppError::DuplicateUsername;
            }
        }
        AppError::StorageUnavailable(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(AppError::DuplicateUsername.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::TokenExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::TokenInvalid.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::InvalidExpense("amount".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::StorageUnavailable(anyhow::anyhow!("down")).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn error_body_hides_internal_cause() {
        let err = AppError::Internal(anyhow::anyhow!("secret detail"));
        assert_eq!(err.to_string(), "Internal error");
        assert_eq!(err.code(), "internal_error");
    }

    #[test]
    fn non_database_sqlx_error_is_storage_unavailable() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
    }

    #[test]
    fn error_response_serialization() {
        let body = ErrorResponse {
            error: AppError::DuplicateUsername.to_string(),
            code: AppError::DuplicateUsername.code(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("Username already exists"));
        assert!(json.contains("duplicate_username"));
    }
}
