use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{require_credentials, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
        services::IdentityManager,
    },
    error::{AppError, AppResult},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

fn bad_body(rejection: JsonRejection) -> AppError {
    warn!(error = %rejection, "malformed auth body");
    AppError::InvalidRequest(rejection.body_text())
}

#[instrument(skip(identity, payload))]
pub async fn register(
    State(identity): State<IdentityManager>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(payload) = payload.map_err(bad_body)?;
    require_credentials(&payload.username, &payload.password)?;

    let confirmation = identity
        .register(&payload.username, &payload.password)
        .await
        .inspect_err(|e| {
            if matches!(e, AppError::DuplicateUsername) {
                warn!(username = %payload.username, "username already registered");
            }
        })?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}

#[instrument(skip(identity, payload))]
pub async fn login(
    State(identity): State<IdentityManager>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(payload) = payload.map_err(bad_body)?;

    // Empty fields fall through to the vault so they fail like any unknown user.
    let response = identity.login(&payload.username, &payload.password).await?;
    Ok(Json(response))
}
