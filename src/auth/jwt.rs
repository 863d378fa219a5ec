use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    clock::Clock,
    config::JwtConfig,
    error::{AppError, AppResult},
    state::AppState,
};

/// JWT payload used for authentication.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,   // user ID
    pub exp: i64,    // expires at (unix timestamp)
    pub iat: i64,    // issued at (unix timestamp)
    pub iss: String, // issuer
    pub aud: String, // audience
}

/// Signs and validates session tokens with the process-wide secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.jwt, state.clock.clone())
    }
}

impl JwtKeys {
    pub fn new(cfg: &JwtConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl: Duration::minutes(cfg.ttl_minutes),
            clock,
        }
    }

    pub fn issue(&self, user_id: Uuid) -> AppResult<String> {
        let now = self.clock.now();
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp(),
            exp: (now + self.ttl).unix_timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(e.into()))?;
        debug!(user_id = %user_id, "jwt signed");
        Ok(token)
    }

    /// Returns the subject of a well-formed, correctly signed, unexpired token.
    pub fn validate(&self, token: &str) -> AppResult<Uuid> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        // Expiry is checked below against the injected clock, without leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            debug!(error = %e, "jwt rejected");
            AppError::TokenInvalid
        })?;

        if self.clock.now().unix_timestamp() >= data.claims.exp {
            return Err(AppError::TokenExpired);
        }
        debug!(user_id = %data.claims.sub, "jwt verified");
        Ok(data.claims.sub)
    }
}

/// Extracts and validates the bearer token, yielding the caller's user ID.
pub struct AuthUser(pub Uuid);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::MissingToken)?;

        // Expect "Bearer <token>"
        let token = match auth_header.split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
            _ => return Err(AppError::TokenInvalid),
        };

        match keys.validate(token) {
            Ok(user_id) => Ok(AuthUser(user_id)),
            Err(e) => {
                warn!(reason = e.code(), "bearer token rejected");
                Err(e)
            }
        }
    }
}
