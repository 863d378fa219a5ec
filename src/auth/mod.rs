use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod jwt;
mod password;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod vault;

pub use jwt::{AuthUser, JwtKeys};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes())
}
