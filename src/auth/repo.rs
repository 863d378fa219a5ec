use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::{NewUser, User};
use crate::error::AppResult;

/// Persistence for user records.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Fails with `DuplicateUsername` when the username is taken.
    async fn create(&self, user: NewUser) -> AppResult<User>;
}

#[derive(Clone)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password.
    async fn create(&self, user: NewUser) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }
}
