use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                     // unique user ID
    pub username: String,             // case-sensitive, never renamed
    #[serde(skip_serializing)]
    pub password_hash: String,        // Argon2 PHC string, not exposed in JSON
    pub created_at: OffsetDateTime,   // creation timestamp
}

/// Values for a user insert; the id and timestamp are chosen by the caller.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

impl From<NewUser> for User {
    fn from(n: NewUser) -> Self {
        Self {
            id: n.id,
            username: n.username,
            password_hash: n.password_hash,
            created_at: n.created_at,
        }
    }
}
