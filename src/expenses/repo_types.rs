use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A single recorded expense. Never updated once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid, // owner
    pub amount: Decimal,
    pub category: String,
    pub note: String,
    pub date: OffsetDateTime, // attributed date, UTC
    pub created_at: OffsetDateTime,
}

/// Validated values ready for insertion.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub category: String,
    pub note: String,
    pub date: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

impl From<NewExpense> for Expense {
    fn from(n: NewExpense) -> Self {
        Self {
            id: n.id,
            user_id: n.user_id,
            amount: n.amount,
            category: n.category,
            note: n.note,
            date: n.date,
            created_at: n.created_at,
        }
    }
}
