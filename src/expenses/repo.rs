use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Expense, NewExpense};
use crate::error::AppResult;

/// Append-only expense storage scoped by owner.
#[async_trait]
pub trait ExpenseRepo: Send + Sync {
    async fn insert(&self, expense: NewExpense) -> AppResult<Expense>;

    /// All expenses of one owner in insertion order; empty when there are none.
    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Expense>>;
}

#[derive(Clone)]
pub struct PgExpenseRepo {
    db: PgPool,
}

impl PgExpenseRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExpenseRepo for PgExpenseRepo {
    async fn insert(&self, expense: NewExpense) -> AppResult<Expense> {
        let row = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (id, user_id, amount, category, note, date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, amount, category, note, date, created_at
            "#,
        )
        .bind(expense.id)
        .bind(expense.user_id)
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(&expense.note)
        .bind(expense.date)
        .bind(expense.created_at)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Expense>> {
        let rows = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, user_id, amount, category, note, date, created_at
            FROM expenses
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
