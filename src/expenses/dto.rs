use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo_types::Expense;

/// `amount` may arrive as a JSON number or as a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(serde_json::Number),
    Text(String),
}

/// Request body for `POST /add-expense`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddExpenseRequest {
    pub amount: AmountInput,
    pub category: String,
    #[serde(default)]
    pub note: Option<String>,
    pub date: String, // ISO-8601, `Z` accepted
}

#[derive(Debug, Serialize)]
pub struct AddExpenseResponse {
    pub message: String,
    pub expense_id: String,
}

/// Wire shape of one expense in `GET /get-expenses`.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    pub note: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Expense> for ExpenseResponse {
    fn from(e: Expense) -> Self {
        Self {
            id: e.id.to_string(),
            user_id: e.user_id.to_string(),
            amount: e.amount,
            category: e.category,
            note: e.note,
            date: e.date,
            created_at: e.created_at,
        }
    }
}
