use std::{str::FromStr, sync::Arc};

use axum::extract::FromRef;
use rust_decimal::Decimal;
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime, UtcOffset,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::{
    dto::{AddExpenseRequest, AmountInput},
    repo::ExpenseRepo,
    repo_types::{Expense, NewExpense},
};
use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    state::AppState,
};

/// Parses a non-negative decimal amount; scientific notation is accepted.
///
/// Amounts are held to at most 28 decimal places, so a non-zero magnitude
/// below `1e-28` (e.g. `1e-30`) is rejected rather than silently rounded to zero.
pub fn parse_amount(input: &AmountInput) -> AppResult<Decimal> {
    let raw = match input {
        AmountInput::Number(n) => n.to_string(),
        AmountInput::Text(s) => s.trim().to_string(),
    };
    let amount = Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|e| {
            AppError::InvalidExpense(format!("amount {raw:?} is not a usable number: {e}"))
        })?;
    if amount < Decimal::ZERO {
        return Err(AppError::InvalidExpense("amount must not be negative".into()));
    }
    Ok(amount.normalize())
}

/// Parses the attributed date and normalises it to UTC.
///
/// Accepts ISO-8601 date-times with `T` or a space between date and time,
/// optional seconds and fractions, and either `Z`, a `±HH:MM` offset, or no
/// offset (read as UTC). A bare `YYYY-MM-DD` means midnight UTC.
pub fn parse_date(raw: &str) -> AppResult<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(dt.to_offset(UtcOffset::UTC));
    }

    let iso = canonical_iso(raw);
    if let Ok(dt) = OffsetDateTime::parse(
        &iso,
        format_description!(
            "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]][offset_hour sign:mandatory]:[offset_minute]"
        ),
    ) {
        return Ok(dt.to_offset(UtcOffset::UTC));
    }
    if let Ok(dt) = PrimitiveDateTime::parse(
        &iso,
        format_description!(
            "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
        ),
    ) {
        return Ok(dt.assume_utc());
    }
    if let Ok(d) = Date::parse(raw, format_description!("[year]-[month]-[day]")) {
        return Ok(d.midnight().assume_utc());
    }
    Err(AppError::InvalidExpense(format!("date {raw:?} is not a valid ISO-8601 date")))
}

/// `T` separator and numeric UTC offset, so one format covers every accepted spelling.
fn canonical_iso(raw: &str) -> String {
    let mut iso = raw.to_owned();
    if iso.as_bytes().get(10) == Some(&b' ') {
        iso.replace_range(10..11, "T");
    }
    if iso.ends_with('Z') {
        iso.truncate(iso.len() - 1);
        iso.push_str("+00:00");
    }
    iso
}

/// Append-only, owner-scoped expense records.
#[derive(Clone)]
pub struct ExpenseLedger {
    repo: Arc<dyn ExpenseRepo>,
    clock: Arc<dyn Clock>,
}

impl FromRef<AppState> for ExpenseLedger {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.expenses.clone(), state.clock.clone())
    }
}

impl ExpenseLedger {
    pub fn new(repo: Arc<dyn ExpenseRepo>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Validates and stores one expense. Nothing is written when validation fails;
    /// the category is free text and kept verbatim.
    pub async fn append(&self, owner_id: Uuid, req: AddExpenseRequest) -> AppResult<Uuid> {
        let amount = parse_amount(&req.amount)?;
        let date = parse_date(&req.date)?;

        let expense = self
            .repo
            .insert(NewExpense {
                id: Uuid::new_v4(),
                user_id: owner_id,
                amount,
                category: req.category,
                note: req.note.unwrap_or_default(),
                date,
                created_at: self.clock.now(),
            })
            .await?;
        info!(user_id = %owner_id, expense_id = %expense.id, "expense added");
        Ok(expense.id)
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Expense>> {
        let expenses = self.repo.list_by_owner(owner_id).await?;
        debug!(user_id = %owner_id, count = expenses.len(), "expenses loaded");
        Ok(expenses)
    }
}
