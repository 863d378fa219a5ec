use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::AuthUser,
    error::{AppError, AppResult},
    state::AppState,
};

use super::{
    dto::{AddExpenseRequest, AddExpenseResponse, ExpenseResponse},
    services::ExpenseLedger,
};

pub fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/add-expense", post(add_expense))
        .route("/get-expenses", get(get_expenses))
}

#[instrument(skip(ledger, payload))]
pub async fn add_expense(
    State(ledger): State<ExpenseLedger>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<AddExpenseRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AddExpenseResponse>)> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(%user_id, error = %rejection, "malformed expense body");
        AppError::InvalidExpense(rejection.body_text())
    })?;

    let expense_id = ledger.append(user_id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(AddExpenseResponse {
            message: "Expense added successfully".into(),
            expense_id: expense_id.to_string(),
        }),
    ))
}

#[instrument(skip(ledger))]
pub async fn get_expenses(
    State(ledger): State<ExpenseLedger>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Vec<ExpenseResponse>>> {
    let expenses = ledger.list_by_owner(user_id).await?;
    Ok(Json(expenses.into_iter().map(ExpenseResponse::from).collect()))
}
