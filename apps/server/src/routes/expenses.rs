//! Expense handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use salesdesk_core::dto::CreateExpenseRequest;
use salesdesk_core::{Expense, NewExpense};

use crate::error::ApiResult;
use crate::state::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new().route("/api/expenses", get(list).post(create))
}

/// GET /api/expenses
async fn list(State(state): State<SharedState>) -> ApiResult<Json<Vec<Expense>>> {
    let expenses = state.db.expenses().list().await?;
    Ok(Json(expenses))
}

/// POST /api/expenses
async fn create(
    State(state): State<SharedState>,
    payload: Result<Json<CreateExpenseRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let Json(request) = payload?;
    let new = NewExpense::try_from(request)?;
    let expense = state.db.expenses().create(new).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}
