use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use salesdesk_core::DiscountRule;

use crate::error::ApiResult;
use crate::state::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new().route("/api/discountRules", get(list))
}

/// GET /api/discountRules
async fn list(State(state): State<SharedState>) -> ApiResult<Json<Vec<DiscountRule>>> {
    let rules = state.db.discount_rules().list().await?;
    Ok(Json(rules))
}
