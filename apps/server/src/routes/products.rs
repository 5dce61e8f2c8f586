//! Product catalog handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use salesdesk_core::dto::{CreateProductRequest, UpdateProductRequest};
use salesdesk_core::validation::validate_uuid;
use salesdesk_core::Product;

use crate::error::ApiResult;
use crate::state::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/products", get(list).post(create))
        .route("/api/products/{id}", get(get_by_id).put(update))
}

/// GET /api/products
async fn list(State(state): State<SharedState>) -> ApiResult<Json<Vec<Product>>> {
    let products = state.db.products().list().await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
async fn get_by_id(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    validate_uuid("id", &id)?;
    let product = state.db.products().get(&id).await?;
    Ok(Json(product))
}

/// POST /api/products
async fn create(
    State(state): State<SharedState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(request) = payload?;
    let product = state.db.products().create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    validate_uuid("id", &id)?;
    let Json(request) = payload?;
    let product = state.db.products().update(&id, request.into()).await?;
    Ok(Json(product))
}
