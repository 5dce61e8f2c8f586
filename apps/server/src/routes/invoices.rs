//! Invoice handlers.
//!
//! The server is the authority on amounts: totals are recomputed from the
//! product prices captured at reservation time. Amounts the client sends
//! along are only compared and logged.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use salesdesk_core::dto::{
    CreateInvoiceRequest, CreateInvoiceResponse, DeleteInvoiceResponse, InvoiceView,
    LastInvoiceResponse,
};
use tracing::warn;

use crate::error::ApiResult;
use crate::state::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/invoices", post(create))
        .route(
            "/api/invoices/lastInvoice",
            get(last_invoice).delete(delete_last_invoice),
        )
}

/// POST /api/invoices
async fn create(
    State(state): State<SharedState>,
    payload: Result<Json<CreateInvoiceRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreateInvoiceResponse>)> {
    let Json(request) = payload?;

    let created = state.db.invoices().create(request.to_new_invoice()).await?;

    for (field, client, server) in request.amount_mismatches(&created.totals) {
        warn!(
            invoice_id = %created.invoice_id,
            field,
            client,
            server,
            "Client amount differs from computed amount"
        );
    }
    for (product_id, client, server) in request.line_price_mismatches(&created.unit_prices_cents) {
        warn!(
            invoice_id = %created.invoice_id,
            product_id,
            client,
            server,
            "Client unit price differs from current product price"
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(CreateInvoiceResponse::new(
            created.invoice_id,
            created.sequence,
            &created.totals,
        )),
    ))
}

/// GET /api/invoices/lastInvoice
async fn last_invoice(State(state): State<SharedState>) -> ApiResult<Json<LastInvoiceResponse>> {
    let detail = state.db.invoices().latest().await?;
    Ok(Json(LastInvoiceResponse {
        success: true,
        data: InvoiceView::from(detail),
    }))
}

/// DELETE /api/invoices/lastInvoice
async fn delete_last_invoice(
    State(state): State<SharedState>,
) -> ApiResult<Json<DeleteInvoiceResponse>> {
    let deleted = state.db.invoices().delete_latest().await?;
    Ok(Json(DeleteInvoiceResponse {
        success: true,
        message: "Last invoice deleted successfully".to_string(),
        invoice_id: deleted.invoice_id,
        restored: deleted.restored,
    }))
}
