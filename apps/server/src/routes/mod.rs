//! # HTTP Routes
//!
//! ```text
//! GET    /api/health
//! GET    /api/products              POST /api/products
//! GET    /api/products/{id}         PUT  /api/products/{id}
//! POST   /api/invoices
//! GET    /api/invoices/lastInvoice  DELETE /api/invoices/lastInvoice
//! GET    /api/expenses              POST /api/expenses
//! GET    /api/discountRules
//! ```
//!
//! Every module exposes `router()` with its full paths; `build_router`
//! merges them and adds the tower-http layers.

pub mod discount_rules;
pub mod expenses;
pub mod health;
pub mod invoices;
pub mod products;

use axum::http::Uri;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::SharedState;

/// Builds the application router.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(products::router())
        .merge(invoices::router())
        .merge(expenses::router())
        .merge(discount_rules::router())
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        // the mobile client is served from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn fallback(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
