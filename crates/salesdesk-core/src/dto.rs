//! # Wire DTOs
//!
//! JSON request and response bodies of the REST API. The server deserializes
//! requests and serializes responses with these types, the client does the
//! reverse, so both sides agree on the shape by construction.
//!
//! All fields are camelCase on the wire. Money is integer minor units.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::totals::InvoiceTotals;
use crate::types::{
    Customer, CustomerDetails, ExpenseType, InvoiceDetail, InvoiceItem, InvoiceLine, NewExpense,
    NewInvoice, NewProduct, ProductPatch, RestoredStock,
};

// =============================================================================
// Products
// =============================================================================

/// Body of `POST /api/products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_si: Option<String>,
    pub price_cents: i64,
    #[serde(default)]
    pub stock: i64,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        NewProduct {
            name: req.name.trim().to_string(),
            name_si: req
                .name_si
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            price_cents: req.price_cents,
            stock: req.stock,
        }
    }
}

/// Body of `PUT /api/products/{id}`. Absent fields are left unchanged; a
/// blank `nameSi` clears the localized name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_si: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(req: UpdateProductRequest) -> Self {
        ProductPatch {
            name: req.name.map(|n| n.trim().to_string()),
            name_si: req.name_si.map(|n| {
                let n = n.trim();
                (!n.is_empty()).then(|| n.to_string())
            }),
            price_cents: req.price_cents,
            stock: req.stock,
        }
    }
}

// =============================================================================
// Invoices
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetailsBody {
    pub store_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
}

/// One line of `POST /api/invoices`.
///
/// `price` and `total` are what the client displayed. They are compared
/// against the server's numbers but never trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemRequest {
    /// Product id.
    pub id: String,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

/// Body of `POST /api/invoices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub customer_details: CustomerDetailsBody,
    pub items: Vec<InvoiceItemRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

impl CreateInvoiceRequest {
    /// Converts to the domain input, dropping the advisory amounts.
    pub fn to_new_invoice(&self) -> NewInvoice {
        NewInvoice {
            customer: CustomerDetails {
                store_name: self.customer_details.store_name.trim().to_string(),
                contact_number: self
                    .customer_details
                    .contact_number
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string),
            },
            lines: self
                .items
                .iter()
                .map(|item| InvoiceLine {
                    product_id: item.id.trim().to_string(),
                    quantity: item.quantity,
                })
                .collect(),
        }
    }

    /// Lists the client-sent amounts that disagree with `totals`.
    ///
    /// Returns `(field, client, server)` triples.
    pub fn amount_mismatches(&self, totals: &InvoiceTotals) -> Vec<(&'static str, i64, i64)> {
        [
            ("subtotal", self.subtotal, totals.subtotal.minor()),
            ("discount", self.discount, totals.discount.minor()),
            ("total", self.total, totals.total.minor()),
        ]
        .into_iter()
        .filter_map(|(field, client, server)| {
            client
                .filter(|c| *c != server)
                .map(|c| (field, c, server))
        })
        .collect()
    }

    /// Lists lines whose client-sent unit price differs from the snapshot
    /// price. `unit_prices` is in request order.
    ///
    /// Returns `(product_id, client, server)` triples.
    pub fn line_price_mismatches<'a>(&'a self, unit_prices: &[i64]) -> Vec<(&'a str, i64, i64)> {
        self.items
            .iter()
            .zip(unit_prices)
            .filter_map(|(item, &server)| {
                item.price
                    .filter(|client| *client != server)
                    .map(|client| (item.id.as_str(), client, server))
            })
            .collect()
    }
}

/// Response of `POST /api/invoices` (201).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceResponse {
    pub invoice_id: String,
    pub sequence: i64,
    pub subtotal: i64,
    pub discount_rate_bps: u32,
    pub discount: i64,
    pub total: i64,
}

impl CreateInvoiceResponse {
    pub fn new(invoice_id: String, sequence: i64, totals: &InvoiceTotals) -> Self {
        CreateInvoiceResponse {
            invoice_id,
            sequence,
            subtotal: totals.subtotal.minor(),
            discount_rate_bps: totals.discount_rate.bps(),
            discount: totals.discount.minor(),
            total: totals.total.minor(),
        }
    }
}

/// Product view on an invoice line: the frozen name and price, plus the
/// current product reference (`None` once the product is gone).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemProduct {
    pub id: Option<String>,
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemView {
    pub id: String,
    pub product_id: Option<String>,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
    pub product: InvoiceItemProduct,
}

impl From<InvoiceItem> for InvoiceItemView {
    fn from(item: InvoiceItem) -> Self {
        InvoiceItemView {
            product: InvoiceItemProduct {
                id: item.product_id.clone(),
                name: item.name_snapshot,
                price: item.unit_price_cents,
            },
            id: item.id,
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price_cents: item.unit_price_cents,
            line_total_cents: item.line_total_cents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceView {
    pub id: String,
    pub sequence: i64,
    pub customer_id: String,
    pub subtotal: i64,
    pub discount_rate_bps: i64,
    pub discount: i64,
    pub total: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub customer: Customer,
    pub items: Vec<InvoiceItemView>,
}

impl From<InvoiceDetail> for InvoiceView {
    fn from(detail: InvoiceDetail) -> Self {
        let InvoiceDetail {
            invoice,
            customer,
            items,
        } = detail;
        InvoiceView {
            id: invoice.id,
            sequence: invoice.sequence,
            customer_id: invoice.customer_id,
            subtotal: invoice.subtotal_cents,
            discount_rate_bps: invoice.discount_rate_bps,
            discount: invoice.discount_cents,
            total: invoice.total_cents,
            created_at: invoice.created_at,
            customer,
            items: items.into_iter().map(InvoiceItemView::from).collect(),
        }
    }
}

/// Response of `GET /api/invoices/lastInvoice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LastInvoiceResponse {
    pub success: bool,
    pub data: InvoiceView,
}

/// Response of `DELETE /api/invoices/lastInvoice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeleteInvoiceResponse {
    pub success: bool,
    pub message: String,
    pub invoice_id: String,
    pub restored: Vec<RestoredStock>,
}

// =============================================================================
// Expenses
// =============================================================================

/// Body of `POST /api/expenses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    /// One of `vehicle`, `maintenance`, `fuel`, `other`.
    #[serde(rename = "type")]
    pub expense_type: String,
    pub amount_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TryFrom<CreateExpenseRequest> for NewExpense {
    type Error = ValidationError;

    fn try_from(req: CreateExpenseRequest) -> Result<Self, Self::Error> {
        Ok(NewExpense {
            expense_type: req.expense_type.parse::<ExpenseType>()?,
            amount_cents: req.amount_cents,
            description: req
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        })
    }
}

// =============================================================================
// Misc
// =============================================================================

/// Response of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorBody {
    pub success: bool,
    pub code: String,
    pub message: String,
}
