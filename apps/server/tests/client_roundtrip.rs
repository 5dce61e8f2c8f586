//! End-to-end: a real listener on 127.0.0.1:0 driven by salesdesk-client.

use std::time::Duration;

use salesdesk_client::{ClientConfig, ClientError, SalesClient};
use salesdesk_core::dto::{
    CreateExpenseRequest, CreateInvoiceRequest, CreateProductRequest, CustomerDetailsBody,
    InvoiceItemRequest, UpdateProductRequest,
};
use salesdesk_core::ExpenseType;
use salesdesk_db::seed::seed_defaults;
use salesdesk_db::{Database, DbConfig};
use salesdesk_server::{build_router, AppState};
use tokio::net::TcpListener;

async fn spawn_server() -> SalesClient {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    seed_defaults(&db).await.unwrap();
    let app = build_router(AppState::new(db));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    SalesClient::new(
        ClientConfig::new(format!("http://{addr}")).with_timeout(Duration::from_secs(10)),
    )
    .unwrap()
}

fn invoice(store_name: &str, items: Vec<(String, i64)>) -> CreateInvoiceRequest {
    CreateInvoiceRequest {
        customer_details: CustomerDetailsBody {
            store_name: store_name.to_string(),
            contact_number: None,
        },
        items: items
            .into_iter()
            .map(|(id, quantity)| InvoiceItemRequest {
                id,
                quantity,
                price: None,
                total: None,
            })
            .collect(),
        subtotal: None,
        discount: None,
        total: None,
    }
}

#[tokio::test]
async fn invoice_lifecycle_over_http() {
    let client = spawn_server().await;

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");

    let products = client.list_products().await.unwrap();
    assert_eq!(products.len(), 3);
    let detergent = products
        .iter()
        .find(|p| p.name == "Detergent Powder 1kg")
        .unwrap()
        .clone();
    assert_eq!(detergent.stock, 50);

    let created = client
        .create_invoice(&invoice("ABC Traders", vec![(detergent.id.clone(), 10)]))
        .await
        .unwrap();
    assert_eq!(created.subtotal, 1_200_000);
    assert_eq!(created.discount_rate_bps, 500);
    assert_eq!(created.discount, 60_000);
    assert_eq!(created.total, 1_140_000);
    assert_eq!(client.get_product(&detergent.id).await.unwrap().stock, 40);

    let latest = client.last_invoice().await.unwrap();
    assert_eq!(latest.id, created.invoice_id);
    assert_eq!(latest.customer.store_name, "ABC Traders");
    assert_eq!(latest.items.len(), 1);

    let deleted = client.delete_last_invoice().await.unwrap();
    assert_eq!(deleted.invoice_id, created.invoice_id);
    assert_eq!(deleted.restored.len(), 1);
    assert_eq!(deleted.restored[0].quantity, 10);
    assert_eq!(client.get_product(&detergent.id).await.unwrap().stock, 50);

    let err = client.delete_last_invoice().await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.code(), Some("NOT_FOUND"));
}

#[tokio::test]
async fn insufficient_stock_surfaces_as_api_error() {
    let client = spawn_server().await;

    let product = client
        .create_product(&CreateProductRequest {
            name: "Fabric Softener 1L".to_string(),
            name_si: None,
            price_cents: 55_000,
            stock: 5,
        })
        .await
        .unwrap();

    let err = client
        .create_invoice(&invoice("ABC Traders", vec![(product.id.clone(), 10)]))
        .await
        .unwrap_err();

    match err {
        ClientError::Api {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 400);
            assert_eq!(code, "INSUFFICIENT_STOCK");
            assert!(message.contains("Fabric Softener 1L"));
        }
        other => panic!("expected API error, got {other:?}"),
    }

    assert_eq!(client.get_product(&product.id).await.unwrap().stock, 5);
    assert!(client.last_invoice().await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn catalog_expenses_and_rules_over_http() {
    let client = spawn_server().await;

    let soap = client
        .list_products()
        .await
        .unwrap()
        .into_iter()
        .find(|p| p.name == "Soap Bar 100g")
        .unwrap();

    let updated = client
        .update_product(
            &soap.id,
            &UpdateProductRequest {
                price_cents: Some(19_500),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price_cents, 19_500);
    assert_eq!(updated.stock, soap.stock);

    let expense = client
        .create_expense(&CreateExpenseRequest {
            expense_type: "vehicle".to_string(),
            amount_cents: 250_000,
            description: Some("Tyre replacement".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(expense.expense_type, ExpenseType::Vehicle);

    let expenses = client.list_expenses().await.unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id, expense.id);

    let rules = client.discount_rules().await.unwrap();
    assert_eq!(rules.len(), 4);
    assert!(rules
        .windows(2)
        .all(|pair| pair[0].min_amount_cents <= pair[1].min_amount_cents));
}
