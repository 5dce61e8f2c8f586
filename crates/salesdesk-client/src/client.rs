//! HTTP client for the SalesDesk REST API

use reqwest::{Client, Method, RequestBuilder};
use salesdesk_core::dto::{
    CreateExpenseRequest, CreateInvoiceRequest, CreateInvoiceResponse, CreateProductRequest,
    DeleteInvoiceResponse, ErrorBody, HealthResponse, InvoiceView, LastInvoiceResponse,
    UpdateProductRequest,
};
use salesdesk_core::{DiscountRule, Expense, Product};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::{ClientConfig, ClientError, ClientResult};

/// Typed client, one method per endpoint.
#[derive(Debug, Clone)]
pub struct SalesClient {
    client: Client,
    base_url: String,
}

impl SalesClient {
    /// Create a new client from configuration
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/api/{}", self.base_url, path.trim_start_matches('/'));
        debug!(%method, %url, "Sending request");
        self.client.request(method, url)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => ClientError::Api {
                    status: status.as_u16(),
                    code: body.code,
                    message: body.message,
                },
                Err(_) => ClientError::Api {
                    status: status.as_u16(),
                    code: "UNKNOWN".to_string(),
                    message: text,
                },
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        Self::send(self.request(Method::GET, path)).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        Self::send(self.request(method, path).json(body)).await
    }

    // ========== Health ==========

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.get("health").await
    }

    // ========== Products ==========

    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.get("products").await
    }

    pub async fn get_product(&self, id: &str) -> ClientResult<Product> {
        self.get(&format!("products/{id}")).await
    }

    pub async fn create_product(&self, request: &CreateProductRequest) -> ClientResult<Product> {
        self.send_json(Method::POST, "products", request).await
    }

    pub async fn update_product(
        &self,
        id: &str,
        request: &UpdateProductRequest,
    ) -> ClientResult<Product> {
        self.send_json(Method::PUT, &format!("products/{id}"), request)
            .await
    }

    // ========== Invoices ==========

    /// Submit an invoice. Amounts in the response are the server's.
    pub async fn create_invoice(
        &self,
        request: &CreateInvoiceRequest,
    ) -> ClientResult<CreateInvoiceResponse> {
        self.send_json(Method::POST, "invoices", request).await
    }

    /// Most recent invoice with its customer and line items
    pub async fn last_invoice(&self) -> ClientResult<InvoiceView> {
        let response: LastInvoiceResponse = self.get("invoices/lastInvoice").await?;
        Ok(response.data)
    }

    /// Delete the most recent invoice, returning stock to the products
    pub async fn delete_last_invoice(&self) -> ClientResult<DeleteInvoiceResponse> {
        Self::send(self.request(Method::DELETE, "invoices/lastInvoice")).await
    }

    // ========== Expenses ==========

    pub async fn list_expenses(&self) -> ClientResult<Vec<Expense>> {
        self.get("expenses").await
    }

    pub async fn create_expense(&self, request: &CreateExpenseRequest) -> ClientResult<Expense> {
        self.send_json(Method::POST, "expenses", request).await
    }

    // ========== Discount rules ==========

    pub async fn discount_rules(&self) -> ClientResult<Vec<DiscountRule>> {
        self.get("discountRules").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_api_error_helpers() {
        let err = ClientError::Api {
            status: 404,
            code: "NOT_FOUND".to_string(),
            message: "No invoices found".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.code(), Some("NOT_FOUND"));
        assert_eq!(err.to_string(), "API error 404 [NOT_FOUND]: No invoices found");
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = SalesClient::new(ClientConfig::new("http://127.0.0.1:3000/")).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:3000");
    }

    #[test]
    fn test_request_url() {
        let client = SalesClient::new(
            ClientConfig::new("http://127.0.0.1:3000").with_timeout(Duration::from_secs(2)),
        )
        .unwrap();
        let request = client
            .request(Method::GET, "/invoices/lastInvoice")
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://127.0.0.1:3000/api/invoices/lastInvoice"
        );
    }
}
