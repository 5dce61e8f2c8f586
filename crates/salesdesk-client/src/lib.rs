//! # salesdesk-client
//!
//! Typed HTTP client for the SalesDesk REST API.
//!
//! ```no_run
//! use salesdesk_client::{ClientConfig, SalesClient};
//!
//! # async fn run() -> Result<(), salesdesk_client::ClientError> {
//! let client = SalesClient::new(ClientConfig::from_env()?)?;
//! for product in client.list_products().await? {
//!     println!("{} ({} in stock)", product.name, product.stock);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::SalesClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, ClientResult};
