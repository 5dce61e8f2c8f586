//! # salesdesk-server
//!
//! REST API over the SalesDesk database.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SalesDesk Server                                 │
//! │                                                                         │
//! │  Mobile client ───► HTTP (3000) ───► routes ───► salesdesk-db ───► SQLite│
//! │                                        │                                │
//! │                                        ▼                                │
//! │                                     ApiError                            │
//! │                            (status + {success, code, message})          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The binary in `main.rs` only wires configuration, the database and the
//! listener; everything else lives here so the integration tests can drive
//! the router directly.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::build_router;
pub use state::{AppState, SharedState};
