//! # Seed Tool
//!
//! Populates a database with the standard catalog and discount tiers.
//!
//! ## Usage
//! ```bash
//! # Seed ./salesdesk.db (default)
//! cargo run -p salesdesk-db --bin seed
//!
//! # Specify database path
//! cargo run -p salesdesk-db --bin seed -- --db ./data/salesdesk.db
//! ```
//!
//! Running it twice is harmless: existing products and rules are kept.

use std::env;

use salesdesk_db::seed::{seed_defaults, DEFAULT_CATALOG};
use salesdesk_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,salesdesk=debug,sqlx=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./salesdesk.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("SalesDesk Seed Tool");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./salesdesk.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
        i += 1;
    }

    println!("SalesDesk Seed Tool");
    println!("===================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let report = seed_defaults(&db).await?;

    println!(
        "✓ Products: {} inserted, {} already present (catalog of {})",
        report.products_inserted,
        report.products_skipped,
        DEFAULT_CATALOG.len()
    );
    if report.discount_rules_inserted > 0 {
        println!("✓ Discount tiers: {} inserted", report.discount_rules_inserted);
    } else {
        println!("⚠ Discount rules already configured, left unchanged");
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
