//! # Default Data
//!
//! The agency's standard catalog and discount tiers, inserted by the
//! `seed` binary. Seeding is idempotent: products are matched by name and
//! discount rules are only inserted into an empty table.

use tracing::{debug, info};

use crate::error::DbResult;
use crate::pool::Database;
use salesdesk_core::{NewDiscountRule, NewProduct};

/// `(name, name_si, price_cents, stock)`
pub const DEFAULT_CATALOG: &[(&str, &str, i64, i64)] = &[
    ("Detergent Powder 1kg", "සරල කුඩු 1kg", 120_000, 50),
    ("Detergent Powder 500g", "සරල කුඩු 500g", 65_000, 75),
    ("Soap Bar 100g", "සබන් 100g", 18_000, 100),
];

/// `(min_amount_cents, percentage_bps)`
pub const DEFAULT_DISCOUNT_TIERS: &[(i64, i64)] = &[
    (500_000, 200),
    (1_000_000, 500),
    (2_500_000, 800),
    (5_000_000, 1_000),
];

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub products_inserted: usize,
    pub products_skipped: usize,
    pub discount_rules_inserted: usize,
}

/// Inserts the default catalog and discount tiers, skipping what exists.
pub async fn seed_defaults(db: &Database) -> DbResult<SeedReport> {
    let mut report = SeedReport::default();
    let products = db.products();

    for &(name, name_si, price_cents, stock) in DEFAULT_CATALOG {
        if products.find_by_name(name).await?.is_some() {
            debug!(name, "Product exists, skipping");
            report.products_skipped += 1;
            continue;
        }
        products
            .create(NewProduct {
                name: name.to_string(),
                name_si: Some(name_si.to_string()),
                price_cents,
                stock,
            })
            .await?;
        report.products_inserted += 1;
    }

    let rules = db.discount_rules();
    if rules.count().await? == 0 {
        for &(min_amount_cents, percentage_bps) in DEFAULT_DISCOUNT_TIERS {
            rules
                .create(NewDiscountRule {
                    min_amount_cents,
                    percentage_bps,
                })
                .await?;
            report.discount_rules_inserted += 1;
        }
    }

    info!(?report, "Seeding finished");
    Ok(report)
}
