//! # Discount Rule Repository
//!
//! Reference data for the discount engine. Rows are returned ordered by
//! threshold for display, the engine does its own ordering.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbResult;
use salesdesk_core::validation::validate_discount_rule;
use salesdesk_core::{DiscountRule, DiscountTier, NewDiscountRule};

#[derive(Debug, Clone)]
pub struct DiscountRuleRepository {
    pool: SqlitePool,
}

impl DiscountRuleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        DiscountRuleRepository { pool }
    }

    /// Lists all rules, lowest threshold first.
    pub async fn list(&self) -> DbResult<Vec<DiscountRule>> {
        let rules = sqlx::query_as::<_, DiscountRule>(
            r#"
            SELECT id, min_amount_cents, percentage_bps
            FROM discount_rules
            ORDER BY min_amount_cents, rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rules.len(), "Listed discount rules");
        Ok(rules)
    }

    /// Loads the rules as engine tiers on the caller's connection, in
    /// insertion order.
    pub async fn tiers(conn: &mut SqliteConnection) -> DbResult<Vec<DiscountTier>> {
        let rules = sqlx::query_as::<_, DiscountRule>(
            "SELECT id, min_amount_cents, percentage_bps FROM discount_rules ORDER BY rowid",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(rules.iter().map(DiscountRule::tier).collect())
    }

    pub async fn create(&self, new: NewDiscountRule) -> DbResult<DiscountRule> {
        validate_discount_rule(&new)?;

        let rule = DiscountRule {
            id: Uuid::new_v4().to_string(),
            min_amount_cents: new.min_amount_cents,
            percentage_bps: new.percentage_bps,
        };

        sqlx::query(
            "INSERT INTO discount_rules (id, min_amount_cents, percentage_bps) VALUES (?1, ?2, ?3)",
        )
        .bind(&rule.id)
        .bind(rule.min_amount_cents)
        .bind(rule.percentage_bps)
        .execute(&self.pool)
        .await?;

        info!(
            min_amount_cents = rule.min_amount_cents,
            percentage_bps = rule.percentage_bps,
            "Discount rule created"
        );
        Ok(rule)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM discount_rules")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
