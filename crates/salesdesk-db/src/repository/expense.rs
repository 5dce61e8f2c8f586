//! # Expense Repository
//!
//! Business expenses. Independent of invoices and stock.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::error::DbResult;
use salesdesk_core::validation::validate_new_expense;
use salesdesk_core::{Expense, NewExpense};

#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// Lists expenses, newest first.
    pub async fn list(&self) -> DbResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, expense_type, amount_cents, description, created_at
            FROM expenses
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// Records an expense.
    pub async fn create(&self, new: NewExpense) -> DbResult<Expense> {
        validate_new_expense(&new)?;

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            expense_type: new.expense_type,
            amount_cents: new.amount_cents,
            description: new.description,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO expenses (id, expense_type, amount_cents, description, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&expense.id)
        .bind(expense.expense_type)
        .bind(expense.amount_cents)
        .bind(&expense.description)
        .bind(expense.created_at)
        .execute(&self.pool)
        .await?;

        info!(
            id = %expense.id,
            expense_type = %expense.expense_type,
            amount_cents = expense.amount_cents,
            "Expense recorded"
        );
        Ok(expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use salesdesk_core::ExpenseType;

    #[tokio::test]
    async fn test_create_and_list_newest_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.expenses();

        repo.create(NewExpense {
            expense_type: ExpenseType::Fuel,
            amount_cents: 500_000,
            description: Some("Diesel".to_string()),
        })
        .await
        .unwrap();
        repo.create(NewExpense {
            expense_type: ExpenseType::Maintenance,
            amount_cents: 250_000,
            description: None,
        })
        .await
        .unwrap();

        let expenses = repo.list().await.unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].expense_type, ExpenseType::Maintenance);
        assert_eq!(expenses[1].description.as_deref(), Some("Diesel"));
    }

    #[tokio::test]
    async fn test_rejects_non_positive_amount() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db
            .expenses()
            .create(NewExpense {
                expense_type: ExpenseType::Other,
                amount_cents: 0,
                description: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(_)));
        assert!(db.expenses().list().await.unwrap().is_empty());
    }
}
