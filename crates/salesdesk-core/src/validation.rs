//! # Validation Module
//!
//! Input validation for SalesDesk requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (axum)                                          │
//! │  └── Type validation (JSON deserialization)                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation (names, quantities, amounts)             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE constraints                                     │
//! │  └── CHECK (stock >= 0)                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use salesdesk_core::validation::{validate_quantity, validate_store_name};
//!
//! validate_store_name("ABC Traders").unwrap();
//! validate_quantity(10).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::BPS_PER_WHOLE;
use crate::types::{InvoiceLine, NewDiscountRule, NewExpense, NewInvoice, NewProduct, ProductPatch};
use crate::{MAX_INVOICE_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_CONTACT_LEN: usize = 32;
const MAX_DESCRIPTION_LEN: usize = 500;

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a customer store name, the customer lookup key.
pub fn validate_store_name(name: &str) -> ValidationResult<()> {
    validate_text("storeName", name, MAX_NAME_LEN)
}

/// Validates a product name (English or localized).
///
/// ```rust
/// use salesdesk_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Soap Bar 100g").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_NAME_LEN)
}

/// Validates an optional contact number: digits, spaces, `+` and `-` only.
pub fn validate_contact_number(contact: Option<&str>) -> ValidationResult<()> {
    let Some(contact) = contact.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(());
    };

    if contact.len() > MAX_CONTACT_LEN {
        return Err(ValidationError::TooLong {
            field: "contactNumber".to_string(),
            max: MAX_CONTACT_LEN,
        });
    }

    if !contact
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '+' || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "contactNumber".to_string(),
            reason: "must contain only digits, spaces, '+' and '-'".to_string(),
        });
    }

    Ok(())
}

/// Validates a UUID string.
pub fn validate_uuid(field: &str, value: &str) -> ValidationResult<()> {
    uuid::Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: e.to_string(),
        })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an invoice line quantity: 1..=MAX_ITEM_QUANTITY.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a product price in minor units. Zero is allowed (free samples).
pub fn validate_price_cents(price: i64) -> ValidationResult<()> {
    if price < 0 {
        return Err(ValidationError::OutOfRange {
            field: "priceCents".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a stock level.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates an expense amount in minor units.
pub fn validate_expense_amount(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amountCents".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    if let Some(name_si) = &product.name_si {
        if name_si.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "nameSi".to_string(),
                max: MAX_NAME_LEN,
            });
        }
    }
    validate_price_cents(product.price_cents)?;
    validate_stock(product.stock)
}

pub fn validate_product_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if patch.is_empty() {
        return Err(ValidationError::Required {
            field: "at least one of name, nameSi, priceCents, stock".to_string(),
        });
    }
    if let Some(name) = &patch.name {
        validate_product_name(name)?;
    }
    if let Some(price) = patch.price_cents {
        validate_price_cents(price)?;
    }
    if let Some(stock) = patch.stock {
        validate_stock(stock)?;
    }
    Ok(())
}

/// Validates the lines of an invoice: 1..=MAX_INVOICE_ITEMS lines, each
/// with a product id and a valid quantity.
pub fn validate_invoice_lines(lines: &[InvoiceLine]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    if lines.len() > MAX_INVOICE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_INVOICE_ITEMS as i64,
        });
    }

    for line in lines {
        if line.product_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "items[].id".to_string(),
            });
        }
        validate_quantity(line.quantity)?;
    }

    Ok(())
}

pub fn validate_new_invoice(invoice: &NewInvoice) -> ValidationResult<()> {
    validate_store_name(&invoice.customer.store_name)?;
    validate_contact_number(invoice.customer.contact_number.as_deref())?;
    validate_invoice_lines(&invoice.lines)
}

pub fn validate_new_expense(expense: &NewExpense) -> ValidationResult<()> {
    validate_expense_amount(expense.amount_cents)?;
    if let Some(description) = &expense.description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::TooLong {
                field: "description".to_string(),
                max: MAX_DESCRIPTION_LEN,
            });
        }
    }
    Ok(())
}

/// Validates a discount rule: threshold ≥ 0, percentage in 0..=100%.
pub fn validate_discount_rule(rule: &NewDiscountRule) -> ValidationResult<()> {
    if rule.min_amount_cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "minAmountCents".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    if !(0..=BPS_PER_WHOLE as i64).contains(&rule.percentage_bps) {
        return Err(ValidationError::OutOfRange {
            field: "percentageBps".to_string(),
            min: 0,
            max: BPS_PER_WHOLE as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CustomerDetails, ExpenseType};

    fn invoice(store: &str, lines: Vec<InvoiceLine>) -> NewInvoice {
        NewInvoice {
            customer: CustomerDetails {
                store_name: store.to_string(),
                contact_number: Some("+94 77 123 4567".to_string()),
            },
            lines,
        }
    }

    fn line(quantity: i64) -> InvoiceLine {
        InvoiceLine {
            product_id: "p-1".to_string(),
            quantity,
        }
    }

    #[test]
    fn test_validate_store_name() {
        assert!(validate_store_name("ABC Traders").is_ok());
        assert!(matches!(
            validate_store_name("  "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_store_name(&"x".repeat(201)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_sinhala_name_counts_chars() {
        // multi-byte characters count once each
        let name = "සරල කුඩු 1kg".repeat(10);
        assert!(name.len() > 200);
        assert!(validate_product_name(&name).is_ok());
    }

    #[test]
    fn test_validate_contact_number() {
        assert!(validate_contact_number(None).is_ok());
        assert!(validate_contact_number(Some("")).is_ok());
        assert!(validate_contact_number(Some("077-1234567")).is_ok());
        assert!(validate_contact_number(Some("call me")).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_new_invoice() {
        assert!(validate_new_invoice(&invoice("ABC Traders", vec![line(10)])).is_ok());
        assert!(validate_new_invoice(&invoice("", vec![line(10)])).is_err());
        assert!(validate_new_invoice(&invoice("ABC Traders", vec![])).is_err());
        assert!(validate_new_invoice(&invoice("ABC Traders", vec![line(0)])).is_err());

        let too_many = (0..=MAX_INVOICE_ITEMS).map(|_| line(1)).collect();
        assert!(validate_new_invoice(&invoice("ABC Traders", too_many)).is_err());
    }

    #[test]
    fn test_validate_product_patch() {
        assert!(validate_product_patch(&ProductPatch::default()).is_err());
        let patch = ProductPatch {
            stock: Some(-1),
            ..Default::default()
        };
        assert!(validate_product_patch(&patch).is_err());
        let patch = ProductPatch {
            price_cents: Some(65_000),
            ..Default::default()
        };
        assert!(validate_product_patch(&patch).is_ok());
    }

    #[test]
    fn test_validate_new_expense() {
        let mut expense = NewExpense {
            expense_type: ExpenseType::Fuel,
            amount_cents: 500_000,
            description: None,
        };
        assert!(validate_new_expense(&expense).is_ok());
        expense.amount_cents = 0;
        assert!(matches!(
            validate_new_expense(&expense),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_validate_discount_rule() {
        let ok = NewDiscountRule {
            min_amount_cents: 500_000,
            percentage_bps: 200,
        };
        assert!(validate_discount_rule(&ok).is_ok());
        assert!(validate_discount_rule(&NewDiscountRule {
            min_amount_cents: -1,
            ..ok
        })
        .is_err());
        assert!(validate_discount_rule(&NewDiscountRule {
            percentage_bps: 10_001,
            ..ok
        })
        .is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("id", "not-a-uuid").is_err());
    }
}
