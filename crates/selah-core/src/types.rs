//! # Domain Types
//!
//! Core domain types used throughout SELAH POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Client      │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id ("0000"=    │   │  id             │   │  id (UUID)      │       │
//! │  │      manual)    │   │  given/family   │   │  sale_type      │       │
//! │  │  classification │   │  contact info   │   │  totals         │       │
//! │  │  unit_price     │   │  flags          │   │  payment        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    SaleType     │   │  PaymentType    │   │  ChangeResult   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Cash           │   │  Cash           │   │  Change($)      │       │
//! │  │  OnAccount      │   │  Card           │   │  Shortfall($)   │       │
//! │  │  Loan           │   │  Deposit        │   │  Loan           │       │
//! │  │                 │   │  NotApplicable  │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Sale lines copy the product description, classification, and price at the
//! moment of sale, so receipts and history stay correct even if the catalog
//! changes afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{DiscountRate, Money};

// =============================================================================
// Product
// =============================================================================

/// A catalog entry available for sale.
///
/// The id `"0000"` is reserved for the synthetic manual entry (see
/// [`crate::catalog`]); its classification is always `"M"` and its price is
/// supplied by the cashier per line, never looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Business identifier, unique within the catalog.
    pub id: String,

    /// Display name shown to the cashier and on the receipt.
    pub description: String,

    /// Single-character category tag ("M" denotes manual entries).
    pub classification: String,

    /// Unit price. Immutable for the duration of a sale session.
    pub unit_price: Money,
}

impl Product {
    /// Checks whether this is the manual/free-form entry.
    #[inline]
    pub fn is_manual(&self) -> bool {
        self.classification == crate::catalog::MANUAL_CLASSIFICATION
    }
}

// =============================================================================
// Client
// =============================================================================

/// A registered client, as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub given_name: String,
    pub family_name: String,
    pub age: Option<i64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Preferred-customer flag.
    pub preferred: bool,
    /// Whether the client opted into promotions.
    pub receives_promos: bool,
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Full display name (given + family name).
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }

    /// Read-only projection used for selection lists.
    pub fn to_ref(&self) -> ClientRef {
        ClientRef {
            id: self.id.clone(),
            full_name: self.full_name(),
        }
    }
}

/// Read-only client projection for the selection combo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRef {
    pub id: String,
    pub full_name: String,
}

// =============================================================================
// Sale Type
// =============================================================================

/// How the sale is settled over time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum SaleType {
    /// Paid in full at the register ("Contado").
    #[default]
    Cash,
    /// Partial payment towards an account ("A cuenta").
    OnAccount,
    /// Goods handed over on trust, nothing collected ("A vistas").
    Loan,
}

impl SaleType {
    /// Label shown in the UI and on receipts.
    pub fn label(&self) -> &'static str {
        match self {
            SaleType::Cash => "Contado",
            SaleType::OnAccount => "A cuenta",
            SaleType::Loan => "A vistas",
        }
    }
}

// =============================================================================
// Payment Type
// =============================================================================

/// How the tendered amount was paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Physical cash ("Efectivo"); the only type where change is computed.
    #[default]
    Cash,
    /// Card terminal ("Tarjeta"); settlement assumed exact.
    Card,
    /// Bank deposit ("Deposito"); settlement assumed exact.
    Deposit,
    /// No payment collected ("N/A"); forced for loan sales.
    NotApplicable,
}

impl PaymentType {
    /// Label shown in the UI and on receipts.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::Cash => "Efectivo",
            PaymentType::Card => "Tarjeta",
            PaymentType::Deposit => "Deposito",
            PaymentType::NotApplicable => "N/A",
        }
    }
}

// =============================================================================
// Change Result
// =============================================================================

/// Outcome of comparing the tendered amount against the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum ChangeResult {
    /// Change owed to the customer (may be exactly zero for non-cash
    /// settlement).
    Change(Money),
    /// Tendered amount does not cover the total; carries the missing amount.
    Shortfall(Money),
    /// Loan sale: no payment is collected and no comparison is made.
    Loan,
}

impl ChangeResult {
    /// Checks whether the customer is owed or short nothing.
    pub fn is_settled(&self) -> bool {
        !matches!(self, ChangeResult::Shortfall(_))
    }
}

// =============================================================================
// Committed Sale
// =============================================================================

/// A sale ready for insertion; the persistence layer generates the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSale {
    pub created_at: DateTime<Utc>,
    /// Registered client reference, if one was selected.
    pub client_id: Option<String>,
    /// Display name persisted with the sale (free text wins over the
    /// registered name; unregistered walk-ins get a generic label).
    pub client_name: String,
    pub sale_type: SaleType,
    pub total: Money,
    pub discount: DiscountRate,
    pub payment_type: PaymentType,
    pub tendered: Money,
}

/// A sale line ready for insertion alongside its [`NewSale`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSaleLine {
    pub product_id: String,
    /// Description at time of sale (frozen).
    pub description: String,
    /// Classification at time of sale (frozen).
    pub classification: String,
    pub quantity: i64,
    /// Unit price at time of sale (frozen).
    pub unit_price: Money,
    /// quantity × unit_price.
    pub line_subtotal: Money,
}

/// A persisted sale, as read back from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub client_id: Option<String>,
    pub client_name: String,
    pub sale_type: SaleType,
    pub total: Money,
    pub discount: DiscountRate,
    pub payment_type: PaymentType,
    pub tendered: Money,
}

/// A persisted sale line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    pub description: String,
    pub classification: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_subtotal: Money,
}

// =============================================================================
// Receipt
// =============================================================================

/// Immutable snapshot of a committed sale, handed to the renderer.
///
/// This is the complete rendering contract: the renderer needs nothing
/// beyond this structure (plus its own store configuration) to produce the
/// printable ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Generated sale identifier.
    pub id: String,
    /// Commit timestamp.
    pub timestamp: DateTime<Utc>,
    pub client_name: String,
    pub items: Vec<ReceiptLine>,
    /// Sum of line subtotals before discount.
    pub subtotal: Money,
    /// Effective (post-ceiling) discount.
    pub discount: DiscountRate,
    /// Amount deducted by the discount.
    pub discount_amount: Money,
    /// Final amount owed.
    pub total: Money,
    pub tendered: Money,
    pub change: ChangeResult,
    pub payment_type: PaymentType,
}

/// One printed line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub product_id: String,
    pub description: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_subtotal: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_type_labels() {
        assert_eq!(SaleType::Cash.label(), "Contado");
        assert_eq!(SaleType::OnAccount.label(), "A cuenta");
        assert_eq!(SaleType::Loan.label(), "A vistas");
        assert_eq!(SaleType::default(), SaleType::Cash);
    }

    #[test]
    fn test_payment_type_labels() {
        assert_eq!(PaymentType::Cash.label(), "Efectivo");
        assert_eq!(PaymentType::NotApplicable.label(), "N/A");
        assert_eq!(PaymentType::default(), PaymentType::Cash);
    }

    #[test]
    fn test_client_full_name() {
        let client = Client {
            id: "7".to_string(),
            given_name: "María".to_string(),
            family_name: "López".to_string(),
            age: None,
            email: None,
            phone: None,
            address: None,
            preferred: false,
            receives_promos: true,
            created_at: Utc::now(),
        };
        assert_eq!(client.full_name(), "María López");
        assert_eq!(client.to_ref().full_name, "María López");
    }

    #[test]
    fn test_change_result_settled() {
        assert!(ChangeResult::Change(Money::from_cents(750)).is_settled());
        assert!(ChangeResult::Loan.is_settled());
        assert!(!ChangeResult::Shortfall(Money::from_cents(1250)).is_settled());
    }
}
