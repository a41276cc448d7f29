//! # Sale Module
//!
//! The in-progress sale draft and all register arithmetic.
//!
//! ## Recomputation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  One Recomputation Pass                                 │
//! │                                                                         │
//! │  UI mutates any field (line, discount, payment, tendered)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  recompute()                                                            │
//! │       │                                                                 │
//! │       ├── 1. subtotal  = Σ quantity × unit_price   (quantity > 0 only)  │
//! │       │                                                                 │
//! │       ├── 2. discount  = stored rate (already ceiling-corrected)        │
//! │       │       total    = subtotal − discount_amount                     │
//! │       │                                                                 │
//! │       └── 3. change    = state machine over (sale type, payment type)   │
//! │                                                                         │
//! │  Fixed order, no caching, cheap enough to run on every keystroke.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Discipline
//! Every numeric field that arrives as text parses permissively: garbage
//! quantities, prices, discounts, and tendered amounts absorb to zero and
//! the affected line simply stops contributing. The single place allowed to
//! refuse anything is [`SaleDraft::validate_for_commit`]: compute
//! defensively, but gate the irreversible action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{manual_product, Catalog, Resolved, MANUAL_PRODUCT_ID};
use crate::error::{CommitError, CoreError, CoreResult};
use crate::money::{DiscountRate, Money};
use crate::types::{
    ChangeResult, ClientRef, NewSale, NewSaleLine, PaymentType, Receipt, ReceiptLine, SaleType,
};
use crate::MAX_SALE_LINES;

/// Client name persisted for walk-in sales with no registered client.
pub const WALK_IN_CLIENT: &str = "Público General";

// =============================================================================
// Line Item
// =============================================================================

/// One line of the in-progress sale.
///
/// Description, classification, and unit price are frozen at the moment the
/// line is added; later catalog edits do not touch an open sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,
    pub description: String,
    pub classification: String,
    /// Parsed quantity; malformed input lands here as 0 and the line
    /// becomes inert (no total contribution, not persisted).
    pub quantity: i64,
    pub unit_price: Money,
}

impl LineItem {
    /// quantity × unit_price.
    #[inline]
    pub fn line_subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Whether this line participates in totals and persistence.
    #[inline]
    pub fn counts(&self) -> bool {
        self.quantity > 0
    }
}

/// Parses a quantity permissively: malformed or negative input becomes 0.
pub fn parse_quantity(raw: &str) -> i64 {
    match raw.trim().parse::<i64>() {
        Ok(qty) if qty > 0 => qty,
        _ => 0,
    }
}

// =============================================================================
// Totals
// =============================================================================

/// The derived figures for one recomputation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of line subtotals before discount.
    pub subtotal: Money,
    /// Effective discount rate.
    pub discount: DiscountRate,
    /// Amount the discount removes.
    pub discount_amount: Money,
    /// Final amount owed.
    pub total: Money,
    /// Change owed, shortfall, or the loan marker.
    pub change: ChangeResult,
}

/// Outcome of applying a discount entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountOutcome {
    /// The rate now stored on the draft.
    pub effective: DiscountRate,
    /// True when the raw input exceeded the 30% ceiling and was rejected;
    /// the UI must warn and rewrite its field with the effective value.
    pub clamped: bool,
}

// =============================================================================
// Change State Machine
// =============================================================================

/// Computes change owed for a given settlement combination.
///
/// ## State Machine
/// ```text
/// (sale type, payment type)
///        │
///        ├── sale type = Loan ──────────────► Loan (no comparison at all)
///        │
///        ├── payment ≠ Cash ────────────────► Change($0.00)
///        │                                    (non-cash settlement is exact)
///        │
///        └── payment = Cash ──┬─ tendered ≥ total ──► Change(tendered−total)
///                             └─ tendered < total ──► Shortfall(total−tendered)
/// ```
pub fn change_due(
    sale_type: SaleType,
    payment_type: PaymentType,
    tendered: Money,
    total: Money,
) -> ChangeResult {
    if sale_type == SaleType::Loan {
        return ChangeResult::Loan;
    }

    if payment_type != PaymentType::Cash {
        return ChangeResult::Change(Money::zero());
    }

    let change = tendered - total;
    if change.is_negative() {
        ChangeResult::Shortfall(change.abs())
    } else {
        ChangeResult::Change(change)
    }
}

// =============================================================================
// Sale Draft
// =============================================================================

/// The mutable in-progress sale owned by one register session.
///
/// Constructed empty, mutated line-by-line by the front end, consumed
/// exactly once at commit via [`SaleDraft::prepare_commit`]. After a
/// successful commit the session starts a fresh draft; nothing is shared
/// between sales.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaleDraft {
    client_id: Option<String>,
    client_name_override: String,
    sale_type: SaleType,
    payment_type: PaymentType,
    discount: DiscountRate,
    tendered: Money,
    lines: Vec<LineItem>,
}

impl SaleDraft {
    /// Creates an empty draft (cash sale, cash payment, no discount).
    pub fn new() -> Self {
        SaleDraft::default()
    }

    // -------------------------------------------------------------------------
    // Lines
    // -------------------------------------------------------------------------

    /// Adds a line by resolving the product id against the catalog.
    ///
    /// ## Pricing
    /// - Manual sentinel (`"0000"`): price comes from `manual_price_raw`;
    ///   an absent or malformed entry prices the line at $0.00; that is a
    ///   valid manual line, not an error.
    /// - Catalog product: the frozen catalog price.
    ///
    /// ## Quantity
    /// Parsed permissively; garbage becomes 0 and the line stays in the
    /// list but contributes nothing.
    ///
    /// ## Errors
    /// Unknown ids and empty ids error so the front end can report and skip
    /// the line; the draft itself is untouched in that case.
    ///
    /// Returns a copy of the line as added, for display.
    pub fn add_line(
        &mut self,
        catalog: &Catalog,
        product_id: &str,
        quantity_raw: &str,
        manual_price_raw: Option<&str>,
    ) -> CoreResult<LineItem> {
        if self.lines.len() >= MAX_SALE_LINES {
            return Err(CoreError::TooManyLines {
                max: MAX_SALE_LINES,
            });
        }

        let line = match catalog.resolve(product_id)? {
            Resolved::Manual => {
                let manual = manual_product();
                LineItem {
                    product_id: MANUAL_PRODUCT_ID.to_string(),
                    description: manual.description,
                    classification: manual.classification,
                    quantity: parse_quantity(quantity_raw),
                    unit_price: Money::parse_or_zero(manual_price_raw.unwrap_or("")),
                }
            }
            Resolved::Product(product) => LineItem {
                product_id: product.id.clone(),
                description: product.description.clone(),
                classification: product.classification.clone(),
                quantity: parse_quantity(quantity_raw),
                unit_price: product.unit_price,
            },
        };

        self.lines.push(line.clone());
        Ok(line)
    }

    /// Removes the most recently added line, mirroring the form's
    /// "- product" action.
    pub fn remove_last_line(&mut self) -> Option<LineItem> {
        self.lines.pop()
    }

    /// All lines in insertion order, inert ones included.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Lines that will be persisted (quantity > 0).
    pub fn committed_lines(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.iter().filter(|l| l.counts())
    }

    // -------------------------------------------------------------------------
    // Sale fields
    // -------------------------------------------------------------------------

    /// Selects a registered client (or clears the selection).
    pub fn set_client(&mut self, client_id: Option<String>) {
        self.client_id = client_id;
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// Sets the free-text client name; non-empty text wins over the
    /// registered selection when the sale is persisted.
    pub fn set_client_name_override(&mut self, name: impl Into<String>) {
        self.client_name_override = name.into();
    }

    /// Switches the sale type.
    ///
    /// Loan sales collect nothing: payment type is forced to NotApplicable
    /// and the tendered amount to zero. Leaving the loan type restores cash
    /// payment so the form comes back in a usable state.
    pub fn set_sale_type(&mut self, sale_type: SaleType) {
        self.sale_type = sale_type;

        if sale_type == SaleType::Loan {
            self.payment_type = PaymentType::NotApplicable;
            self.tendered = Money::zero();
        } else if self.payment_type == PaymentType::NotApplicable {
            self.payment_type = PaymentType::Cash;
        }
    }

    pub fn sale_type(&self) -> SaleType {
        self.sale_type
    }

    /// Switches the payment type. Ignored while the sale is a loan; the
    /// payment controls are disabled in that state.
    pub fn set_payment_type(&mut self, payment_type: PaymentType) {
        if self.sale_type != SaleType::Loan {
            self.payment_type = payment_type;
        }
    }

    pub fn payment_type(&self) -> PaymentType {
        self.payment_type
    }

    /// Records the tendered amount from free text (permissive; loans keep
    /// zero regardless of input).
    pub fn set_tendered(&mut self, raw: &str) {
        if self.sale_type != SaleType::Loan {
            self.tendered = Money::parse_or_zero(raw);
        }
    }

    pub fn tendered(&self) -> Money {
        self.tendered
    }

    /// Applies a discount entry.
    ///
    /// Parses permissively (trailing `%` allowed, garbage → 0%), then
    /// enforces the 30% ceiling: anything above it is rejected and the
    /// stored rate becomes exactly 30%, so every later recomputation uses
    /// the corrected value. The outcome tells the UI to warn and rewrite
    /// its discount field.
    pub fn apply_discount(&mut self, raw: &str) -> DiscountOutcome {
        let (effective, clamped) = DiscountRate::parse_percent(raw).clamp_to_ceiling();
        self.discount = effective;
        DiscountOutcome { effective, clamped }
    }

    pub fn discount(&self) -> DiscountRate {
        self.discount
    }

    // -------------------------------------------------------------------------
    // Derived figures
    // -------------------------------------------------------------------------

    /// Exact sum of `quantity × unit_price` over lines with quantity > 0.
    pub fn subtotal(&self) -> Money {
        self.committed_lines()
            .fold(Money::zero(), |acc, l| acc + l.line_subtotal())
    }

    /// Recomputes all derived figures: subtotal → discount → change, in
    /// that fixed order. Pure with respect to the draft state; the front
    /// end calls this after every field mutation.
    pub fn recompute(&self) -> Totals {
        let subtotal = self.subtotal();
        let discount_amount = self.discount.discount_amount(subtotal);
        let total = subtotal - discount_amount;
        let change = change_due(self.sale_type, self.payment_type, self.tendered, total);

        Totals {
            subtotal,
            discount: self.discount,
            discount_amount,
            total,
            change,
        }
    }

    // -------------------------------------------------------------------------
    // Commit
    // -------------------------------------------------------------------------

    /// Checks the business rules that gate a commit.
    ///
    /// - [`CommitError::NoItems`]: the subtotal is exactly zero; nothing
    ///   sellable on the draft.
    /// - [`CommitError::InsufficientPayment`]: cash payment on a non-loan
    ///   sale with tendered below the total. Unlike [`change_due`], which
    ///   merely reports the shortfall, this actively refuses to proceed.
    pub fn validate_for_commit(&self) -> Result<(), CommitError> {
        let totals = self.recompute();

        if totals.subtotal.is_zero() {
            return Err(CommitError::NoItems);
        }

        if self.sale_type != SaleType::Loan
            && self.payment_type == PaymentType::Cash
            && self.tendered < totals.total
        {
            return Err(CommitError::InsufficientPayment {
                tendered: self.tendered,
                total: totals.total,
            });
        }

        Ok(())
    }

    /// Resolves the client name that will be persisted and printed.
    ///
    /// Free text wins; otherwise the registered client's name; otherwise
    /// the generic walk-in label.
    pub fn client_display_name(&self, clients: &[ClientRef]) -> String {
        let override_name = self.client_name_override.trim();
        if !override_name.is_empty() {
            return override_name.to_string();
        }

        self.client_id
            .as_deref()
            .and_then(|id| clients.iter().find(|c| c.id == id))
            .map(|c| c.full_name.clone())
            .unwrap_or_else(|| WALK_IN_CLIENT.to_string())
    }

    /// Validates the draft and freezes it into a persistable sale.
    ///
    /// Loan rules are re-asserted here so a committed loan can never carry
    /// a payment, whatever path the draft state took.
    pub fn prepare_commit(
        &self,
        clients: &[ClientRef],
        now: DateTime<Utc>,
    ) -> Result<PreparedSale, CommitError> {
        self.validate_for_commit()?;

        let totals = self.recompute();

        let (payment_type, tendered) = if self.sale_type == SaleType::Loan {
            (PaymentType::NotApplicable, Money::zero())
        } else {
            (self.payment_type, self.tendered)
        };

        let sale = NewSale {
            created_at: now,
            client_id: self.client_id.clone(),
            client_name: self.client_display_name(clients),
            sale_type: self.sale_type,
            total: totals.total,
            discount: totals.discount,
            payment_type,
            tendered,
        };

        let lines = self
            .committed_lines()
            .map(|l| NewSaleLine {
                product_id: l.product_id.clone(),
                description: l.description.clone(),
                classification: l.classification.clone(),
                quantity: l.quantity,
                unit_price: l.unit_price,
                line_subtotal: l.line_subtotal(),
            })
            .collect();

        Ok(PreparedSale {
            sale,
            lines,
            subtotal: totals.subtotal,
            discount_amount: totals.discount_amount,
            change: change_due(self.sale_type, payment_type, tendered, totals.total),
        })
    }

    /// Resets the draft to a fresh sale (the "clear form" action and the
    /// state after a successful commit).
    pub fn clear(&mut self) {
        *self = SaleDraft::new();
    }
}

// =============================================================================
// Prepared Sale
// =============================================================================

/// A validated, frozen sale awaiting persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedSale {
    pub sale: NewSale,
    pub lines: Vec<NewSaleLine>,
    pub subtotal: Money,
    pub discount_amount: Money,
    pub change: ChangeResult,
}

impl PreparedSale {
    /// Builds the receipt snapshot once persistence has assigned an id.
    pub fn receipt(&self, sale_id: &str) -> Receipt {
        Receipt {
            id: sale_id.to_string(),
            timestamp: self.sale.created_at,
            client_name: self.sale.client_name.clone(),
            items: self
                .lines
                .iter()
                .map(|l| ReceiptLine {
                    product_id: l.product_id.clone(),
                    description: l.description.clone(),
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                    line_subtotal: l.line_subtotal,
                })
                .collect(),
            subtotal: self.subtotal,
            discount: self.sale.discount,
            discount_amount: self.discount_amount,
            total: self.sale.total,
            tendered: self.sale.tendered,
            change: self.change,
            payment_type: self.sale.payment_type,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product {
                id: "1001".to_string(),
                description: "Pulsera trenzada".to_string(),
                classification: "P".to_string(),
                unit_price: Money::from_cents(1550),
            },
            Product {
                id: "1002".to_string(),
                description: "Pulsera de plata".to_string(),
                classification: "S".to_string(),
                unit_price: Money::from_cents(6250),
            },
        ])
    }

    #[test]
    fn test_subtotal_sums_valid_lines_only() {
        let catalog = catalog();
        let mut draft = SaleDraft::new();

        draft.add_line(&catalog, "1001", "2", None).unwrap();
        draft.add_line(&catalog, "1002", "0", None).unwrap(); // inert
        draft.add_line(&catalog, "1001", "dos", None).unwrap(); // garbage qty → inert

        assert_eq!(draft.subtotal().cents(), 3100);
        assert_eq!(draft.lines().len(), 3);
        assert_eq!(draft.committed_lines().count(), 1);
    }

    #[test]
    fn test_unknown_product_is_rejected_without_touching_draft() {
        let catalog = catalog();
        let mut draft = SaleDraft::new();

        assert!(matches!(
            draft.add_line(&catalog, "9999", "1", None),
            Err(CoreError::ProductNotFound(_))
        ));
        assert!(draft.lines().is_empty());
    }

    #[test]
    fn test_manual_line_without_price_defaults_to_zero() {
        let catalog = catalog();
        let mut draft = SaleDraft::new();

        let line = draft.add_line(&catalog, "0000", "1", None).unwrap();
        assert_eq!(line.unit_price, Money::zero());
        assert_eq!(line.classification, "M");
        assert_eq!(line.description, "Otro/Manual");
    }

    #[test]
    fn test_manual_line_with_price() {
        let catalog = catalog();
        let mut draft = SaleDraft::new();

        let line = draft.add_line(&catalog, "0000", "3", Some("12.50")).unwrap();
        assert_eq!(line.unit_price.cents(), 1250);
        assert_eq!(line.line_subtotal().cents(), 3750);
    }

    #[test]
    fn test_discount_over_ceiling_is_rejected_and_overwritten() {
        let catalog = catalog();
        let mut draft = SaleDraft::new();
        draft.add_line(&catalog, "1001", "1", None).unwrap();

        let outcome = draft.apply_discount("45");
        assert!(outcome.clamped);
        assert_eq!(outcome.effective.bps(), 3000);
        // The stored rate is the corrected one: recomputing uses 30%, not 45%.
        assert_eq!(draft.discount().bps(), 3000);
        assert_eq!(draft.recompute().total.cents(), 1085); // 1550 − 465
    }

    #[test]
    fn test_discount_garbage_absorbs_to_zero() {
        let mut draft = SaleDraft::new();
        let outcome = draft.apply_discount("mucho");
        assert!(!outcome.clamped);
        assert!(outcome.effective.is_zero());
    }

    #[test]
    fn test_total_is_decimal_exact() {
        let catalog = catalog();
        let mut draft = SaleDraft::new();
        // $100.00 at 10% must be $90.00 exactly.
        draft.add_line(&catalog, "0000", "1", Some("100.00")).unwrap();
        draft.apply_discount("10");

        let totals = draft.recompute();
        assert_eq!(totals.subtotal.cents(), 10000);
        assert_eq!(totals.discount_amount.cents(), 1000);
        assert_eq!(totals.total.cents(), 9000);
    }

    #[test]
    fn test_change_due_loan_ignores_everything_else() {
        for payment in [
            PaymentType::Cash,
            PaymentType::Card,
            PaymentType::Deposit,
            PaymentType::NotApplicable,
        ] {
            let result = change_due(
                SaleType::Loan,
                payment,
                Money::from_cents(99999),
                Money::from_cents(1),
            );
            assert_eq!(result, ChangeResult::Loan);
        }
    }

    #[test]
    fn test_change_due_non_cash_is_exact_zero() {
        for payment in [PaymentType::Card, PaymentType::Deposit] {
            let result = change_due(
                SaleType::Cash,
                payment,
                Money::zero(),
                Money::from_cents(6250),
            );
            assert_eq!(result, ChangeResult::Change(Money::zero()));
        }
    }

    #[test]
    fn test_change_due_cash_amounts() {
        // tendered $50.00 against $62.50 → short $12.50
        assert_eq!(
            change_due(
                SaleType::Cash,
                PaymentType::Cash,
                Money::from_cents(5000),
                Money::from_cents(6250),
            ),
            ChangeResult::Shortfall(Money::from_cents(1250))
        );
        // tendered $70.00 against $62.50 → change $7.50
        assert_eq!(
            change_due(
                SaleType::Cash,
                PaymentType::Cash,
                Money::from_cents(7000),
                Money::from_cents(6250),
            ),
            ChangeResult::Change(Money::from_cents(750))
        );
    }

    #[test]
    fn test_garbage_tendered_reads_as_full_shortfall() {
        let catalog = catalog();
        let mut draft = SaleDraft::new();
        draft.add_line(&catalog, "1002", "1", None).unwrap();
        draft.set_tendered("sesenta");

        match draft.recompute().change {
            ChangeResult::Shortfall(missing) => assert_eq!(missing.cents(), 6250),
            other => panic!("expected shortfall, got {:?}", other),
        }
    }

    #[test]
    fn test_loan_forces_payment_fields() {
        let mut draft = SaleDraft::new();
        draft.set_payment_type(PaymentType::Card);
        draft.set_tendered("100.00");

        draft.set_sale_type(SaleType::Loan);
        assert_eq!(draft.payment_type(), PaymentType::NotApplicable);
        assert_eq!(draft.tendered(), Money::zero());

        // Controls stay locked while the loan type is active.
        draft.set_payment_type(PaymentType::Cash);
        draft.set_tendered("50.00");
        assert_eq!(draft.payment_type(), PaymentType::NotApplicable);
        assert_eq!(draft.tendered(), Money::zero());

        // Leaving the loan restores a usable payment state.
        draft.set_sale_type(SaleType::Cash);
        assert_eq!(draft.payment_type(), PaymentType::Cash);
    }

    #[test]
    fn test_validate_rejects_empty_sale() {
        let draft = SaleDraft::new();
        assert_eq!(draft.validate_for_commit(), Err(CommitError::NoItems));
    }

    #[test]
    fn test_validate_rejects_zero_subtotal_with_positive_quantities() {
        let catalog = catalog();
        let mut draft = SaleDraft::new();
        // A free manual line alone sells nothing.
        draft.add_line(&catalog, "0000", "2", None).unwrap();
        assert_eq!(draft.validate_for_commit(), Err(CommitError::NoItems));
    }

    #[test]
    fn test_validate_rejects_insufficient_cash() {
        let catalog = catalog();
        let mut draft = SaleDraft::new();
        draft.add_line(&catalog, "1002", "1", None).unwrap();
        draft.set_tendered("50.00");

        assert_eq!(
            draft.validate_for_commit(),
            Err(CommitError::InsufficientPayment {
                tendered: Money::from_cents(5000),
                total: Money::from_cents(6250),
            })
        );
    }

    #[test]
    fn test_validate_accepts_non_cash_underpayment() {
        let catalog = catalog();
        let mut draft = SaleDraft::new();
        draft.add_line(&catalog, "1002", "1", None).unwrap();
        draft.set_payment_type(PaymentType::Card);

        assert!(draft.validate_for_commit().is_ok());
    }

    #[test]
    fn test_validate_accepts_loan_without_payment() {
        let catalog = catalog();
        let mut draft = SaleDraft::new();
        draft.add_line(&catalog, "1002", "1", None).unwrap();
        draft.set_sale_type(SaleType::Loan);

        assert!(draft.validate_for_commit().is_ok());
    }

    #[test]
    fn test_client_display_name_resolution() {
        let clients = vec![ClientRef {
            id: "7".to_string(),
            full_name: "María López".to_string(),
        }];

        let mut draft = SaleDraft::new();
        assert_eq!(draft.client_display_name(&clients), WALK_IN_CLIENT);

        draft.set_client(Some("7".to_string()));
        assert_eq!(draft.client_display_name(&clients), "María López");

        draft.set_client_name_override("Tía Rosa");
        assert_eq!(draft.client_display_name(&clients), "Tía Rosa");
    }

    /// End-to-end arithmetic: two lines (catalog $15.50 × 2, manual $5.00
    /// × 1), 10% discount, $40.00 cash tendered.
    #[test]
    fn test_full_sale_scenario() {
        let catalog = catalog();
        let mut draft = SaleDraft::new();

        draft.add_line(&catalog, "1001", "2", None).unwrap();
        draft.add_line(&catalog, "0000", "1", Some("5.00")).unwrap();
        draft.apply_discount("10");
        draft.set_tendered("40.00");

        let totals = draft.recompute();
        assert_eq!(totals.subtotal.cents(), 3600);
        assert_eq!(totals.total.cents(), 3240);
        assert_eq!(totals.change, ChangeResult::Change(Money::from_cents(760)));

        let prepared = draft.prepare_commit(&[], Utc::now()).unwrap();
        assert_eq!(prepared.sale.total.cents(), 3240);
        assert_eq!(prepared.sale.client_name, WALK_IN_CLIENT);
        assert_eq!(prepared.lines.len(), 2);
        assert_eq!(prepared.lines[0].line_subtotal.cents(), 3100);
        assert_eq!(prepared.lines[1].line_subtotal.cents(), 500);

        let receipt = prepared.receipt("sale-42");
        assert_eq!(receipt.id, "sale-42");
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.total.cents(), 3240);
        assert_eq!(receipt.change, ChangeResult::Change(Money::from_cents(760)));
    }

    #[test]
    fn test_prepare_commit_loan_persists_no_payment() {
        let catalog = catalog();
        let mut draft = SaleDraft::new();
        draft.add_line(&catalog, "1002", "1", None).unwrap();
        draft.set_sale_type(SaleType::Loan);

        let prepared = draft.prepare_commit(&[], Utc::now()).unwrap();
        assert_eq!(prepared.sale.payment_type, PaymentType::NotApplicable);
        assert_eq!(prepared.sale.tendered, Money::zero());
        assert_eq!(prepared.change, ChangeResult::Loan);
    }

    #[test]
    fn test_inert_lines_are_not_committed() {
        let catalog = catalog();
        let mut draft = SaleDraft::new();
        draft.add_line(&catalog, "1001", "1", None).unwrap();
        draft.add_line(&catalog, "1002", "0", None).unwrap();

        let prepared = draft.prepare_commit(&[], Utc::now()).unwrap();
        assert_eq!(prepared.lines.len(), 1);
        assert_eq!(prepared.lines[0].product_id, "1001");
    }

    #[test]
    fn test_clear_resets_everything() {
        let catalog = catalog();
        let mut draft = SaleDraft::new();
        draft.add_line(&catalog, "1001", "2", None).unwrap();
        draft.apply_discount("15");
        draft.set_sale_type(SaleType::Loan);

        draft.clear();
        assert!(draft.lines().is_empty());
        assert!(draft.discount().is_zero());
        assert_eq!(draft.sale_type(), SaleType::Cash);
        assert_eq!(draft.payment_type(), PaymentType::Cash);
    }

    #[test]
    fn test_line_ceiling() {
        let catalog = catalog();
        let mut draft = SaleDraft::new();
        for _ in 0..MAX_SALE_LINES {
            draft.add_line(&catalog, "1001", "1", None).unwrap();
        }
        assert!(matches!(
            draft.add_line(&catalog, "1001", "1", None),
            Err(CoreError::TooManyLines { .. })
        ));
    }
}
