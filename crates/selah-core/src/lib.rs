//! # selah-core: Pure Business Logic for SELAH POS
//!
//! This crate is the **heart** of SELAH POS. It contains all register
//! arithmetic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SELAH POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Register Front End (CLI form)                  │   │
//! │  │    client ──► lines ──► discount ──► payment ──► commit         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ selah-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  catalog  │  │   sale    │  │   │
//! │  │   │  Product  │  │   Money   │  │  resolve  │  │ SaleDraft │  │   │
//! │  │   │  Client   │  │ Discount  │  │  "0000"   │  │ recompute │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌───────────────▼─────────┐  ┌─▼───────────────────────────────────┐  │
//! │  │   selah-db (SQLite)     │  │   selah-receipt (ticket rendering)  │  │
//! │  └─────────────────────────┘  └─────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Client, Sale, Receipt, etc.)
//! - [`money`] - Money and discount arithmetic (integer cents, no floats!)
//! - [`catalog`] - Catalog snapshot and line-item resolution
//! - [`sale`] - The sale draft: totals, discount, change, commit gate
//! - [`error`] - Domain error types
//! - [`validation`] - Strict input validation for registration paths
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every recomputation is deterministic
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64); no floats
//! 4. **Absorb, then gate**: malformed numeric input degrades to zero; only
//!    the commit gate may refuse to proceed
//!
//! ## Example Usage
//!
//! ```rust
//! use selah_core::catalog::Catalog;
//! use selah_core::money::Money;
//! use selah_core::sale::SaleDraft;
//!
//! let catalog = Catalog::manual_only();
//! let mut draft = SaleDraft::new();
//!
//! // A manually priced line: 2 × $15.50
//! draft.add_line(&catalog, "0000", "2", Some("15.50")).unwrap();
//! draft.apply_discount("10%");
//! draft.set_tendered("40.00");
//!
//! let totals = draft.recompute();
//! assert_eq!(totals.subtotal, Money::from_cents(3100));
//! assert_eq!(totals.total, Money::from_cents(2790));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use selah_core::Money` instead of
// `use selah_core::money::Money`

pub use catalog::{Catalog, Resolved, MANUAL_CLASSIFICATION, MANUAL_PRODUCT_ID};
pub use error::{CommitError, CoreError, CoreResult, ValidationError};
pub use money::{DiscountRate, Money};
pub use sale::{change_due, LineItem, PreparedSale, SaleDraft, Totals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Hard business ceiling on discounts: 30% in basis points.
///
/// Store policy, not a technical limit. Anything above it is rejected and
/// corrected down to this value (never silently scaled).
pub const MAX_DISCOUNT_BPS: u32 = 3000;

/// Maximum lines on a single sale.
///
/// Prevents a runaway form; a jewelry stand sale never approaches this.
pub const MAX_SALE_LINES: usize = 50;
