//! # Catalog Module
//!
//! Session-scoped product catalog and line-item resolution.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cashier enters product id                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve(id) ── empty? ────────────► ValidationError (Required)         │
//! │       │                                                                 │
//! │       ├── id == "0000"? ───────────► Resolved::Manual                   │
//! │       │                              (price supplied by cashier)        │
//! │       │                                                                 │
//! │       ├── found in snapshot? ──────► Resolved::Product(&Product)        │
//! │       │                                                                 │
//! │       └── otherwise ───────────────► CoreError::ProductNotFound         │
//! │                                      (line is skipped, form survives)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is a snapshot loaded once per sale session; no module-level
//! state, no refresh during a sale. Staleness across a long-running session
//! is acceptable by design; prices are frozen onto lines when added anyway.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;

/// Reserved id of the manual/free-form entry.
pub const MANUAL_PRODUCT_ID: &str = "0000";

/// Classification tag of manual entries.
pub const MANUAL_CLASSIFICATION: &str = "M";

/// The synthetic manual catalog entry.
///
/// Always present regardless of what the persistence layer returned, so
/// manual sales keep working even when the database is unreachable. Its
/// price is a placeholder; the real price comes from the cashier per line.
pub fn manual_product() -> Product {
    Product {
        id: MANUAL_PRODUCT_ID.to_string(),
        description: "Otro/Manual".to_string(),
        classification: MANUAL_CLASSIFICATION.to_string(),
        unit_price: Money::zero(),
    }
}

/// Result of resolving a product id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// The manual sentinel: the caller must supply the price.
    Manual,
    /// A regular catalog product.
    Product(&'a Product),
}

/// A session-scoped catalog snapshot.
///
/// Built once from the product list at the start of a sale session and
/// passed by reference into the sale draft operations. Insertion order is
/// preserved for display listings.
#[derive(Debug, Clone)]
pub struct Catalog {
    by_id: HashMap<String, Product>,
    order: Vec<String>,
}

impl Catalog {
    /// Builds a catalog from loaded products, appending the manual entry.
    ///
    /// A loaded row that reuses the reserved manual id is ignored in favor
    /// of the synthetic entry.
    pub fn new(products: Vec<Product>) -> Self {
        let mut by_id = HashMap::with_capacity(products.len() + 1);
        let mut order = Vec::with_capacity(products.len() + 1);

        for product in products {
            if product.id == MANUAL_PRODUCT_ID {
                continue;
            }
            let id = product.id.clone();
            if by_id.insert(id.clone(), product).is_none() {
                order.push(id);
            }
        }

        let manual = manual_product();
        order.push(manual.id.clone());
        by_id.insert(manual.id.clone(), manual);

        Catalog { by_id, order }
    }

    /// The offline fallback: a catalog holding only the manual entry.
    pub fn manual_only() -> Self {
        Catalog::new(Vec::new())
    }

    /// Resolves a product id to a catalog entry or the manual marker.
    ///
    /// Pure lookup against the snapshot; no side effects.
    pub fn resolve(&self, product_id: &str) -> CoreResult<Resolved<'_>> {
        let product_id = product_id.trim();

        if product_id.is_empty() {
            return Err(ValidationError::Required {
                field: "product id".to_string(),
            }
            .into());
        }

        if product_id == MANUAL_PRODUCT_ID {
            return Ok(Resolved::Manual);
        }

        self.by_id
            .get(product_id)
            .map(Resolved::Product)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))
    }

    /// Products in load order (manual entry last), for display listings.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    /// Number of entries, including the manual one.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// A catalog is never empty: the manual entry is always present.
    pub fn is_empty(&self) -> bool {
        false
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
