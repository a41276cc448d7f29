//! # Product Repository
//!
//! Database operations for the bracelet catalog.
//!
//! ## Permissive Price Loading
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products.unit_price is decimal TEXT ("15.50")                          │
//! │                                                                         │
//! │  The catalog table is maintained outside the register (imports, hand    │
//! │  edits), so a malformed price is expected data, not a bug:              │
//! │                                                                         │
//! │    "15.50"  ──► Money(1550)                                             │
//! │    "15,50"  ──► Money(0) + warn!   ← row survives, checkout continues   │
//! │                                                                         │
//! │  Failing the whole catalog load over one bad row would block every      │
//! │  sale; degrading one price to zero blocks none.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::DbResult;
use selah_core::{Money, Product};

/// Row shape for the products table.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    description: String,
    classification: String,
    unit_price: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let unit_price = match Money::parse(&row.unit_price) {
            Some(price) => price,
            None => {
                warn!(
                    id = %row.id,
                    raw = %row.unit_price,
                    "Malformed catalog price, degrading to 0.00"
                );
                Money::zero()
            }
        };

        Product {
            id: row.id,
            description: row.description,
            classification: row.classification,
            unit_price,
        }
    }
}

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the full catalog, ordered by id.
    ///
    /// This is the per-session load; the caller turns it into a
    /// `Catalog` snapshot (which appends the manual entry itself).
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        debug!("Loading product catalog");

        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, description, classification, unit_price
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Gets a product by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, description, classification, unit_price
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Inserts a catalog product, storing the price as canonical decimal
    /// text.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, description, classification, unit_price)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&product.id)
        .bind(&product.description)
        .bind(&product.classification)
        .bind(product.unit_price.decimal_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Number of catalog rows.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
