//! # Sale Repository
//!
//! Database operations for committed sales.
//!
//! ## Commit Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    insert(sale, lines)                                  │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    INSERT INTO sales      (header, generated UUID)                      │
//! │    INSERT INTO sale_lines (line 1, frozen snapshot)                     │
//! │    INSERT INTO sale_lines (line 2, ...)                                 │
//! │  COMMIT ──────────────► returns the generated sale id                   │
//! │                                                                         │
//! │  Any failure before COMMIT rolls the whole sale back: there is never    │
//! │  a header without its lines or orphaned lines without a header.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use selah_core::{
    DiscountRate, Money, NewSale, NewSaleLine, PaymentType, Sale, SaleLine, SaleType,
};

/// Row shape for the sales table.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: String,
    created_at: DateTime<Utc>,
    client_id: Option<String>,
    client_name: String,
    sale_type: SaleType,
    total_cents: i64,
    discount_bps: i64,
    payment_type: PaymentType,
    tendered_cents: i64,
}

impl From<SaleRow> for Sale {
    fn from(row: SaleRow) -> Self {
        Sale {
            id: row.id,
            created_at: row.created_at,
            client_id: row.client_id,
            client_name: row.client_name,
            sale_type: row.sale_type,
            total: Money::from_cents(row.total_cents),
            discount: DiscountRate::from_bps(row.discount_bps as u32),
            payment_type: row.payment_type,
            tendered: Money::from_cents(row.tendered_cents),
        }
    }
}

/// Row shape for the sale_lines table.
#[derive(Debug, sqlx::FromRow)]
struct SaleLineRow {
    id: String,
    sale_id: String,
    product_id: String,
    description: String,
    classification: String,
    quantity: i64,
    unit_price_cents: i64,
    line_subtotal_cents: i64,
}

impl From<SaleLineRow> for SaleLine {
    fn from(row: SaleLineRow) -> Self {
        SaleLine {
            id: row.id,
            sale_id: row.sale_id,
            product_id: row.product_id,
            description: row.description,
            classification: row.classification,
            quantity: row.quantity,
            unit_price: Money::from_cents(row.unit_price_cents),
            line_subtotal: Money::from_cents(row.line_subtotal_cents),
        }
    }
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Inserts a sale header and all its lines in one transaction.
    ///
    /// ## Returns
    /// The generated sale id (UUID v4).
    ///
    /// ## Atomicity
    /// Header and lines succeed or fail together; a failure leaves no
    /// partial rows and the caller may retry the commit as-is.
    pub async fn insert(&self, sale: &NewSale, lines: &[NewSaleLine]) -> DbResult<String> {
        let sale_id = Uuid::new_v4().to_string();

        debug!(
            id = %sale_id,
            total = %sale.total,
            lines = lines.len(),
            "Inserting sale"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, created_at, client_id, client_name, sale_type,
                total_cents, discount_bps, payment_type, tendered_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&sale_id)
        .bind(sale.created_at)
        .bind(&sale.client_id)
        .bind(&sale.client_name)
        .bind(sale.sale_type)
        .bind(sale.total.cents())
        .bind(sale.discount.bps() as i64)
        .bind(sale.payment_type)
        .bind(sale.tendered.cents())
        .execute(&mut *tx)
        .await?;

        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO sale_lines (
                    id, sale_id, product_id, description, classification,
                    quantity, unit_price_cents, line_subtotal_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&sale_id)
            .bind(&line.product_id)
            .bind(&line.description)
            .bind(&line.classification)
            .bind(line.quantity)
            .bind(line.unit_price.cents())
            .bind(line.line_subtotal.cents())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(id = %sale_id, total = %sale.total, "Sale committed");

        Ok(sale_id)
    }

    /// Gets a sale by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let row: Option<SaleRow> = sqlx::query_as(
            r#"
            SELECT id, created_at, client_id, client_name, sale_type,
                   total_cents, discount_bps, payment_type, tendered_cents
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Sale::from))
    }

    /// Gets all lines for a sale, in insertion order.
    pub async fn get_lines(&self, sale_id: &str) -> DbResult<Vec<SaleLine>> {
        let rows: Vec<SaleLineRow> = sqlx::query_as(
            r#"
            SELECT id, sale_id, product_id, description, classification,
                   quantity, unit_price_cents, line_subtotal_cents
            FROM sale_lines
            WHERE sale_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SaleLine::from).collect())
    }

    /// Number of committed sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn new_sale(total_cents: i64, tendered_cents: i64) -> NewSale {
        NewSale {
            created_at: Utc::now(),
            client_id: None,
            client_name: "Público General".to_string(),
            sale_type: SaleType::Cash,
            total: Money::from_cents(total_cents),
            discount: DiscountRate::from_bps(1000),
            payment_type: PaymentType::Cash,
            tendered: Money::from_cents(tendered_cents),
        }
    }

    fn line(product_id: &str, quantity: i64, unit_price_cents: i64) -> NewSaleLine {
        NewSaleLine {
            product_id: product_id.to_string(),
            description: format!("Pulsera {}", product_id),
            classification: "P".to_string(),
            quantity,
            unit_price: Money::from_cents(unit_price_cents),
            line_subtotal: Money::from_cents(quantity * unit_price_cents),
        }
    }

    #[tokio::test]
    async fn test_insert_and_read_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.sales();

        // $15.50 × 2 plus a $5.00 manual line, 10% off → $32.40
        let lines = vec![line("1001", 2, 1550), line("0000", 1, 500)];
        let sale_id = repo.insert(&new_sale(3240, 4000), &lines).await.unwrap();

        let sale = repo.get_by_id(&sale_id).await.unwrap().unwrap();
        assert_eq!(sale.total, Money::from_cents(3240));
        assert_eq!(sale.discount.bps(), 1000);
        assert_eq!(sale.sale_type, SaleType::Cash);
        assert_eq!(sale.payment_type, PaymentType::Cash);

        let stored = repo.get_lines(&sale_id).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].line_subtotal, Money::from_cents(3100));
        assert_eq!(stored[1].line_subtotal, Money::from_cents(500));
        assert_eq!(stored[1].product_id, "0000");
    }

    #[tokio::test]
    async fn test_loan_sale_persists_no_payment() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.sales();

        let sale = NewSale {
            sale_type: SaleType::Loan,
            payment_type: PaymentType::NotApplicable,
            tendered: Money::zero(),
            ..new_sale(6250, 0)
        };
        let sale_id = repo.insert(&sale, &[line("1002", 1, 6250)]).await.unwrap();

        let stored = repo.get_by_id(&sale_id).await.unwrap().unwrap();
        assert_eq!(stored.sale_type, SaleType::Loan);
        assert_eq!(stored.payment_type, PaymentType::NotApplicable);
        assert_eq!(stored.tendered, Money::zero());
    }

    #[tokio::test]
    async fn test_failed_commit_leaves_no_partial_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.sales();

        // Break the line insert: the header insert inside the same
        // transaction must be rolled back with it.
        sqlx::query("DROP TABLE sale_lines")
            .execute(db.pool())
            .await
            .unwrap();

        let result = repo.insert(&new_sale(1550, 1550), &[line("1001", 1, 1550)]).await;
        assert!(result.is_err());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_client_reference_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.sales();

        let sale = NewSale {
            client_id: Some("no-such-client".to_string()),
            ..new_sale(1550, 1550)
        };
        let result = repo.insert(&sale, &[line("1001", 1, 1550)]).await;

        assert!(matches!(result, Err(DbError::ForeignKeyViolation { .. })));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_missing_sale() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.sales().get_by_id("missing").await.unwrap().is_none());
    }
}
