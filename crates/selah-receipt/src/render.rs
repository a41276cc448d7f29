//! Ticket rendering
//!
//! Turns a [`Receipt`] snapshot into a paginated printable ticket.
//!
//! ## Ticket Layout
//! ```text
//! ┌────────────────────────────────────┐
//! │            <logo block>            │  ← asset file, or placeholder
//! │       SELAH - TICKET DE VENTA      │
//! │ Fecha: 2026-08-05 17:42:10         │
//! │ Cliente: María López               │
//! │ Folio: 3f0c...                     │
//! │ ---------------------------------- │
//! │ Producto         Cód. Cant  Precio │
//! │ Pulsera trenzada 1001    2  $15.50 │  ← breaks onto further pages
//! │ ...                                │    when the table overflows
//! │ ---------------------------------- │
//! │ SUBTOTAL:                   $36.00 │
//! │ DESCUENTO (10.00%):         -$3.60 │
//! │ TOTAL A PAGAR:              $32.40 │
//! │ RECIBIDO:                   $40.00 │
//! │ CAMBIO:                      $7.60 │
//! │ Tipo de pago: Efectivo             │
//! │  Gracias por su compra. ¡Vuelva    │
//! │             pronto!                │
//! └────────────────────────────────────┘
//! ```
//!
//! A missing or unreadable logo asset degrades to a store-name placeholder;
//! rendering never fails because of it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use selah_core::{ChangeResult, Receipt};

use crate::document::{TicketBuilder, TicketDocument};
use crate::error::RenderResult;

// =============================================================================
// Configuration
// =============================================================================

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Store name, used in the title and as the logo placeholder.
    pub store_name: String,

    /// Optional path to a text logo asset (small ASCII banner).
    pub logo_path: Option<PathBuf>,

    /// Paper width in characters (48 suits 80mm thermal paper).
    pub width: usize,

    /// Lines per page before the ticket breaks onto a new page.
    pub page_height: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            store_name: "SELAH".to_string(),
            logo_path: None,
            width: 48,
            page_height: 60,
        }
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Renders receipts into paginated tickets.
#[derive(Debug, Clone)]
pub struct TicketRenderer {
    config: RenderConfig,
}

impl TicketRenderer {
    /// Creates a renderer with the given configuration.
    pub fn new(config: RenderConfig) -> Self {
        TicketRenderer { config }
    }

    /// Renders a receipt into a paginated ticket document. Infallible.
    pub fn render(&self, receipt: &Receipt) -> TicketDocument {
        let mut b = TicketBuilder::new(self.config.width);

        // Header / logo block
        for logo_line in self.logo_lines() {
            b.center(&logo_line);
        }
        b.blank();
        b.center(&format!("{} - TICKET DE VENTA", self.config.store_name));
        b.blank();

        // Sale details
        b.line(&format!(
            "Fecha: {}",
            receipt.timestamp.format("%Y-%m-%d %H:%M:%S")
        ));
        b.line(&format!("Cliente: {}", receipt.client_name));
        b.line(&format!("Folio: {}", receipt.id));
        b.blank();

        // Line-item table
        b.line(&self.item_row("Producto", "Cód.", "Cant", "Precio", "Subtotal"));
        b.sep_single();
        for item in &receipt.items {
            b.line(&self.item_row(
                &item.description,
                &item.product_id,
                &item.quantity.to_string(),
                &item.unit_price.to_string(),
                &item.line_subtotal.to_string(),
            ));
        }
        b.sep_single();

        // Totals block
        b.line_lr("SUBTOTAL:", &receipt.subtotal.to_string());
        if !receipt.discount.is_zero() {
            b.line_lr(
                &format!("DESCUENTO ({}):", receipt.discount),
                &format!("-{}", receipt.discount_amount),
            );
        }
        b.line_lr("TOTAL A PAGAR:", &receipt.total.to_string());

        match receipt.change {
            ChangeResult::Loan => {
                b.line_lr("PRESTAMO:", "sin pago");
            }
            ChangeResult::Change(change) => {
                b.line_lr("RECIBIDO:", &receipt.tendered.to_string());
                b.line_lr("CAMBIO:", &change.to_string());
            }
            ChangeResult::Shortfall(missing) => {
                b.line_lr("RECIBIDO:", &receipt.tendered.to_string());
                b.line_lr("FALTA:", &missing.to_string());
            }
        }

        // Footer
        b.line(&format!("Tipo de pago: {}", receipt.payment_type.label()));
        b.blank();
        b.center("Gracias por su compra. ¡Vuelva pronto!");

        b.paginate(self.config.page_height)
    }

    /// Renders and writes `ticket_<sale id>.txt` under `dir`.
    pub fn render_to_file(&self, receipt: &Receipt, dir: &Path) -> RenderResult<PathBuf> {
        let document = self.render(receipt);

        fs::create_dir_all(dir)?;
        let path = dir.join(format!("ticket_{}.txt", receipt.id));
        fs::write(&path, document.text())?;

        info!(
            path = %path.display(),
            pages = document.page_count(),
            "Ticket written"
        );

        Ok(path)
    }

    /// Loads the logo asset, falling back to a store-name placeholder.
    ///
    /// Must never fail: a missing image cannot be allowed to block a sale.
    fn logo_lines(&self) -> Vec<String> {
        if let Some(path) = &self.config.logo_path {
            match fs::read_to_string(path) {
                Ok(content) => {
                    return content.lines().map(|l| l.to_string()).collect();
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Logo asset unavailable, using placeholder"
                    );
                }
            }
        }

        vec![format!("* {} *", self.config.store_name.to_uppercase())]
    }

    /// Formats one table row: description | code | qty | price | subtotal.
    ///
    /// Description is truncated to fit; amounts are never truncated.
    fn item_row(&self, desc: &str, code: &str, qty: &str, price: &str, subtotal: &str) -> String {
        let dw = self.config.width.saturating_sub(29).max(10);
        let desc: String = desc.chars().take(dw).collect();
        format!(
            "{:<dw$} {:>5} {:>3} {:>8} {:>9}",
            desc,
            code,
            qty,
            price,
            subtotal,
            dw = dw
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use selah_core::{DiscountRate, Money, PaymentType, ReceiptLine};

    fn receipt(items: Vec<ReceiptLine>, change: ChangeResult) -> Receipt {
        let subtotal = items
            .iter()
            .fold(Money::zero(), |acc, i| acc + i.line_subtotal);
        let discount = DiscountRate::from_bps(1000);
        let discount_amount = discount.discount_amount(subtotal);

        Receipt {
            id: "sale-42".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 5, 17, 42, 10).unwrap(),
            client_name: "María López".to_string(),
            items,
            subtotal,
            discount,
            discount_amount,
            total: subtotal - discount_amount,
            tendered: Money::from_cents(4000),
            change,
            payment_type: PaymentType::Cash,
        }
    }

    fn item(product_id: &str, desc: &str, qty: i64, price_cents: i64) -> ReceiptLine {
        ReceiptLine {
            product_id: product_id.to_string(),
            description: desc.to_string(),
            quantity: qty,
            unit_price: Money::from_cents(price_cents),
            line_subtotal: Money::from_cents(qty * price_cents),
        }
    }

    #[test]
    fn test_ticket_contains_all_blocks() {
        let renderer = TicketRenderer::new(RenderConfig::default());
        let receipt = receipt(
            vec![
                item("1001", "Pulsera trenzada", 2, 1550),
                item("0000", "Otro/Manual", 1, 500),
            ],
            ChangeResult::Change(Money::from_cents(760)),
        );

        let text = renderer.render(&receipt).text();

        assert!(text.contains("SELAH - TICKET DE VENTA"));
        assert!(text.contains("Fecha: 2026-08-05 17:42:10"));
        assert!(text.contains("Cliente: María López"));
        assert!(text.contains("Folio: sale-42"));
        assert!(text.contains("Pulsera trenzada"));
        assert!(text.contains("$15.50"));
        assert!(text.contains("SUBTOTAL:"));
        assert!(text.contains("$36.00"));
        assert!(text.contains("DESCUENTO (10.00%):"));
        assert!(text.contains("-$3.60"));
        assert!(text.contains("TOTAL A PAGAR:"));
        assert!(text.contains("$32.40"));
        assert!(text.contains("CAMBIO:"));
        assert!(text.contains("$7.60"));
        assert!(text.contains("Tipo de pago: Efectivo"));
        assert!(text.contains("Gracias por su compra"));
    }

    #[test]
    fn test_shortfall_prints_missing_amount() {
        let renderer = TicketRenderer::new(RenderConfig::default());
        let receipt = receipt(
            vec![item("1010", "Pulsera de plata", 1, 6250)],
            ChangeResult::Shortfall(Money::from_cents(1250)),
        );

        let text = renderer.render(&receipt).text();
        assert!(text.contains("FALTA:"));
        assert!(text.contains("$12.50"));
        assert!(!text.contains("CAMBIO:"));
    }

    #[test]
    fn test_loan_prints_loan_marker_without_change() {
        let renderer = TicketRenderer::new(RenderConfig::default());
        let receipt = receipt(
            vec![item("1010", "Pulsera de plata", 1, 6250)],
            ChangeResult::Loan,
        );

        let text = renderer.render(&receipt).text();
        assert!(text.contains("PRESTAMO:"));
        assert!(!text.contains("CAMBIO:"));
        assert!(!text.contains("RECIBIDO:"));
    }

    #[test]
    fn test_zero_discount_line_is_omitted() {
        let renderer = TicketRenderer::new(RenderConfig::default());
        let mut r = receipt(
            vec![item("1001", "Pulsera trenzada", 1, 1550)],
            ChangeResult::Change(Money::zero()),
        );
        r.discount = DiscountRate::zero();
        r.discount_amount = Money::zero();
        r.total = r.subtotal;

        let text = renderer.render(&r).text();
        assert!(!text.contains("DESCUENTO"));
    }

    #[test]
    fn test_long_item_table_paginates() {
        let config = RenderConfig {
            page_height: 20,
            ..RenderConfig::default()
        };
        let renderer = TicketRenderer::new(config);

        let items: Vec<ReceiptLine> = (0..40)
            .map(|i| item(&format!("10{:02}", i), "Pulsera trenzada", 1, 1550))
            .collect();
        let receipt = receipt(items, ChangeResult::Change(Money::zero()));

        let doc = renderer.render(&receipt);
        assert!(doc.page_count() > 1);
        // Totals land on the final page.
        assert!(doc.pages().last().unwrap().contains("TOTAL A PAGAR:"));
    }

    #[test]
    fn test_missing_logo_falls_back_to_placeholder() {
        let config = RenderConfig {
            logo_path: Some(PathBuf::from("/definitely/not/here/logo.txt")),
            ..RenderConfig::default()
        };
        let renderer = TicketRenderer::new(config);
        let receipt = receipt(
            vec![item("1001", "Pulsera trenzada", 1, 1550)],
            ChangeResult::Change(Money::zero()),
        );

        // Never fails; placeholder header appears instead.
        let text = renderer.render(&receipt).text();
        assert!(text.contains("* SELAH *"));
    }

    #[test]
    fn test_logo_asset_is_used_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let logo_path = dir.path().join("logo.txt");
        fs::write(&logo_path, "<>< SELAH ><>\njoyeria artesanal").unwrap();

        let config = RenderConfig {
            logo_path: Some(logo_path),
            ..RenderConfig::default()
        };
        let renderer = TicketRenderer::new(config);
        let receipt = receipt(
            vec![item("1001", "Pulsera trenzada", 1, 1550)],
            ChangeResult::Change(Money::zero()),
        );

        let text = renderer.render(&receipt).text();
        assert!(text.contains("<>< SELAH ><>"));
        assert!(text.contains("joyeria artesanal"));
    }

    #[test]
    fn test_render_to_file_writes_ticket() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = TicketRenderer::new(RenderConfig::default());
        let receipt = receipt(
            vec![item("1001", "Pulsera trenzada", 1, 1550)],
            ChangeResult::Change(Money::zero()),
        );

        let path = renderer
            .render_to_file(&receipt, dir.path().join("tickets").as_path())
            .unwrap();

        assert!(path.ends_with("ticket_sale-42.txt"));
        let written = fs::read_to_string(path).unwrap();
        assert!(written.contains("TOTAL A PAGAR:"));
    }
}
