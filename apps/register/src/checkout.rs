//! # Checkout Orchestration
//!
//! The commit path: validate → persist transactionally → render the ticket.
//!
//! ## Commit Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  commit_sale(session)                                                   │
//! │                                                                         │
//! │  1. draft.prepare_commit()       ← the ONLY gate that may refuse        │
//! │       │   (NoItems / InsufficientPayment → back to the form)            │
//! │       ▼                                                                 │
//! │  2. reconnect if offline          ← persistence failure reported,       │
//! │       │                             draft kept intact for retry         │
//! │       ▼                                                                 │
//! │  3. sales().insert(sale, lines)   ← one transaction, all-or-nothing     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. prepared.receipt(sale_id) ──► render_to_file ──► ticket path        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. draft.clear()                 ← next sale starts empty              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A ticket-write failure after the insert does not undo the sale; the
//! money already changed hands and the row is the system of record; the
//! cashier gets the error and the sale id.

use std::path::PathBuf;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use selah_core::validation::{validate_age, validate_client_name};
use selah_core::{ChangeResult, Client, Money};
use selah_receipt::TicketRenderer;

use crate::error::AppError;
use crate::session::RegisterSession;

/// Outcome of a committed sale, for the confirmation screen.
pub struct CommitSummary {
    pub sale_id: String,
    pub total: Money,
    pub change: ChangeResult,
    pub ticket_path: PathBuf,
}

/// Commits the current draft: validate, persist, render, reset.
///
/// On any error the draft is left untouched so the cashier can correct and
/// retry; only a fully persisted sale clears the form.
pub async fn commit_sale(session: &mut RegisterSession) -> Result<CommitSummary, AppError> {
    let prepared = session
        .draft
        .prepare_commit(&session.clients, Utc::now())?;

    // A register that started offline may have its database back by now.
    if session.is_offline() {
        session.connect().await;
    }
    let db = session
        .db
        .as_ref()
        .ok_or_else(|| AppError::connection("No se pudo conectar a la base de datos"))?;

    let sale_id = db.sales().insert(&prepared.sale, &prepared.lines).await?;

    let receipt = prepared.receipt(&sale_id);
    let renderer = TicketRenderer::new(session.config.render_config());
    let ticket_path = renderer.render_to_file(&receipt, &session.config.tickets_dir)?;

    info!(sale_id = %sale_id, total = %prepared.sale.total, "Sale registered");

    session.new_sale();

    Ok(CommitSummary {
        sale_id,
        total: receipt.total,
        change: receipt.change,
        ticket_path,
    })
}

/// Input collected by the new-client form.
pub struct NewClientInput {
    pub given_name: String,
    pub family_name: String,
    pub age: Option<i64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub preferred: bool,
    pub receives_promos: bool,
}

/// Registers a new client and refreshes the selection list.
///
/// Returns the new client's id so the form can pre-select it.
pub async fn register_client(
    session: &mut RegisterSession,
    input: NewClientInput,
) -> Result<String, AppError> {
    validate_client_name("nombre", &input.given_name).map_err(selah_core::CoreError::from)?;
    validate_client_name("apellido", &input.family_name).map_err(selah_core::CoreError::from)?;
    validate_age(input.age).map_err(selah_core::CoreError::from)?;

    let db = session
        .db
        .as_ref()
        .ok_or_else(|| AppError::connection("No se pudo conectar a la base de datos"))?;

    let client = Client {
        id: Uuid::new_v4().to_string(),
        given_name: input.given_name.trim().to_string(),
        family_name: input.family_name.trim().to_string(),
        age: input.age,
        email: input.email,
        phone: input.phone,
        address: input.address,
        preferred: input.preferred,
        receives_promos: input.receives_promos,
        created_at: Utc::now(),
    };

    db.clients().insert(&client).await?;
    info!(id = %client.id, "Client registered");

    let id = client.id.clone();
    session.reload_reference_data().await?;

    Ok(id)
}
