//! # Interactive Sale Form
//!
//! The register's front end: a prompt loop over the sale draft. Every
//! mutation goes through the draft's setters and the summary re-renders
//! from `recompute()`; no arithmetic lives in this module.
//!
//! Errors print and return to the menu; the form is always editable.

use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

use selah_core::{ChangeResult, PaymentType, SaleType, MANUAL_PRODUCT_ID};

use crate::checkout::{self, NewClientInput};
use crate::error::AppError;
use crate::session::RegisterSession;

const ACTIONS: &[&str] = &[
    "+ Producto",
    "- Producto",
    "Descuento (%)",
    "Tipo de venta",
    "Tipo de pago",
    "Pago recibido",
    "Cliente registrado",
    "Cliente (otro)",
    "Nuevo cliente",
    "Registrar venta",
    "Limpiar",
    "Salir",
];

/// Runs the form loop until the cashier exits.
pub async fn run(mut session: RegisterSession) -> Result<(), AppError> {
    banner(&session);

    loop {
        println!();
        render_summary(&session);

        let choice = Select::new()
            .with_prompt("Acción")
            .items(ACTIONS)
            .default(0)
            .interact()?;

        let result = match choice {
            0 => add_line(&mut session),
            1 => remove_line(&mut session),
            2 => set_discount(&mut session),
            3 => set_sale_type(&mut session),
            4 => set_payment_type(&mut session),
            5 => set_tendered(&mut session),
            6 => select_client(&mut session),
            7 => set_client_name(&mut session),
            8 => new_client(&mut session).await,
            9 => commit(&mut session).await,
            10 => {
                session.new_sale();
                println!("{}", "Formulario limpio".dimmed());
                Ok(())
            }
            _ => break,
        };

        if let Err(e) = result {
            println!("{}", e.message.red());
        }
    }

    Ok(())
}

fn banner(session: &RegisterSession) {
    println!(
        "{}",
        format!("{} TPV - Venta de Pulseras", session.config.store_name)
            .bold()
            .underline()
    );
    if session.is_offline() {
        println!(
            "{}",
            "Sin conexión a la base de datos: solo ventas manuales".yellow()
        );
    }
}

/// Redraws the draft summary from a fresh recomputation.
fn render_summary(session: &RegisterSession) {
    let draft = &session.draft;
    let totals = draft.recompute();

    println!("{}", "── Venta actual ──".dimmed());

    if draft.lines().is_empty() {
        println!("  {}", "(sin productos)".dimmed());
    }
    for line in draft.lines() {
        let rendered = format!(
            "  {} × {} ({}) @ {} = {}",
            line.quantity,
            line.description,
            line.product_id,
            line.unit_price,
            line.line_subtotal()
        );
        if line.counts() {
            println!("{}", rendered);
        } else {
            println!("{}", rendered.dimmed());
        }
    }

    println!(
        "  Cliente: {} | Venta: {} | Pago: {}",
        draft.client_display_name(&session.clients),
        draft.sale_type().label(),
        draft.payment_type().label()
    );

    println!("  Subtotal: {}", totals.subtotal);
    if !totals.discount.is_zero() {
        println!(
            "  Descuento ({}): -{}",
            totals.discount, totals.discount_amount
        );
    }
    println!("  {}", format!("TOTAL: {}", totals.total).green().bold());

    match totals.change {
        ChangeResult::Loan => println!("  {}", "Préstamo".bold()),
        ChangeResult::Change(change) => println!("  Cambio: {}", change),
        ChangeResult::Shortfall(missing) => {
            println!("  {}", format!("Faltan {}", missing).red())
        }
    }
}

fn add_line(session: &mut RegisterSession) -> Result<(), AppError> {
    let hint: Vec<String> = session
        .catalog
        .products()
        .map(|p| format!("{} {}", p.id, p.description))
        .collect();
    println!("{}", hint.join("  |  ").dimmed());

    let product_id: String = Input::new()
        .with_prompt("ID Producto")
        .allow_empty(true)
        .interact_text()?;
    let quantity: String = Input::new()
        .with_prompt("Cantidad")
        .allow_empty(true)
        .interact_text()?;

    let manual_price: Option<String> = if product_id.trim() == MANUAL_PRODUCT_ID {
        Some(
            Input::new()
                .with_prompt("Precio manual")
                .allow_empty(true)
                .interact_text()?,
        )
    } else {
        None
    };

    let line = session.draft.add_line(
        &session.catalog,
        &product_id,
        &quantity,
        manual_price.as_deref(),
    )?;

    println!(
        "Agregado: {} × {} = {}",
        line.quantity,
        line.description,
        line.line_subtotal()
    );
    Ok(())
}

fn remove_line(session: &mut RegisterSession) -> Result<(), AppError> {
    match session.draft.remove_last_line() {
        Some(line) => println!("Eliminado: {}", line.description),
        None => println!("{}", "(no hay líneas)".dimmed()),
    }
    Ok(())
}

fn set_discount(session: &mut RegisterSession) -> Result<(), AppError> {
    let raw: String = Input::new()
        .with_prompt("Descuento (%)")
        .allow_empty(true)
        .interact_text()?;

    let outcome = session.draft.apply_discount(&raw);
    if outcome.clamped {
        // The stored value is corrected to the ceiling; the field shows it.
        println!("{}", "El descuento máximo es 30%".yellow());
    }
    println!("Descuento aplicado: {}", outcome.effective);
    Ok(())
}

fn set_sale_type(session: &mut RegisterSession) -> Result<(), AppError> {
    let types = [SaleType::Cash, SaleType::OnAccount, SaleType::Loan];
    let labels: Vec<&str> = types.iter().map(|t| t.label()).collect();

    let choice = Select::new()
        .with_prompt("Tipo de venta")
        .items(&labels)
        .default(0)
        .interact()?;

    session.draft.set_sale_type(types[choice]);
    if types[choice] == SaleType::Loan {
        println!("{}", "Préstamo: sin pago ni cambio".dimmed());
    }
    Ok(())
}

fn set_payment_type(session: &mut RegisterSession) -> Result<(), AppError> {
    if session.draft.sale_type() == SaleType::Loan {
        return Err(AppError::validation(
            "El tipo de pago no aplica en un préstamo",
        ));
    }

    let types = [PaymentType::Cash, PaymentType::Card, PaymentType::Deposit];
    let labels: Vec<&str> = types.iter().map(|t| t.label()).collect();

    let choice = Select::new()
        .with_prompt("Tipo de pago")
        .items(&labels)
        .default(0)
        .interact()?;

    session.draft.set_payment_type(types[choice]);
    Ok(())
}

fn set_tendered(session: &mut RegisterSession) -> Result<(), AppError> {
    if session.draft.sale_type() == SaleType::Loan {
        return Err(AppError::validation("El pago no aplica en un préstamo"));
    }

    let raw: String = Input::new()
        .with_prompt("Pago recibido")
        .allow_empty(true)
        .interact_text()?;
    session.draft.set_tendered(&raw);
    Ok(())
}

fn select_client(session: &mut RegisterSession) -> Result<(), AppError> {
    let mut labels = vec!["(Ninguno)".to_string()];
    labels.extend(
        session
            .clients
            .iter()
            .map(|c| format!("{} - {}", c.id, c.full_name)),
    );

    let choice = Select::new()
        .with_prompt("Cliente registrado")
        .items(&labels)
        .default(0)
        .interact()?;

    let selection = if choice == 0 {
        None
    } else {
        Some(session.clients[choice - 1].id.clone())
    };
    session.draft.set_client(selection);
    Ok(())
}

fn set_client_name(session: &mut RegisterSession) -> Result<(), AppError> {
    let name: String = Input::new()
        .with_prompt("Cliente (otro)")
        .allow_empty(true)
        .interact_text()?;
    session.draft.set_client_name_override(name);
    Ok(())
}

async fn new_client(session: &mut RegisterSession) -> Result<(), AppError> {
    let given_name: String = Input::new().with_prompt("Nombre").interact_text()?;
    let family_name: String = Input::new().with_prompt("Apellido").interact_text()?;
    let age_raw: String = Input::new()
        .with_prompt("Edad")
        .allow_empty(true)
        .interact_text()?;
    let email: String = Input::new()
        .with_prompt("Correo")
        .allow_empty(true)
        .interact_text()?;
    let phone: String = Input::new()
        .with_prompt("Teléfono")
        .allow_empty(true)
        .interact_text()?;
    let address: String = Input::new()
        .with_prompt("Dirección")
        .allow_empty(true)
        .interact_text()?;
    let preferred = Confirm::new()
        .with_prompt("¿Cliente preferente?")
        .default(false)
        .interact()?;
    let receives_promos = Confirm::new()
        .with_prompt("¿Recibe promociones?")
        .default(true)
        .interact()?;

    let non_empty = |s: String| if s.trim().is_empty() { None } else { Some(s) };

    let input = NewClientInput {
        given_name,
        family_name,
        age: age_raw.trim().parse::<i64>().ok(),
        email: non_empty(email),
        phone: non_empty(phone),
        address: non_empty(address),
        preferred,
        receives_promos,
    };

    let client_id = checkout::register_client(session, input).await?;
    session.draft.set_client(Some(client_id));
    println!("{}", "Cliente registrado correctamente".green());
    Ok(())
}

async fn commit(session: &mut RegisterSession) -> Result<(), AppError> {
    let summary = checkout::commit_sale(session).await?;

    println!("{}", "Venta registrada correctamente".green().bold());
    println!("  Folio: {}", summary.sale_id);
    println!("  Total: {}", summary.total);
    match summary.change {
        ChangeResult::Loan => println!("  Préstamo: sin pago"),
        ChangeResult::Change(change) => println!("  Cambio: {}", change),
        // Blocked for cash by the commit gate; non-cash shortfalls settle
        // outside the register.
        ChangeResult::Shortfall(missing) => println!("  Falta: {}", missing),
    }
    println!("  Ticket: {}", summary.ticket_path.display());

    Ok(())
}
