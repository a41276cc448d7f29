//! # Seed Data Generator
//!
//! Populates the database with the bracelet catalog and a few clients for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed into the default dev database
//! cargo run -p selah-db --bin seed
//!
//! # Specify database path
//! cargo run -p selah-db --bin seed -- --db ./data/selah.db
//! ```

use chrono::Utc;
use std::env;
use uuid::Uuid;

use selah_core::validation::{validate_classification, validate_description, validate_product_id};
use selah_core::{Client, Money, Product};
use selah_db::{Database, DbConfig};

/// The dev catalog: (id, description, classification, price).
///
/// Classifications: P = pulsera (woven), S = silver, G = gold-plated,
/// C = charm. "0000" is reserved for manual lines and never seeded.
const CATALOG: &[(&str, &str, &str, &str)] = &[
    ("1001", "Pulsera trenzada roja", "P", "15.50"),
    ("1002", "Pulsera trenzada azul", "P", "15.50"),
    ("1003", "Pulsera de hilo encerado", "P", "12.00"),
    ("1010", "Pulsera de plata lisa", "S", "62.50"),
    ("1011", "Pulsera de plata con dijes", "S", "85.00"),
    ("1012", "Pulsera de plata martillada", "S", "78.00"),
    ("1020", "Pulsera chapa de oro", "G", "120.00"),
    ("1021", "Pulsera chapa con piedras", "G", "145.00"),
    ("1030", "Dije corazón", "C", "25.00"),
    ("1031", "Dije inicial", "C", "22.50"),
    ("1032", "Dije estrella", "C", "25.00"),
];

/// Dev clients: (given name, family name, age).
const CLIENTS: &[(&str, &str, i64)] = &[
    ("María", "López", 34),
    ("Ana", "Brito", 28),
    ("Rosa", "Camacho", 51),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./selah_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("SELAH POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./selah_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("SELAH POS Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding catalog...");

    for (id, description, classification, price) in CATALOG {
        validate_product_id(id)?;
        validate_description(description)?;
        validate_classification(classification)?;

        let product = Product {
            id: (*id).to_string(),
            description: (*description).to_string(),
            classification: (*classification).to_string(),
            unit_price: Money::parse(price).ok_or("malformed seed price")?,
        };
        db.products().insert(&product).await?;
    }

    println!("✓ Seeded {} products", CATALOG.len());

    println!("Seeding clients...");

    for (given, family, age) in CLIENTS {
        let client = Client {
            id: Uuid::new_v4().to_string(),
            given_name: (*given).to_string(),
            family_name: (*family).to_string(),
            age: Some(*age),
            email: None,
            phone: None,
            address: None,
            preferred: false,
            receives_promos: true,
            created_at: Utc::now(),
        };
        db.clients().insert(&client).await?;
    }

    println!("✓ Seeded {} clients", CLIENTS.len());
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
