//! # Seed Data Generator
//!
//! Populates the database with a small, realistic ledger for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p clientflow-db --bin seed
//!
//! # Specify database path
//! cargo run -p clientflow-db --bin seed -- --db ./data/clientflow.db
//! ```
//!
//! ## Generated Data
//! - Plumbing-supply categories and products (prices in millimes)
//! - A handful of clients with Tunisian contact details
//! - Item-backed and direct-amount sales, partially paid

use chrono::{Duration, Utc};
use std::env;

use clientflow_core::reference::generate_reference;
use clientflow_core::{Money, NewSaleItem, PaymentMethod, SaleBody};
use clientflow_db::{Database, DbConfig};

/// Categories with their products: (name, unit price in millimes).
const CATALOG: &[(&str, &[(&str, i64)])] = &[
    (
        "Tuyaux",
        &[
            ("Tuyau PVC 50mm (barre 4m)", 5_000),
            ("Tuyau PVC 100mm (barre 4m)", 9_500),
            ("Tuyau cuivre 12mm (metre)", 8_200),
            ("Tube PER 16mm (metre)", 2_400),
        ],
    ),
    (
        "Vannes",
        &[
            ("Vanne a boisseau 1/2", 12_000),
            ("Vanne a boisseau 3/4", 15_500),
            ("Robinet d'arret equerre", 7_800),
            ("Mitigeur lavabo", 68_000),
        ],
    ),
    (
        "Raccords",
        &[
            ("Coude PVC 90 50mm", 1_200),
            ("Te PVC 50mm", 2_000),
            ("Manchon laiton 1/2", 3_300),
            ("Collier de fixation 50mm", 800),
        ],
    ),
    (
        "Etancheite",
        &[
            ("Joint fibre 1/2 (sachet 10)", 1_500),
            ("Teflon rouleau", 900),
            ("Silicone sanitaire", 6_500),
        ],
    ),
];

/// Clients: (name, phone, address, email).
const CLIENTS: &[(&str, &str, &str, Option<&str>)] = &[
    ("Ahmed Ben Ali", "+216 20 123 456", "Rue de Marseille, Tunis", Some("ahmed.benali@email.tn")),
    ("Fatma Trabelsi", "+216 70 987 654", "Avenue Bourguiba, Sousse", None),
    ("Karim Jaziri", "+216 22 456 789", "Cite El Khadra, Tunis", Some("karim.jaziri@email.tn")),
    ("Entreprise Bâti-Sud", "+216 74 321 000", "Route de Gabes, Sfax", Some("contact@batisud.tn")),
    ("Mohamed Salah", "+216 55 111 222", "Menzel Bourguiba, Bizerte", None),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./clientflow_dev.db");

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
                println!("ClientFlow Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./clientflow_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 ClientFlow Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Never seed on top of real data.
    let existing = db.clients().list_clients().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} clients", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding catalog...");

    let mut product_ids = Vec::new();
    for (category_name, products) in CATALOG {
        let category_id = db.catalog().add_category(category_name, None).await?;
        for (product_name, price_millimes) in *products {
            let id = db
                .catalog()
                .add_product(
                    product_name,
                    Money::from_millimes(*price_millimes),
                    Some(category_id),
                )
                .await?;
            product_ids.push(id);
        }
    }
    println!("  {} categories, {} products", CATALOG.len(), product_ids.len());

    println!("Seeding clients...");
    let mut client_ids = Vec::new();
    for (name, phone, address, email) in CLIENTS {
        let id = db
            .clients()
            .add_client(name, Some(phone), Some(address), *email)
            .await?;
        client_ids.push(id);
    }
    println!("  {} clients", client_ids.len());

    println!("Seeding sales and payments...");
    let today = Utc::now().date_naive();
    let mut sale_count = 0;

    for (idx, &client_id) in client_ids.iter().enumerate() {
        // Two item-backed sales per client from rotating products.
        for sale_no in 0..2 {
            let offset = (idx * 2 + sale_no) % product_ids.len();
            let items = vec![
                NewSaleItem::of_product(product_ids[offset], (sale_no as i64) + 2),
                NewSaleItem::of_product(product_ids[(offset + 3) % product_ids.len()], 5),
            ];
            let date = today - Duration::days((idx * 7 + sale_no * 3) as i64);
            let sale_id = db
                .sales()
                .create_sale(client_id, date, &generate_reference(Utc::now()), None, SaleBody::Items(items))
                .await?;
            sale_count += 1;

            // Pay roughly half of the first sale.
            if sale_no == 0 {
                let remaining = db.payments().remaining_for_sale(sale_id).await?;
                let half = Money::from_millimes(remaining.millimes() / 2);
                if half.is_positive() {
                    db.payments()
                        .add_payment(sale_id, date + Duration::days(2), half, PaymentMethod::Cash, Some("acompte"))
                        .await?;
                }
            }
        }

        // One legacy direct-amount sale.
        let date = today - Duration::days((idx * 7 + 5) as i64);
        db.sales()
            .create_sale(
                client_id,
                date,
                &generate_reference(Utc::now()),
                Some("Vente libre"),
                SaleBody::Direct(Money::from_dinars(40 + idx as i64 * 15)),
            )
            .await?;
        sale_count += 1;
    }
    println!("  {} sales", sale_count);

    println!();
    println!("Verifying balances...");
    let totals = db.reports().global_totals().await?;
    println!("  Total credit:    {}", totals.total_credit());
    println!("  Total paid:      {}", totals.total_paid());
    println!("  Total remaining: {}", totals.total_remaining());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
