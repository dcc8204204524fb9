//! # Seed Data Generator
//!
//! Populates the database with demo products for local development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 products (default)
//! cargo run -p pdv-db --bin seed
//!
//! # Custom amount and database path
//! cargo run -p pdv-db --bin seed -- --count 200 --db ./data/pdv.db
//! ```
//!
//! Each product gets a name `{item} {size}`, a price between 1.50 and 19.50
//! and a stock between 0 and 40.

use pdv_core::NewProduct;
use pdv_db::{Database, DbConfig};
use std::env;

/// Base items for demo data
const ITEMS: &[&str] = &[
    "Coffee",
    "Espresso Beans",
    "Green Tea",
    "Orange Juice",
    "Mineral Water",
    "Croissant",
    "Sourdough Bread",
    "Cheese Bread",
    "Butter",
    "Whole Milk",
    "Yogurt",
    "Chocolate Bar",
    "Oat Cookies",
    "Granola",
    "Honey",
];

/// Size variants with a price addon (in tenths)
const SIZES: &[(&str, u32)] = &[("Small", 0), ("Medium", 10), ("Large", 25), ("Family", 60)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut db_path = String::from("./pdv.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if let Some(value) = args.get(i + 1) {
                    count = value.parse()?;
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if let Some(value) = args.get(i + 1) {
                    db_path = value.clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Mini PDV Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 50)");
                println!("  -d, --db <PATH>    Database file path (default: ./pdv.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Ignoring unknown argument: {other}");
            }
        }
        i += 1;
    }

    println!("Mini PDV Seed Data Generator");
    println!("============================");
    println!("Database: {db_path}");
    println!("Products: {count}");
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {existing} products");
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let product = generate_product(seed);
        if let Err(e) = db.products().insert(&product).await {
            eprintln!("Failed to insert {}: {}", product.name, e);
            continue;
        }
        generated += 1;
    }

    println!(
        "✓ Generated {generated} products in {:?} ({} in store)",
        start.elapsed(),
        db.products().count().await?
    );

    db.close().await;
    Ok(())
}

/// Generates one deterministic demo product.
fn generate_product(seed: usize) -> NewProduct {
    let item = ITEMS[seed % ITEMS.len()];
    let (size, addon) = SIZES[(seed / ITEMS.len()) % SIZES.len()];
    let round = seed / (ITEMS.len() * SIZES.len());

    let name = if round == 0 {
        format!("{item} {size}")
    } else {
        format!("{item} {size} #{}", round + 1)
    };

    // 1.50 .. 13.50 base, in 0.50 steps, plus size addon
    let base_tenths = 15 + ((seed * 7) % 25) as u32 * 5;
    let price = f64::from(base_tenths + addon) / 10.0;

    NewProduct {
        name,
        price,
        stock: (seed % 41) as i64,
    }
}
