//! # Demo Data Seeder
//!
//! Populates a data directory with a small demo shop for development.
//!
//! ## Usage
//! ```bash
//! # Seed into ./khata_data (default)
//! cargo run -p khata-store --bin seed
//!
//! # Specify the data directory
//! cargo run -p khata-store --bin seed -- --dir ./my-shop
//! ```
//!
//! ## Generated Data
//! - A small grocery catalog with low-stock and out-of-stock products
//! - A cash sale, an installment sale, and a part-paid purchase
//! - A customer debt and a supplier debt
//! - A payroll run, an advance, and a FIFO deduction against it
//! - One approved and one pending sale return

use std::env;

use chrono::{Duration, Utc};
use tracing::info;
use tracing_subscriber::EnvFilter;

use khata_core::advance::AdvanceBook;
use khata_core::cart::Cart;
use khata_core::money::Money;
use khata_core::obligation::ObligationLedger;
use khata_core::recorder::TransactionRecorder;
use khata_core::reports::dashboard_report;
use khata_core::returns::ReturnProcessor;
use khata_core::stock::StockLedger;
use khata_core::types::PaymentTerms;
use khata_store::json_file::JsonFileStore;
use khata_store::shop::ShopStore;

/// Demo catalog: (sku, name, category, purchase cents, sale cents,
/// stock, min stock)
const CATALOG: &[(&str, &str, &str, i64, i64, i64, i64)] = &[
    ("CHAI-250", "Chai 250g", "Beverages", 300, 450, 40, 10),
    ("SUGAR-1KG", "Sugar 1kg", "Grocery", 150, 220, 8, 10),
    ("ATTA-5KG", "Atta 5kg", "Grocery", 550, 780, 25, 5),
    ("GHEE-1L", "Ghee 1L", "Grocery", 1200, 1650, 0, 3),
    ("SOAP-75G", "Soap 75g", "Household", 60, 95, 120, 20),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut dir = String::from("./khata_data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" | "-d" => {
                if i + 1 < args.len() {
                    dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Khata Demo Data Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --dir <PATH>   Data directory (default: ./khata_data)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Khata Demo Data Seeder");
    println!("=========================");
    println!("Data directory: {}", dir);
    println!();

    let mut shop = ShopStore::new(JsonFileStore::open(&dir)?);

    // Refuse to seed over existing data
    let existing = shop.load_stock()?;
    if !existing.is_empty() {
        println!("⚠ Data directory already has {} products", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the directory to regenerate.");
        return Ok(());
    }

    let mut stock = StockLedger::new();
    let mut obligations = ObligationLedger::new();
    let mut returns = ReturnProcessor::new();
    let mut advances = AdvanceBook::new();

    // Catalog
    let mut seeded = Vec::new();
    for &(sku, name, category, purchase, sale, level, min) in CATALOG {
        let product = stock.add_product(
            sku,
            name,
            category,
            Money::from_cents(purchase),
            Money::from_cents(sale),
            level,
            min,
        )?;
        seeded.push(product);
    }
    info!(products = stock.len(), "Seeded catalog");

    let now = Utc::now();
    let (chai, sugar, atta, soap) = (&seeded[0], &seeded[1], &seeded[2], &seeded[4]);

    let mut recorder = TransactionRecorder::new(&mut obligations, &mut stock);

    // A cash sale: 2 × Chai + 1 × Soap, paid in full
    let mut cart = Cart::new();
    cart.add_item(chai, 2)?;
    cart.add_item(soap, 1)?;
    let cash_sale = recorder.record_sale(&cart, "Walk-in", PaymentTerms::Full, None, None)?;
    info!(id = %cash_sale.id, total = %cash_sale.total(), "Seeded cash sale");

    // An installment sale: 3 × Atta, one third down
    let mut cart = Cart::new();
    cart.add_item(atta, 3)?;
    let installment = recorder.record_sale(
        &cart,
        "Bashir Ahmed",
        PaymentTerms::Installment,
        Some(Money::from_cents(780)),
        Some(now + Duration::days(30)),
    )?;
    info!(id = %installment.id, pending = %installment.pending(), "Seeded installment sale");

    // A part-paid purchase: 50 × Sugar from the mill
    let purchase = recorder.record_purchase(
        &sugar.id,
        50,
        "Noor Flour Mills",
        Money::from_cents(4_000),
        Some(now + Duration::days(14)),
    )?;
    info!(id = %purchase.id, pending = %purchase.pending(), "Seeded purchase");

    // Standalone debts
    recorder.record_customer_debt(
        "Rashid Khan",
        Money::from_cents(2_500),
        Money::zero(),
        Some(now + Duration::days(5)),
        Some("goods on credit last Eid".to_string()),
    )?;
    recorder.record_supplier_debt(
        "City Wholesalers",
        Money::from_cents(18_000),
        Money::from_cents(8_000),
        Some(now + Duration::days(45)),
        None,
    )?;

    // A payroll run: salary + bonus - deduction, paid out in full
    recorder.record_payroll(
        "Imran (shop hand)",
        Money::from_cents(25_000),
        Money::from_cents(2_000),
        Money::from_cents(1_000),
        Money::from_cents(26_000),
        None,
    )?;
    drop(recorder);

    // Returns against the cash sale: one settled, one under review
    let approved = returns.create_sale_return(&obligations, &cash_sale.id, "wrong size")?;
    returns.approve(&approved.id, "owner")?;
    returns.create_sale_return(&obligations, &cash_sale.id, "damaged on delivery")?;

    // Advances: two for Imran, one partly repaid
    advances.record_advance(
        "imran",
        Money::from_cents(3_000),
        "school fees",
        now - Duration::days(60),
    )?;
    advances.record_advance(
        "imran",
        Money::from_cents(2_000),
        "medical",
        now - Duration::days(20),
    )?;
    advances.deduct("imran", Money::from_cents(3_500))?;
    info!(outstanding = %advances.outstanding("imran"), "Seeded advances");

    // Persist everything
    shop.save_stock(&stock)?;
    shop.save_obligations(&obligations)?;
    shop.save_returns(&returns)?;
    shop.save_advances(&advances)?;

    let report = dashboard_report(&obligations, &stock, now);
    println!("✓ Seeded {} products", stock.len());
    println!("✓ Seeded {} obligations", obligations.len());
    println!("✓ Seeded {} return requests", returns.len());
    println!("✓ Seeded {} advances", advances.len());
    println!();
    println!("Dashboard snapshot:");
    println!("{}", report.to_json()?);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - show debug messages
/// - `RUST_LOG=khata=trace` - trace for khata crates only
/// - Default: INFO level
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,khata=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
