//! Full-session integration test: record a day of shop activity through
//! khata-core, persist it through khata-store, load it back, and check
//! that every balance invariant survived the trip.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Duration, Utc};

use khata_core::advance::AdvanceBook;
use khata_core::cart::Cart;
use khata_core::money::Money;
use khata_core::obligation::ObligationLedger;
use khata_core::recorder::TransactionRecorder;
use khata_core::reports::{dashboard_report, obligation_summary};
use khata_core::returns::ReturnProcessor;
use khata_core::stock::StockLedger;
use khata_core::types::{ObligationKind, ObligationStatus, PaymentTerms, ReturnStatus};
use khata_store::json_file::JsonFileStore;
use khata_store::kv::MemoryStore;
use khata_store::shop::ShopStore;
use khata_store::KeyValueStore;

/// A recorded day: two sales, a purchase, a debt, payroll, an advance,
/// and a return.
struct Session {
    stock: StockLedger,
    obligations: ObligationLedger,
    returns: ReturnProcessor,
    advances: AdvanceBook,
    chai_id: String,
    installment_id: String,
}

fn record_session() -> Session {
    let mut stock = StockLedger::new();
    let mut obligations = ObligationLedger::new();
    let mut returns = ReturnProcessor::new();
    let mut advances = AdvanceBook::new();

    let chai = stock
        .add_product(
            "CHAI-250",
            "Chai 250g",
            "Beverages",
            Money::from_cents(300),
            Money::from_cents(450),
            40,
            10,
        )
        .unwrap();
    let sugar = stock
        .add_product(
            "SUGAR-1KG",
            "Sugar 1kg",
            "Grocery",
            Money::from_cents(150),
            Money::from_cents(220),
            8,
            10,
        )
        .unwrap();

    let now = Utc::now();
    let mut recorder = TransactionRecorder::new(&mut obligations, &mut stock);

    // Cash sale
    let mut cart = Cart::new();
    cart.add_item(&chai, 4).unwrap();
    let cash_sale = recorder
        .record_sale(&cart, "Walk-in", PaymentTerms::Full, None, None)
        .unwrap();

    // Installment sale
    let mut cart = Cart::new();
    cart.add_item(&sugar, 5).unwrap();
    let installment = recorder
        .record_sale(
            &cart,
            "Bashir Ahmed",
            PaymentTerms::Installment,
            Some(Money::from_cents(500)),
            Some(now + Duration::days(30)),
        )
        .unwrap();

    // Purchase intake
    recorder
        .record_purchase(
            &sugar.id,
            50,
            "Noor Flour Mills",
            Money::from_cents(3_000),
            Some(now + Duration::days(14)),
        )
        .unwrap();

    // A debt and a payroll run
    recorder
        .record_customer_debt(
            "Rashid Khan",
            Money::from_cents(2_500),
            Money::zero(),
            Some(now + Duration::days(5)),
            None,
        )
        .unwrap();
    recorder
        .record_payroll(
            "Imran",
            Money::from_cents(25_000),
            Money::zero(),
            Money::from_cents(1_000),
            Money::from_cents(24_000),
            None,
        )
        .unwrap();
    drop(recorder);

    // A return against the cash sale
    let request = returns
        .create_sale_return(&obligations, &cash_sale.id, "wrong item")
        .unwrap();
    returns.approve(&request.id, "owner").unwrap();

    // Advances with a FIFO deduction
    advances
        .record_advance(
            "imran",
            Money::from_cents(1_000),
            "school fees",
            now - Duration::days(30),
        )
        .unwrap();
    advances
        .record_advance("imran", Money::from_cents(1_000), "medical", now)
        .unwrap();
    advances.deduct("imran", Money::from_cents(1_500)).unwrap();

    Session {
        stock,
        obligations,
        returns,
        advances,
        chai_id: chai.id,
        installment_id: installment.id,
    }
}

fn save_session<S: KeyValueStore>(shop: &mut ShopStore<S>, session: &Session) {
    shop.save_stock(&session.stock).unwrap();
    shop.save_obligations(&session.obligations).unwrap();
    shop.save_returns(&session.returns).unwrap();
    shop.save_advances(&session.advances).unwrap();
}

fn verify_reloaded<S: KeyValueStore>(shop: &ShopStore<S>, session: &Session) {
    let now = Utc::now();

    let stock = shop.load_stock().unwrap();
    let obligations = shop.load_obligations().unwrap();
    let returns = shop.load_returns().unwrap();
    let advances = shop.load_advances().unwrap();

    // Stock: 40 - 4 sold
    assert_eq!(stock.get(&session.chai_id).unwrap().stock_level, 36);
    // Every adjustment (two sales lines + one purchase intake) survived
    assert_eq!(stock.adjustments().len(), 3);

    // Obligations: every record still balances
    assert_eq!(obligations.len(), 5);
    for obligation in obligations.list() {
        assert_eq!(
            obligation.paid_cents + obligation.pending_cents,
            obligation.total_cents
        );
        assert!(obligation.paid_cents >= 0);
        assert!(obligation.pending_cents >= 0);
    }

    // The installment sale is still partial and can still be settled
    let installment = obligations.get(&session.installment_id).unwrap();
    assert_eq!(installment.derive_status(now), ObligationStatus::Partial);
    assert_eq!(installment.pending_cents, 600);

    // Summary equals the pre-save summary
    let before = obligation_summary(session.obligations.list(), now);
    let after = obligation_summary(obligations.list(), now);
    assert_eq!(before, after);

    // The approved return is still terminal
    let request = returns.list()[0];
    assert_eq!(request.status, ReturnStatus::Approved);
    assert_eq!(request.processed_by.as_deref(), Some("owner"));

    // Advances: 2000 handed out, 1500 deducted FIFO
    assert_eq!(advances.outstanding("imran").cents(), 500);
    let per_advance = advances.advances_for("imran");
    assert_eq!(per_advance[0].remaining_cents, 0);
    assert_eq!(per_advance[1].remaining_cents, 500);

    // Dashboard derives cleanly from the reloaded ledgers
    let report = dashboard_report(&obligations, &stock, now);
    assert_eq!(report.obligations.count, 5);
    assert!(report.to_json().unwrap().contains("pending_cents"));
}

#[test]
fn session_survives_memory_roundtrip() {
    let session = record_session();

    let mut shop = ShopStore::new(MemoryStore::new());
    save_session(&mut shop, &session);
    verify_reloaded(&shop, &session);
}

#[test]
fn session_survives_file_roundtrip() {
    let session = record_session();

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir: PathBuf = std::env::temp_dir().join(format!(
        "khata-session-test-{}-{}",
        std::process::id(),
        nanos
    ));

    {
        let mut shop = ShopStore::new(JsonFileStore::open(&dir).unwrap());
        save_session(&mut shop, &session);
    }

    // Reopen from disk: a fresh store, same directory
    let shop = ShopStore::new(JsonFileStore::open(&dir).unwrap());
    verify_reloaded(&shop, &session);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn reloaded_ledgers_accept_further_mutations() {
    let session = record_session();
    let mut shop = ShopStore::new(MemoryStore::new());
    save_session(&mut shop, &session);

    let mut obligations = shop.load_obligations().unwrap();

    // Settle the installment sale after the reload
    let settled = obligations
        .apply_payment(&session.installment_id, Money::from_cents(600))
        .unwrap();
    assert_eq!(settled.pending_cents, 0);
    assert_eq!(settled.derive_status(Utc::now()), ObligationStatus::Paid);

    // Over-payment still rejected
    assert!(obligations
        .apply_payment(&session.installment_id, Money::from_cents(1))
        .is_err());

    // Sale and purchase kinds survived the trip as tagged variants
    assert_eq!(obligations.list_by_kind(ObligationKind::Sale).len(), 2);
    assert_eq!(obligations.list_by_kind(ObligationKind::Purchase).len(), 1);
}
