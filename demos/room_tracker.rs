//! Room tracker walkthrough: the same flow the dashboard drives

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use rental_core::utils::MemoryStorage;
use rental_core::{ContractTerm, Ledger, RoomUpdate};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏢 Rental Core - Room Tracker Example\n");

    // Create a ledger with in-memory storage; swap in CsvStorage::open(dir)
    // for a durable one
    let mut ledger = Ledger::new(MemoryStorage::new());

    // 1. Initialize the roster
    println!("📋 Initializing roster...");
    let rooms = ledger.init_rooms(5).await?;
    for room in &rooms {
        println!("  ✓ Created {} (vacant)", room.room_id);
    }
    println!();

    // 2. Move a tenant in
    println!("✏️ Updating Room 1...");
    let mut update = RoomUpdate::from_room(&rooms[0]);
    update.tenant_name = "Nguyen Van A".to_string();
    update.contact_info = "0901 234 567".to_string();
    update.rent_price = BigDecimal::from(1_500_000);
    update.contract_term = ContractTerm::SixMonths;
    update.start_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    update.end_date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    update.due_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let room = ledger.update_room_fields("Room 1", update).await?;
    println!(
        "  ✓ {} rented to {} at {} VND/month ({})\n",
        room.room_id, room.tenant_name, room.rent_price, room.contract_term
    );

    // 3. Record payments
    println!("💰 Recording payments...");
    let payment = ledger
        .record_payment(
            "Room 1",
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            BigDecimal::from(4_500_000),
            3,
        )
        .await?;
    println!(
        "  ✓ {} paid {} VND covering {} months",
        payment.room_id, payment.amount, payment.months_paid
    );

    let room = ledger.get_room("Room 1").await?;
    println!(
        "  ✓ Balance now {} VND, next rent due {}\n",
        room.amount_paid, room.due_date
    );

    // 4. Profit report
    println!("📊 Profit report:");
    let report = ledger.generate_profit_report().await?;
    for (month, profit) in &report.monthly {
        println!("  {} → {} VND", month, profit);
    }
    for (room_id, total) in &report.per_room {
        println!("  {} → {} VND total", room_id, total);
    }
    println!("  Grand total: {} VND\n", report.grand_total);

    // 5. Integrity check
    let integrity = ledger.validate_integrity().await?;
    println!(
        "🔎 Integrity: {} ({} rooms, {} payments checked)",
        if integrity.is_valid { "OK" } else { "BROKEN" },
        integrity.rooms_checked,
        integrity.payments_checked
    );

    Ok(())
}
