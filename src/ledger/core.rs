//! Main ledger orchestrator that coordinates the room roster and the
//! payment journal

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ledger::{PaymentJournal, RoomManager};
use crate::reporting::{ProfitReport, YearMonth};
use crate::traits::*;
use crate::types::*;

/// Main ledger system exposing every operation the presentation layer
/// calls
pub struct Ledger<S: LedgerStorage> {
    room_manager: RoomManager<S>,
    journal: PaymentJournal<S>,
}

impl<S: LedgerStorage + Clone> Ledger<S> {
    /// Create a new ledger with the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            room_manager: RoomManager::new(storage.clone()),
            journal: PaymentJournal::new(storage),
        }
    }

    /// Create a new ledger with custom validators
    pub fn with_validators(
        storage: S,
        room_validator: Box<dyn RoomValidator>,
        payment_validator: Box<dyn PaymentValidator>,
    ) -> Self {
        Self {
            room_manager: RoomManager::with_validator(storage.clone(), room_validator),
            journal: PaymentJournal::with_validator(storage, payment_validator),
        }
    }

    // Room operations
    /// Initialize the roster, or load it unchanged if already present
    pub async fn init_rooms(&mut self, default_count: usize) -> LedgerResult<Vec<Room>> {
        self.room_manager.init_rooms(default_count).await
    }

    /// List all rooms in creation order
    pub async fn list_rooms(&self) -> LedgerResult<Vec<Room>> {
        self.room_manager.list_rooms().await
    }

    /// Get a room by id
    pub async fn get_room(&self, room_id: &str) -> LedgerResult<Room> {
        self.room_manager.get_room(room_id).await
    }

    /// Overwrite a room's directly editable fields
    pub async fn update_room_fields(
        &mut self,
        room_id: &str,
        update: RoomUpdate,
    ) -> LedgerResult<Room> {
        self.room_manager.update_room_fields(room_id, update).await
    }

    // Journal operations
    /// Record a payment and apply it to the room in one atomic operation
    pub async fn record_payment(
        &mut self,
        room_id: &str,
        payment_date: NaiveDate,
        amount: BigDecimal,
        months_paid: u32,
    ) -> LedgerResult<Payment> {
        self.journal
            .record_payment(room_id, payment_date, amount, months_paid)
            .await
    }

    /// Payment history for one room, newest first
    pub async fn history_for_room(&self, room_id: &str) -> LedgerResult<Vec<Payment>> {
        self.journal.history_for_room(room_id).await
    }

    /// Monthly profit buckets across the whole journal
    pub async fn monthly_profit_summary(&self) -> LedgerResult<BTreeMap<YearMonth, BigDecimal>> {
        self.journal.monthly_profit_summary().await
    }

    /// Journal total per room
    pub async fn total_paid_per_room(&self) -> LedgerResult<BTreeMap<String, BigDecimal>> {
        self.journal.total_paid_per_room().await
    }

    // Reporting
    /// Build the combined profit report backing the dashboard tables
    pub async fn generate_profit_report(&self) -> LedgerResult<ProfitReport> {
        let payments = self.journal.list_payments().await?;
        Ok(ProfitReport::from_payments(&payments))
    }

    /// Cross-check the room ledger against the payment journal
    ///
    /// Suitable as a startup reconciliation step: verifies that every
    /// room's cumulative balance equals the journal sum for that room and
    /// that no payment references an unknown room. Read-only; never
    /// repairs anything itself.
    pub async fn validate_integrity(&self) -> LedgerResult<LedgerIntegrityReport> {
        let rooms = self.room_manager.list_rooms().await?;
        let payments = self.journal.list_payments().await?;
        let totals = crate::reporting::total_paid_per_room(&payments);

        let mut issues = Vec::new();

        for room in &rooms {
            let zero = BigDecimal::from(0);
            let journal_total = totals.get(&room.room_id).unwrap_or(&zero);
            if &room.amount_paid != journal_total {
                issues.push(format!(
                    "Room '{}' balance {} does not match journal total {}",
                    room.room_id, room.amount_paid, journal_total
                ));
            }
        }

        for payment in &payments {
            if !rooms.iter().any(|room| room.room_id == payment.room_id) {
                issues.push(format!(
                    "Payment '{}' references unknown room '{}'",
                    payment.id, payment.room_id
                ));
            }
        }

        Ok(LedgerIntegrityReport {
            rooms_checked: rooms.len(),
            payments_checked: payments.len(),
            is_valid: issues.is_empty(),
            issues,
        })
    }
}

/// Report on ledger/journal consistency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerIntegrityReport {
    pub rooms_checked: usize,
    pub payments_checked: usize,
    pub is_valid: bool,
    pub issues: Vec<String>,
}
