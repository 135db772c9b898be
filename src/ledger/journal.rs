//! Append-only payment journal

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::reporting::{self, YearMonth};
use crate::traits::*;
use crate::types::*;

/// Payment journal: durable append of payment events plus read-side queries
///
/// Recorded payments are immutable; there is deliberately no update or
/// delete. Room balances are derived from this journal, so recording a
/// payment also carries the room-side effect within a single storage
/// commit.
pub struct PaymentJournal<S: LedgerStorage> {
    pub(crate) storage: S,
    validator: Box<dyn PaymentValidator>,
}

impl<S: LedgerStorage> PaymentJournal<S> {
    /// Create a new payment journal
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultPaymentValidator),
        }
    }

    /// Create a new payment journal with a custom validator
    pub fn with_validator(storage: S, validator: Box<dyn PaymentValidator>) -> Self {
        Self { storage, validator }
    }

    /// Record a payment and apply it to the room's balance and due date
    ///
    /// The journal append and the roster update succeed or fail as one
    /// unit: validation failures and unknown rooms are rejected before
    /// anything is written, and the storage commit is atomic across both
    /// stores.
    pub async fn record_payment(
        &mut self,
        room_id: &str,
        payment_date: NaiveDate,
        amount: BigDecimal,
        months_paid: u32,
    ) -> LedgerResult<Payment> {
        let payment = Payment::new(room_id.to_string(), payment_date, amount, months_paid);
        self.validator.validate_payment(&payment)?;

        let mut rooms = self.storage.load_rooms().await?;
        let room = rooms
            .iter_mut()
            .find(|room| room.room_id == room_id)
            .ok_or_else(|| LedgerError::RoomNotFound(room_id.to_string()))?;

        room.apply_payment(&payment.amount, payment.months_paid)?;

        self.storage.commit_payment(&rooms, &payment).await?;
        Ok(payment)
    }

    /// All payments in insertion order
    pub async fn list_payments(&self) -> LedgerResult<Vec<Payment>> {
        self.storage.load_payments().await
    }

    /// Payment history for one room, newest first
    ///
    /// Ordered by payment date descending; same-date payments are returned
    /// most-recent-insert first. An unknown or payment-less room yields an
    /// empty vec, not an error.
    pub async fn history_for_room(&self, room_id: &str) -> LedgerResult<Vec<Payment>> {
        let payments = self.storage.load_payments().await?;

        let mut history: Vec<(usize, Payment)> = payments
            .into_iter()
            .enumerate()
            .filter(|(_, payment)| payment.room_id == room_id)
            .collect();

        history.sort_by(|(index_a, a), (index_b, b)| {
            b.payment_date
                .cmp(&a.payment_date)
                .then(index_b.cmp(index_a))
        });

        Ok(history.into_iter().map(|(_, payment)| payment).collect())
    }

    /// Monthly profit buckets across the whole journal
    pub async fn monthly_profit_summary(&self) -> LedgerResult<BTreeMap<YearMonth, BigDecimal>> {
        let payments = self.storage.load_payments().await?;
        Ok(reporting::monthly_profit_summary(&payments))
    }

    /// Journal total per room
    pub async fn total_paid_per_room(&self) -> LedgerResult<BTreeMap<String, BigDecimal>> {
        let payments = self.storage.load_payments().await?;
        Ok(reporting::total_paid_per_room(&payments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::room::RoomManager;
    use crate::utils::memory_storage::MemoryStorage;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup(rooms: usize) -> (RoomManager<MemoryStorage>, PaymentJournal<MemoryStorage>) {
        let storage = MemoryStorage::new();
        let mut manager = RoomManager::new(storage.clone());
        manager.init_rooms(rooms).await.unwrap();
        (manager, PaymentJournal::new(storage))
    }

    #[tokio::test]
    async fn recording_updates_balance_and_due_date() {
        let (mut manager, mut journal) = setup(1).await;

        // Pin the due date so the advancement is deterministic
        let room = manager.get_room("Room 1").await.unwrap();
        let mut update = RoomUpdate::from_room(&room);
        update.due_date = date(2024, 1, 1);
        manager.update_room_fields("Room 1", update).await.unwrap();

        journal
            .record_payment("Room 1", date(2024, 1, 15), BigDecimal::from(1_000_000), 1)
            .await
            .unwrap();

        let room = manager.get_room("Room 1").await.unwrap();
        assert_eq!(room.amount_paid, BigDecimal::from(1_000_000));
        assert_eq!(room.due_date, date(2024, 2, 1));
    }

    #[tokio::test]
    async fn unknown_room_is_rejected_before_any_write() {
        let (_, mut journal) = setup(1).await;

        let err = journal
            .record_payment("Room 9", date(2024, 1, 15), BigDecimal::from(100), 1)
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::RoomNotFound(_)));
        assert!(journal.list_payments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn zero_amount_is_rejected_before_any_write() {
        let (manager, mut journal) = setup(1).await;

        let err = journal
            .record_payment("Room 1", date(2024, 1, 15), BigDecimal::from(0), 1)
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::InvalidInput(_)));
        assert!(journal.list_payments().await.unwrap().is_empty());
        let room = manager.get_room("Room 1").await.unwrap();
        assert_eq!(room.amount_paid, BigDecimal::from(0));
    }

    #[tokio::test]
    async fn months_out_of_bounds_is_rejected() {
        let (_, mut journal) = setup(1).await;

        let err = journal
            .record_payment("Room 1", date(2024, 1, 15), BigDecimal::from(100), 25)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));

        let err = journal
            .record_payment("Room 1", date(2024, 1, 15), BigDecimal::from(100), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn history_is_newest_first_with_insertion_tiebreak() {
        let (_, mut journal) = setup(2).await;

        journal
            .record_payment("Room 1", date(2024, 2, 1), BigDecimal::from(100), 1)
            .await
            .unwrap();
        let same_day_first = journal
            .record_payment("Room 1", date(2024, 3, 1), BigDecimal::from(200), 1)
            .await
            .unwrap();
        let same_day_second = journal
            .record_payment("Room 1", date(2024, 3, 1), BigDecimal::from(300), 1)
            .await
            .unwrap();
        journal
            .record_payment("Room 2", date(2024, 4, 1), BigDecimal::from(999), 1)
            .await
            .unwrap();

        let history = journal.history_for_room("Room 1").await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].id, same_day_second.id);
        assert_eq!(history[1].id, same_day_first.id);
        assert_eq!(history[2].payment_date, date(2024, 2, 1));
    }

    #[tokio::test]
    async fn empty_history_is_not_an_error() {
        let (_, journal) = setup(1).await;

        assert!(journal.history_for_room("Room 1").await.unwrap().is_empty());
        assert!(journal.history_for_room("no such room").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn due_date_is_monotonic_across_payments() {
        let (manager, mut journal) = setup(1).await;

        let mut last_due = manager.get_room("Room 1").await.unwrap().due_date;
        for month in 1..=4 {
            journal
                .record_payment("Room 1", date(2024, month, 10), BigDecimal::from(100), 2)
                .await
                .unwrap();
            let due = manager.get_room("Room 1").await.unwrap().due_date;
            assert!(due >= last_due);
            last_due = due;
        }
    }
}
