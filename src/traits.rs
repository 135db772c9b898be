//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::types::*;

/// Storage abstraction for the rental ledger
///
/// The room ledger and the payment journal are persisted as two
/// row-oriented stores with read-all/write-all semantics. Any backend that
/// can load and replace whole tables (flat file, embedded database,
/// in-memory) can implement this trait.
///
/// Ordering contract: `load_rooms` returns rooms in creation order and
/// `load_payments` returns payments in insertion order. Implementations
/// must preserve both across a save/load cycle.
#[async_trait]
pub trait LedgerStorage: Send + Sync {
    /// Load the full room roster
    async fn load_rooms(&self) -> LedgerResult<Vec<Room>>;

    /// Replace the full room roster
    async fn save_rooms(&mut self, rooms: &[Room]) -> LedgerResult<()>;

    /// Load the full payment journal
    async fn load_payments(&self) -> LedgerResult<Vec<Payment>>;

    /// Atomically append one payment and replace the room roster
    ///
    /// This is the single commit behind `record_payment`: either both the
    /// journal append and the roster update become durable, or neither
    /// does. Implementations must not acknowledge success until both
    /// stores are fully written.
    async fn commit_payment(&mut self, rooms: &[Room], payment: &Payment) -> LedgerResult<()>;
}

/// Trait for implementing custom room validation rules
pub trait RoomValidator: Send + Sync {
    /// Validate a room before saving
    fn validate_room(&self, room: &Room) -> LedgerResult<()>;

    /// Validate a field update before applying it to a room
    fn validate_update(&self, update: &RoomUpdate) -> LedgerResult<()>;
}

/// Trait for implementing custom payment validation rules
pub trait PaymentValidator: Send + Sync {
    /// Validate a payment before it is appended to the journal
    fn validate_payment(&self, payment: &Payment) -> LedgerResult<()>;
}

/// Default room validator with basic rules
pub struct DefaultRoomValidator;

impl RoomValidator for DefaultRoomValidator {
    fn validate_room(&self, room: &Room) -> LedgerResult<()> {
        if room.room_id.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "Room ID cannot be empty".to_string(),
            ));
        }

        if room.rent_price < BigDecimal::from(0) {
            return Err(LedgerError::InvalidInput(
                "Rent price cannot be negative".to_string(),
            ));
        }

        if room.amount_paid < BigDecimal::from(0) {
            return Err(LedgerError::InvalidInput(
                "Amount paid cannot be negative".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_update(&self, update: &RoomUpdate) -> LedgerResult<()> {
        if update.rent_price < BigDecimal::from(0) {
            return Err(LedgerError::InvalidInput(
                "Rent price cannot be negative".to_string(),
            ));
        }

        // end_date >= start_date is intentionally not checked; the form
        // this ledger backs never enforced date ordering
        Ok(())
    }
}

/// Default payment validator enforcing the journal's input bounds
pub struct DefaultPaymentValidator;

impl PaymentValidator for DefaultPaymentValidator {
    fn validate_payment(&self, payment: &Payment) -> LedgerResult<()> {
        if payment.room_id.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "Payment must reference a room".to_string(),
            ));
        }

        if payment.amount <= BigDecimal::from(0) {
            return Err(LedgerError::InvalidInput(
                "Payment amount must be positive".to_string(),
            ));
        }

        if !(MIN_MONTHS_PAID..=MAX_MONTHS_PAID).contains(&payment.months_paid) {
            return Err(LedgerError::InvalidInput(format!(
                "Months paid must be between {} and {}, got {}",
                MIN_MONTHS_PAID, MAX_MONTHS_PAID, payment.months_paid
            )));
        }

        Ok(())
    }
}
