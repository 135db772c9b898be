//! Core types and data structures for the rental ledger

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::utils::dates::add_calendar_months;

/// Smallest number of months a single payment may cover
pub const MIN_MONTHS_PAID: u32 = 1;
/// Largest number of months a single payment may cover
pub const MAX_MONTHS_PAID: u32 = 24;

/// Contract durations offered to tenants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractTerm {
    /// Rolling month-to-month contract
    #[default]
    #[serde(rename = "1 month")]
    OneMonth,
    /// Quarterly contract
    #[serde(rename = "3 months")]
    ThreeMonths,
    /// Half-year contract
    #[serde(rename = "6 months")]
    SixMonths,
    /// Annual contract
    #[serde(rename = "1 year")]
    OneYear,
}

impl ContractTerm {
    /// Canonical label as shown to users and written to storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractTerm::OneMonth => "1 month",
            ContractTerm::ThreeMonths => "3 months",
            ContractTerm::SixMonths => "6 months",
            ContractTerm::OneYear => "1 year",
        }
    }

    /// All terms in ascending duration order
    pub fn all() -> [ContractTerm; 4] {
        [
            ContractTerm::OneMonth,
            ContractTerm::ThreeMonths,
            ContractTerm::SixMonths,
            ContractTerm::OneYear,
        ]
    }

    /// Contract length in months
    pub fn months(&self) -> u32 {
        match self {
            ContractTerm::OneMonth => 1,
            ContractTerm::ThreeMonths => 3,
            ContractTerm::SixMonths => 6,
            ContractTerm::OneYear => 12,
        }
    }
}

impl std::fmt::Display for ContractTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContractTerm {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1 month" => Ok(ContractTerm::OneMonth),
            "3 months" => Ok(ContractTerm::ThreeMonths),
            "6 months" => Ok(ContractTerm::SixMonths),
            "1 year" => Ok(ContractTerm::OneYear),
            other => Err(LedgerError::InvalidInput(format!(
                "Unrecognized contract term '{}'",
                other
            ))),
        }
    }
}

/// Current state of a single rentable room
///
/// The room id is the natural key and never changes after creation.
/// `amount_paid` is derived state: it must always equal the sum of journal
/// amounts recorded for this room, so only [`Room::apply_payment`] may grow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier, e.g. "Room 1"
    pub room_id: String,
    /// Current tenant, empty when the room is vacant
    pub tenant_name: String,
    /// Tenant contact details, free text
    pub contact_info: String,
    /// Monthly rent obligation, non-negative
    pub rent_price: BigDecimal,
    /// Cumulative amount credited to this room across all payments
    pub amount_paid: BigDecimal,
    /// Agreed contract duration
    pub contract_term: ContractTerm,
    /// Contract start
    pub start_date: NaiveDate,
    /// Contract end
    pub end_date: NaiveDate,
    /// Next date rent is owed; advanced by payments, never rolled back by them
    pub due_date: NaiveDate,
    /// Free-text notes
    pub notes: String,
    /// When the room record was last touched
    pub updated_at: NaiveDateTime,
}

impl Room {
    /// Create a vacant room with zeroed balances and all dates set to `today`
    pub fn new(room_id: String, today: NaiveDate) -> Self {
        Self {
            room_id,
            tenant_name: String::new(),
            contact_info: String::new(),
            rent_price: BigDecimal::from(0),
            amount_paid: BigDecimal::from(0),
            contract_term: ContractTerm::default(),
            start_date: today,
            end_date: today,
            due_date: today,
            notes: String::new(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Whether the room currently has no tenant
    pub fn is_vacant(&self) -> bool {
        self.tenant_name.trim().is_empty()
    }

    /// Whether the cumulative paid amount has fallen behind the monthly rent
    pub fn is_in_arrears(&self) -> bool {
        self.amount_paid < self.rent_price
    }

    /// Credit a payment against this room
    ///
    /// Adds `amount` to the running balance and advances the due date by
    /// exactly `months` calendar months (with end-of-month clamping).
    /// Rejects non-positive amounts and month counts outside
    /// [`MIN_MONTHS_PAID`]..=[`MAX_MONTHS_PAID`] without touching any field.
    pub fn apply_payment(&mut self, amount: &BigDecimal, months: u32) -> LedgerResult<()> {
        if *amount <= BigDecimal::from(0) {
            return Err(LedgerError::InvalidInput(
                "Payment amount must be positive".to_string(),
            ));
        }

        if !(MIN_MONTHS_PAID..=MAX_MONTHS_PAID).contains(&months) {
            return Err(LedgerError::InvalidInput(format!(
                "Months paid must be between {} and {}, got {}",
                MIN_MONTHS_PAID, MAX_MONTHS_PAID, months
            )));
        }

        self.due_date = add_calendar_months(self.due_date, months)?;
        self.amount_paid += amount;
        self.updated_at = chrono::Utc::now().naive_utc();

        Ok(())
    }

    /// Overwrite the directly editable fields from a caller-supplied update
    ///
    /// `amount_paid` is intentionally absent from [`RoomUpdate`]: balances
    /// are payment-driven only. Date ordering between start and end is not
    /// enforced here.
    pub fn apply_update(&mut self, update: RoomUpdate) {
        self.tenant_name = update.tenant_name;
        self.contact_info = update.contact_info;
        self.rent_price = update.rent_price;
        self.contract_term = update.contract_term;
        self.start_date = update.start_date;
        self.end_date = update.end_date;
        self.due_date = update.due_date;
        self.notes = update.notes;
        self.updated_at = chrono::Utc::now().naive_utc();
    }
}

/// Replacement values for a room's directly editable fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomUpdate {
    pub tenant_name: String,
    pub contact_info: String,
    pub rent_price: BigDecimal,
    pub contract_term: ContractTerm,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub due_date: NaiveDate,
    pub notes: String,
}

impl RoomUpdate {
    /// Build an update pre-filled from a room's current state
    pub fn from_room(room: &Room) -> Self {
        Self {
            tenant_name: room.tenant_name.clone(),
            contact_info: room.contact_info.clone(),
            rent_price: room.rent_price.clone(),
            contract_term: room.contract_term,
            start_date: room.start_date,
            end_date: room.end_date,
            due_date: room.due_date,
            notes: room.notes.clone(),
        }
    }
}

/// Immutable record of money received toward a room's obligation
///
/// Payments are the audit-of-record: once appended to the journal they are
/// never mutated or deleted, and room balances are derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier for the payment record
    pub id: String,
    /// Room this payment is credited to
    pub room_id: String,
    /// Date the payment was recorded
    pub payment_date: NaiveDate,
    /// Amount received, always positive
    pub amount: BigDecimal,
    /// Number of months this payment covers
    pub months_paid: u32,
}

impl Payment {
    /// Create a new payment record with a fresh id
    pub fn new(
        room_id: String,
        payment_date: NaiveDate,
        amount: BigDecimal,
        months_paid: u32,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            room_id,
            payment_date,
            amount,
            months_paid,
        }
    }

    /// This payment's monthly contribution: amount spread evenly over the
    /// months it covers
    pub fn monthly_share(&self) -> BigDecimal {
        &self.amount / BigDecimal::from(self.months_paid)
    }
}

/// Errors that can occur in the rental ledger system
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Room not found: {0}")]
    RoomNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LedgerError {
    /// Storage failures abort the in-flight operation but may succeed on
    /// retry; caller errors never will
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::Storage(_))
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
