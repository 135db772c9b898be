//! Read-side profit aggregation over the payment journal
//!
//! All functions here are pure computations over a slice of payments; they
//! never touch storage and have no side effects.
//!
//! Bucketing policy: a payment covering N months contributes `amount / N`
//! to the bucket of its own payment date's month only. Nothing is spread
//! forward into the months the payment covers.

use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::types::{LedgerError, Payment};

/// Calendar year-month bucket, ordered chronologically
///
/// Serializes as the dashboard label form, e.g. `"2024-03"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidInput(format!("Invalid year-month '{}'", s));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(Self { year, month })
    }
}

impl Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Sum each payment's monthly share into its payment-date month bucket
pub fn monthly_profit_summary(payments: &[Payment]) -> BTreeMap<YearMonth, BigDecimal> {
    let mut summary: BTreeMap<YearMonth, BigDecimal> = BTreeMap::new();
    for payment in payments {
        let bucket = YearMonth::from(payment.payment_date);
        *summary.entry(bucket).or_insert_with(|| BigDecimal::from(0)) += payment.monthly_share();
    }
    summary
}

/// Sum full payment amounts per room
pub fn total_paid_per_room(payments: &[Payment]) -> BTreeMap<String, BigDecimal> {
    let mut totals: BTreeMap<String, BigDecimal> = BTreeMap::new();
    for payment in payments {
        *totals
            .entry(payment.room_id.clone())
            .or_insert_with(|| BigDecimal::from(0)) += &payment.amount;
    }
    totals
}

/// Combined profit report backing the dashboard's profit tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitReport {
    /// Monthly profit per calendar month of payment
    pub monthly: BTreeMap<YearMonth, BigDecimal>,
    /// Total amount paid per room across the whole journal
    pub per_room: BTreeMap<String, BigDecimal>,
    /// Grand total of all payment amounts
    pub grand_total: BigDecimal,
}

impl ProfitReport {
    /// Build the report from the full journal
    pub fn from_payments(payments: &[Payment]) -> Self {
        let grand_total = payments
            .iter()
            .map(|p| &p.amount)
            .fold(BigDecimal::from(0), |acc, a| acc + a);

        Self {
            monthly: monthly_profit_summary(payments),
            per_room: total_paid_per_room(payments),
            grand_total,
        }
    }
}
