//! # Rental Core
//!
//! A property-management ledger library tracking room occupancy, rent
//! terms, and payment history for a small fixed roster of rental rooms.
//!
//! ## Features
//!
//! - **Room ledger**: per-room tenant state, rent terms, and a running
//!   balance derived from payments
//! - **Payment journal**: append-only record of payment events; recorded
//!   payments are never mutated or deleted
//! - **Reconciliation**: recording a payment credits the room's balance
//!   and advances its due date by whole calendar months, atomically with
//!   the journal append
//! - **Profit reporting**: monthly profit buckets and per-room totals
//!   computed read-side from the journal
//! - **Storage abstraction**: trait-based backend, with in-memory and
//!   CSV-file implementations included
//!
//! ## Quick Start
//!
//! ```rust
//! use rental_core::{Ledger, LedgerResult, utils::MemoryStorage};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! # async fn demo() -> LedgerResult<()> {
//! let mut ledger = Ledger::new(MemoryStorage::new());
//! ledger.init_rooms(5).await?;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! ledger
//!     .record_payment("Room 1", date, BigDecimal::from(1_000_000), 1)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod ledger;
pub mod reporting;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use ledger::*;
pub use reporting::*;
pub use traits::*;
pub use types::*;
