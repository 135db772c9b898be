//! Ledger module containing the room roster, the payment journal, and the
//! orchestrator that ties them together

pub mod core;
pub mod journal;
pub mod room;

pub use core::*;
pub use journal::*;
pub use room::*;
