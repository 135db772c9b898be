//! Utility modules

pub mod csv_storage;
pub mod dates;
pub mod memory_storage;
pub mod validation;

pub use csv_storage::*;
pub use dates::*;
pub use memory_storage::*;
pub use validation::*;
