//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
///
/// Rooms keep creation order and payments keep insertion order, matching
/// the ordering contract of [`LedgerStorage`].
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    rooms: Arc<RwLock<Vec<Room>>>,
    payments: Arc<RwLock<Vec<Payment>>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage instance
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(RwLock::new(Vec::new())),
            payments: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.rooms.write().unwrap().clear();
        self.payments.write().unwrap().clear();
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStorage for MemoryStorage {
    async fn load_rooms(&self) -> LedgerResult<Vec<Room>> {
        Ok(self.rooms.read().unwrap().clone())
    }

    async fn save_rooms(&mut self, rooms: &[Room]) -> LedgerResult<()> {
        *self.rooms.write().unwrap() = rooms.to_vec();
        Ok(())
    }

    async fn load_payments(&self) -> LedgerResult<Vec<Payment>> {
        Ok(self.payments.read().unwrap().clone())
    }

    async fn commit_payment(&mut self, rooms: &[Room], payment: &Payment) -> LedgerResult<()> {
        // Take both locks before writing either store so the commit is
        // all-or-nothing even with clones of this storage around
        let mut room_guard = self.rooms.write().unwrap();
        let mut payment_guard = self.payments.write().unwrap();

        *room_guard = rooms.to_vec();
        payment_guard.push(payment.clone());

        Ok(())
    }
}
