//! Room roster management

use crate::traits::*;
use crate::types::*;

/// Room manager for roster initialization and direct field edits
///
/// Operates on the whole roster with load-modify-save semantics; the
/// storage trait hides whether the backend is a flat file or something
/// smarter.
pub struct RoomManager<S: LedgerStorage> {
    pub(crate) storage: S,
    validator: Box<dyn RoomValidator>,
}

impl<S: LedgerStorage> RoomManager<S> {
    /// Create a new room manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultRoomValidator),
        }
    }

    /// Create a new room manager with a custom validator
    pub fn with_validator(storage: S, validator: Box<dyn RoomValidator>) -> Self {
        Self { storage, validator }
    }

    /// Initialize the fixed roster
    ///
    /// Idempotent: an already-initialized roster is loaded and returned
    /// unchanged. Otherwise creates `default_count` vacant rooms named
    /// "Room 1".."Room N" with zeroed balances and today's date for all
    /// three date fields, persists them, and returns them.
    pub async fn init_rooms(&mut self, default_count: usize) -> LedgerResult<Vec<Room>> {
        let existing = self.storage.load_rooms().await?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        let today = chrono::Local::now().date_naive();
        let rooms: Vec<Room> = (1..=default_count)
            .map(|i| Room::new(format!("Room {}", i), today))
            .collect();

        for room in &rooms {
            self.validator.validate_room(room)?;
        }

        self.storage.save_rooms(&rooms).await?;
        Ok(rooms)
    }

    /// List all rooms in creation order
    pub async fn list_rooms(&self) -> LedgerResult<Vec<Room>> {
        self.storage.load_rooms().await
    }

    /// Get a room by id
    pub async fn get_room(&self, room_id: &str) -> LedgerResult<Room> {
        self.storage
            .load_rooms()
            .await?
            .into_iter()
            .find(|room| room.room_id == room_id)
            .ok_or_else(|| LedgerError::RoomNotFound(room_id.to_string()))
    }

    /// Overwrite a room's directly editable fields
    ///
    /// Validates the update first and leaves all state untouched on
    /// rejection. Never recomputes `amount_paid` or `due_date` from the
    /// journal; those are payment-driven only.
    pub async fn update_room_fields(
        &mut self,
        room_id: &str,
        update: RoomUpdate,
    ) -> LedgerResult<Room> {
        self.validator.validate_update(&update)?;

        let mut rooms = self.storage.load_rooms().await?;
        let room = rooms
            .iter_mut()
            .find(|room| room.room_id == room_id)
            .ok_or_else(|| LedgerError::RoomNotFound(room_id.to_string()))?;

        room.apply_update(update);
        let updated = room.clone();

        self.storage.save_rooms(&rooms).await?;
        Ok(updated)
    }
}
