use std::collections::HashMap;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::booking::{Booking, Room};
use crate::domain::errors::DomainError;
use crate::domain::ports::{BookingStore, RoomCatalog};

/// In-memory booking persistence. Stands in for the external persistence
/// collaborator so the binary and tests run self-contained.
#[derive(Default)]
pub struct InMemoryBookingStore {
    bookings: RwLock<HashMap<Uuid, Booking>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookingStore for InMemoryBookingStore {
    fn insert(&self, booking: Booking) -> Result<(), DomainError> {
        let mut bookings = self.bookings.write();
        if bookings.contains_key(&booking.id) {
            return Err(DomainError::Internal(format!(
                "duplicate booking id {}",
                booking.id
            )));
        }
        bookings.insert(booking.id, booking);
        Ok(())
    }

    fn update(&self, booking: Booking) -> Result<(), DomainError> {
        let mut bookings = self.bookings.write();
        if !bookings.contains_key(&booking.id) {
            return Err(DomainError::NotFound);
        }
        bookings.insert(booking.id, booking);
        Ok(())
    }

    fn find(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        Ok(self.bookings.read().get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<Booking>, DomainError> {
        Ok(self.bookings.read().values().cloned().collect())
    }
}

/// Fixed room inventory snapshot. Rooms are owned elsewhere; the core only
/// reads identity, rate, and status.
pub struct InMemoryRoomCatalog {
    rooms: Vec<Room>,
}

impl InMemoryRoomCatalog {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }
}

impl RoomCatalog for InMemoryRoomCatalog {
    fn find(&self, id: Uuid) -> Result<Option<Room>, DomainError> {
        Ok(self.rooms.iter().find(|r| r.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Room>, DomainError> {
        Ok(self.rooms.clone())
    }
}
