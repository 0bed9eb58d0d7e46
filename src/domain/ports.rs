use uuid::Uuid;

use super::booking::{Booking, Room};
use super::errors::DomainError;

/// Booking persistence, owned by an external collaborator. The core only
/// writes status and total amount through this port.
pub trait BookingStore: Send + Sync + 'static {
    fn insert(&self, booking: Booking) -> Result<(), DomainError>;
    fn update(&self, booking: Booking) -> Result<(), DomainError>;
    fn find(&self, id: Uuid) -> Result<Option<Booking>, DomainError>;
    fn list(&self) -> Result<Vec<Booking>, DomainError>;
}

/// Read-only view of the room inventory collaborator.
pub trait RoomCatalog: Send + Sync + 'static {
    fn find(&self, id: Uuid) -> Result<Option<Room>, DomainError>;
    fn list(&self) -> Result<Vec<Room>, DomainError>;
}
