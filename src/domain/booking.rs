use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::dates::DateRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Available,
    Booked,
    Maintenance,
    Cleaning,
}

/// Room identity and rate as read from the room inventory collaborator.
/// The core never writes rooms; occupancy is derived state owned by the
/// availability index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub number: String,
    pub base_rate: BigDecimal,
    pub status: RoomStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// A booking as persisted through the `BookingStore` port.
///
/// A cancelled booking is never revived or reused; rebooking the same dates
/// produces a new booking with a new id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub guest_id: Uuid,
    pub room_id: Uuid,
    pub range: DateRange,
    pub total_amount: BigDecimal,
    pub status: BookingStatus,
}

impl Booking {
    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }
}
