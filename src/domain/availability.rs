use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::Mutex;
use uuid::Uuid;

use super::dates::DateRange;
use super::errors::DomainError;

/// One live reservation held against a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationInterval {
    pub booking_id: Uuid,
    pub range: DateRange,
}

/// Per-room set of booked date intervals.
///
/// Each room owns its own mutex, so reservations on different rooms never
/// serialize against each other, while reserve/release/is_free for one room
/// are mutually exclusive. Mutating operations acquire the room lock with a
/// bounded wait; exhausting it yields [`DomainError::Busy`], which callers
/// treat exactly like a conflict (do not proceed, do not retry).
pub struct AvailabilityIndex {
    rooms: DashMap<Uuid, Arc<Mutex<Vec<ReservationInterval>>>>,
    lock_wait: Duration,
}

const DEFAULT_LOCK_WAIT: Duration = Duration::from_millis(250);

impl Default for AvailabilityIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl AvailabilityIndex {
    pub fn new() -> Self {
        Self::with_lock_wait(DEFAULT_LOCK_WAIT)
    }

    pub fn with_lock_wait(lock_wait: Duration) -> Self {
        Self {
            rooms: DashMap::new(),
            lock_wait,
        }
    }

    /// Clone the room's slot out of the map so the shard lock is released
    /// before the room lock is taken.
    fn slot(&self, room_id: Uuid) -> Arc<Mutex<Vec<ReservationInterval>>> {
        Arc::clone(self.rooms.entry(room_id).or_default().value())
    }

    /// Atomically reserve `range` for `booking_id`.
    ///
    /// When two requests race for overlapping ranges on the same room,
    /// exactly one succeeds; the loser sees `RoomUnavailable`. No partially
    /// applied reservation is ever observable.
    pub fn reserve(
        &self,
        room_id: Uuid,
        range: DateRange,
        booking_id: Uuid,
    ) -> Result<(), DomainError> {
        let slot = self.slot(room_id);
        let mut intervals = slot.try_lock_for(self.lock_wait).ok_or(DomainError::Busy)?;
        if intervals.iter().any(|held| held.range.overlaps(&range)) {
            return Err(DomainError::RoomUnavailable);
        }
        intervals.push(ReservationInterval { booking_id, range });
        Ok(())
    }

    /// Drop whatever interval `booking_id` holds on the room. Releasing a
    /// booking that holds nothing is a no-op. Acquisition is bounded like
    /// every other room operation; exhaustion yields `Busy` and the interval
    /// stays held.
    pub fn release(&self, room_id: Uuid, booking_id: Uuid) -> Result<(), DomainError> {
        if let Some(slot) = self.rooms.get(&room_id).map(|entry| Arc::clone(entry.value())) {
            let mut intervals = slot.try_lock_for(self.lock_wait).ok_or(DomainError::Busy)?;
            intervals.retain(|held| held.booking_id != booking_id);
        }
        Ok(())
    }

    /// Move a booking to new dates inside one critical section.
    ///
    /// The booking's own interval is ignored when checking `new_range`, so a
    /// stay may "overlap itself" while being edited; a foreign overlap leaves
    /// the old interval untouched and reports `RoomUnavailable`.
    pub fn rebook(
        &self,
        room_id: Uuid,
        booking_id: Uuid,
        new_range: DateRange,
    ) -> Result<(), DomainError> {
        let slot = self.slot(room_id);
        let mut intervals = slot.try_lock_for(self.lock_wait).ok_or(DomainError::Busy)?;
        if intervals
            .iter()
            .any(|held| held.booking_id != booking_id && held.range.overlaps(&new_range))
        {
            return Err(DomainError::RoomUnavailable);
        }
        match intervals.iter_mut().find(|held| held.booking_id == booking_id) {
            Some(held) => held.range = new_range,
            None => intervals.push(ReservationInterval {
                booking_id,
                range: new_range,
            }),
        }
        Ok(())
    }

    pub fn is_free(&self, room_id: Uuid, range: DateRange) -> Result<bool, DomainError> {
        let slot = self.slot(room_id);
        let intervals = slot.try_lock_for(self.lock_wait).ok_or(DomainError::Busy)?;
        Ok(!intervals.iter().any(|held| held.range.overlaps(&range)))
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use chrono::NaiveDate;

    use super::*;

    fn range(from: u32, to: u32) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 6, from).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, to).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn overlapping_reserve_is_rejected_adjacent_is_not() {
        let index = AvailabilityIndex::new();
        let room = Uuid::new_v4();

        index.reserve(room, range(1, 5), Uuid::new_v4()).unwrap();
        assert_eq!(
            index.reserve(room, range(4, 6), Uuid::new_v4()),
            Err(DomainError::RoomUnavailable)
        );
        // Half-open: checking in the day the first guest leaves is fine.
        index.reserve(room, range(5, 8), Uuid::new_v4()).unwrap();
    }

    #[test]
    fn release_round_trips_is_free() {
        let index = AvailabilityIndex::new();
        let room = Uuid::new_v4();
        let booking = Uuid::new_v4();

        index.reserve(room, range(1, 5), booking).unwrap();
        assert_eq!(index.is_free(room, range(1, 5)), Ok(false));
        index.release(room, booking).unwrap();
        assert_eq!(index.is_free(room, range(1, 5)), Ok(true));
    }

    #[test]
    fn exhausted_lock_wait_reports_busy() {
        let index = AvailabilityIndex::with_lock_wait(Duration::from_millis(10));
        let room = Uuid::new_v4();
        let booking = Uuid::new_v4();

        let slot = index.slot(room);
        let guard = slot.lock();
        assert_eq!(
            index.reserve(room, range(1, 5), booking),
            Err(DomainError::Busy)
        );
        assert_eq!(index.release(room, booking), Err(DomainError::Busy));
        assert_eq!(index.is_free(room, range(1, 5)), Err(DomainError::Busy));
        drop(guard);

        // Once the lock frees up the same calls go through.
        index.reserve(room, range(1, 5), booking).unwrap();
        index.release(room, booking).unwrap();
    }

    #[test]
    fn rooms_are_independent() {
        let index = AvailabilityIndex::new();
        let room_a = Uuid::new_v4();
        let room_b = Uuid::new_v4();

        index.reserve(room_a, range(1, 5), Uuid::new_v4()).unwrap();
        index.reserve(room_b, range(1, 5), Uuid::new_v4()).unwrap();
    }

    #[test]
    fn rebook_conflict_keeps_old_interval() {
        let index = AvailabilityIndex::new();
        let room = Uuid::new_v4();
        let booking = Uuid::new_v4();

        index.reserve(room, range(1, 5), booking).unwrap();
        index.reserve(room, range(10, 12), Uuid::new_v4()).unwrap();

        assert_eq!(
            index.rebook(room, booking, range(9, 11)),
            Err(DomainError::RoomUnavailable)
        );
        // The original stay is still held.
        assert_eq!(index.is_free(room, range(1, 5)), Ok(false));

        // A booking may shift onto dates it already holds.
        index.rebook(room, booking, range(3, 7)).unwrap();
        assert_eq!(index.is_free(room, range(1, 3)), Ok(true));
    }

    #[test]
    fn concurrent_overlapping_reserves_admit_exactly_one_winner() {
        let index = Arc::new(AvailabilityIndex::new());
        let room = Uuid::new_v4();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let index = Arc::clone(&index);
                thread::spawn(move || index.reserve(room, range(1, 5), Uuid::new_v4()))
            })
            .collect();

        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(outcomes
            .iter()
            .filter(|r| r.is_err())
            .all(|r| r == &Err(DomainError::RoomUnavailable)));
    }
}
