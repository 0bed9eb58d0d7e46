use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::availability::AvailabilityIndex;
use crate::domain::booking::{Booking, BookingStatus, Room, RoomStatus};
use crate::domain::checkout::{self, ChargeBreakdown};
use crate::domain::dates::DateRange;
use crate::domain::errors::DomainError;
use crate::domain::ports::{BookingStore, RoomCatalog};
use crate::domain::pricing;
use crate::domain::promo::{PromoOutcome, PromotionEvaluator};
use crate::domain::tax::{Jurisdiction, TaxRuleRegistry};

/// How a promo code fared during checkout. Surfaced for display either way;
/// a rejected code never blocks the charge.
#[derive(Debug, Clone, PartialEq)]
pub struct PromoApplication {
    pub code: String,
    pub applied: bool,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOutcome {
    pub booking_id: Uuid,
    pub invoice_number: String,
    pub promo: Option<PromoApplication>,
    pub breakdown: ChargeBreakdown,
}

/// Orchestrates create/edit/cancel/checkout over the availability index,
/// the pricing engine, and the configured tax and promo snapshots.
///
/// All collaborators are passed in explicitly; the workflow owns no global
/// state beyond the handles it was built with.
pub struct BookingWorkflow<S, C> {
    index: AvailabilityIndex,
    store: S,
    catalog: C,
    taxes: TaxRuleRegistry,
    promos: PromotionEvaluator,
}

impl<S: BookingStore, C: RoomCatalog> BookingWorkflow<S, C> {
    pub fn new(
        index: AvailabilityIndex,
        store: S,
        catalog: C,
        taxes: TaxRuleRegistry,
        promos: PromotionEvaluator,
    ) -> Self {
        Self {
            index,
            store,
            catalog,
            taxes,
            promos,
        }
    }

    fn room(&self, room_id: Uuid) -> Result<Room, DomainError> {
        self.catalog.find(room_id)?.ok_or(DomainError::NotFound)
    }

    fn booking(&self, booking_id: Uuid) -> Result<Booking, DomainError> {
        self.store.find(booking_id)?.ok_or(DomainError::NotFound)
    }

    /// Reserve the room, price the stay, persist the booking. On any failure
    /// after the reserve, the interval is released again so no partial write
    /// survives.
    pub fn create(
        &self,
        guest_id: Uuid,
        room_id: Uuid,
        range: DateRange,
    ) -> Result<Booking, DomainError> {
        let room = self.room(room_id)?;
        if room.status == RoomStatus::Maintenance {
            return Err(DomainError::RoomUnavailable);
        }

        let booking_id = Uuid::new_v4();
        self.index.reserve(room_id, range, booking_id)?;

        let quote = pricing::quote(&room.base_rate, &range);
        let booking = Booking {
            id: booking_id,
            guest_id,
            room_id,
            range,
            total_amount: quote.subtotal,
            status: BookingStatus::Confirmed,
        };
        if let Err(e) = self.store.insert(booking.clone()) {
            if let Err(release_err) = self.index.release(room_id, booking_id) {
                log::warn!(
                    "booking {booking_id}: room {room_id} not released after store error: {release_err}"
                );
            }
            return Err(e);
        }
        log::info!(
            "booking {} confirmed for room {} ({} nights)",
            booking.id,
            room.number,
            range.num_nights()
        );
        Ok(booking)
    }

    /// Move a booking to new dates. The old interval is only given up once
    /// the new one is held: a conflicting edit leaves the previously valid
    /// reservation fully intact.
    pub fn edit(&self, booking_id: Uuid, new_range: DateRange) -> Result<Booking, DomainError> {
        let mut booking = self.booking(booking_id)?;
        if booking.is_cancelled() {
            return Err(DomainError::InvalidInput(
                "cannot edit a cancelled booking".into(),
            ));
        }
        let room = self.room(booking.room_id)?;
        let old_range = booking.range;

        self.index.rebook(booking.room_id, booking_id, new_range)?;

        let quote = pricing::quote(&room.base_rate, &new_range);
        booking.range = new_range;
        booking.total_amount = quote.subtotal;
        if let Err(e) = self.store.update(booking.clone()) {
            // Put the interval back where it was; the edit never happened.
            if let Err(restore_err) = self.index.rebook(booking.room_id, booking_id, old_range) {
                log::warn!(
                    "booking {booking_id}: interval not restored after store error: {restore_err}"
                );
            }
            return Err(e);
        }
        Ok(booking)
    }

    /// Release the interval and mark the booking cancelled. The interval is
    /// gone for good; a cancelled booking is never reused.
    pub fn cancel(&self, booking_id: Uuid) -> Result<Booking, DomainError> {
        let mut booking = self.booking(booking_id)?;
        if booking.is_cancelled() {
            return Err(DomainError::InvalidInput(
                "booking is already cancelled".into(),
            ));
        }
        self.index.release(booking.room_id, booking_id)?;
        booking.status = BookingStatus::Cancelled;
        self.store.update(booking.clone())?;
        log::info!("booking {} cancelled", booking.id);
        Ok(booking)
    }

    /// Produce the itemized charge for a booking.
    ///
    /// The persisted subtotal is used as-is unless the caller explicitly
    /// asks for a re-quote, so the price agreed at booking time does not
    /// drift by the time the guest pays.
    pub fn checkout(
        &self,
        booking_id: Uuid,
        jurisdiction: &Jurisdiction,
        promo_code: Option<&str>,
        requote: bool,
    ) -> Result<CheckoutOutcome, DomainError> {
        let booking = self.booking(booking_id)?;
        if booking.is_cancelled() {
            return Err(DomainError::InvalidInput(
                "cannot check out a cancelled booking".into(),
            ));
        }

        let subtotal = if requote {
            let room = self.room(booking.room_id)?;
            pricing::quote(&room.base_rate, &booking.range).subtotal
        } else {
            booking.total_amount.clone()
        };

        let today = Utc::now().date_naive();
        let (discount, promo) = match promo_code {
            Some(code) => {
                let outcome = self.promos.validate(code, &subtotal, today);
                let application = match &outcome {
                    PromoOutcome::Valid { description, .. } => PromoApplication {
                        code: code.to_string(),
                        applied: true,
                        detail: description.clone(),
                    },
                    PromoOutcome::Invalid { reason } => PromoApplication {
                        code: code.to_string(),
                        applied: false,
                        detail: reason.clone(),
                    },
                };
                (outcome.discount_amount(), Some(application))
            }
            None => (BigDecimal::from(0), None),
        };

        let rates = self.taxes.rates_for(jurisdiction)?;
        let breakdown = checkout::compute(&subtotal, &discount, rates);
        Ok(CheckoutOutcome {
            booking_id,
            invoice_number: checkout::invoice_number(today),
            promo,
            breakdown,
        })
    }

    /// Validate a promo code against an arbitrary subtotal without touching
    /// any booking. Side-effect-free.
    pub fn validate_promo(&self, code: &str, subtotal: &BigDecimal) -> PromoOutcome {
        self.promos.validate(code, subtotal, Utc::now().date_naive())
    }

    pub fn find(&self, booking_id: Uuid) -> Result<Booking, DomainError> {
        self.booking(booking_id)
    }

    pub fn list(&self) -> Result<Vec<Booking>, DomainError> {
        self.store.list()
    }

    /// Rooms bookable for the range: not under maintenance and with no
    /// overlapping interval in the index.
    pub fn list_available(&self, range: DateRange) -> Result<Vec<Room>, DomainError> {
        let mut available = Vec::new();
        for room in self.catalog.list()? {
            if room.status == RoomStatus::Maintenance {
                continue;
            }
            if self.index.is_free(room.id, range)? {
                available.push(room);
            }
        }
        Ok(available)
    }
}
