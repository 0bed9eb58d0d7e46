use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::workflow::CheckoutOutcome;
use crate::domain::booking::Booking;
use crate::domain::dates::DateRange;
use crate::domain::tax::Jurisdiction;
use crate::errors::AppError;
use crate::Workflow;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub guest_id: Uuid,
    pub room_id: Uuid,
    /// Check-in date, `YYYY-MM-DD`. The stay is half-open: this day is the
    /// first night.
    pub check_in: NaiveDate,
    /// Check-out date, `YYYY-MM-DD`. Not a night of the stay.
    pub check_out: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookingRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: Uuid,
    pub guest_id: Uuid,
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: String,
    /// Decimal amount as a string to avoid floating-point issues, e.g. "240.00"
    pub total_amount: String,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        BookingResponse {
            id: b.id,
            guest_id: b.guest_id,
            room_id: b.room_id,
            check_in: b.range.check_in(),
            check_out: b.range.check_out(),
            status: format!("{:?}", b.status).to_uppercase(),
            total_amount: b.total_amount.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub state_code: String,
    pub county: String,
    pub city: String,
    pub promo_code: Option<String>,
    /// Re-price the stay at today's rates instead of using the subtotal
    /// persisted at booking time. Off by default to guard against price
    /// drift between booking and payment.
    #[serde(default)]
    pub requote: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaxLineResponse {
    /// Rate as a percentage of the taxable base, e.g. "4.00"
    pub rate: String,
    pub amount: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PromoApplicationResponse {
    pub code: String,
    pub applied: bool,
    /// The promo description when applied, the rejection reason otherwise.
    pub detail: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChargeBreakdownResponse {
    pub booking_id: Uuid,
    pub invoice_number: String,
    pub subtotal: String,
    pub discount_amount: String,
    pub taxable_base: String,
    pub state_tax: TaxLineResponse,
    pub county_tax: TaxLineResponse,
    pub city_tax: TaxLineResponse,
    pub resort_fee: TaxLineResponse,
    pub total: String,
    pub promo: Option<PromoApplicationResponse>,
}

impl From<CheckoutOutcome> for ChargeBreakdownResponse {
    fn from(outcome: CheckoutOutcome) -> Self {
        let line = |l: &crate::domain::checkout::TaxLine| TaxLineResponse {
            rate: l.rate.to_string(),
            amount: l.amount.to_string(),
        };
        let b = &outcome.breakdown;
        ChargeBreakdownResponse {
            booking_id: outcome.booking_id,
            invoice_number: outcome.invoice_number.clone(),
            subtotal: b.subtotal.to_string(),
            discount_amount: b.discount_amount.to_string(),
            taxable_base: b.taxable_base.to_string(),
            state_tax: line(&b.state_tax),
            county_tax: line(&b.county_tax),
            city_tax: line(&b.city_tax),
            resort_fee: line(&b.resort_fee),
            total: b.total.to_string(),
            promo: outcome.promo.map(|p| PromoApplicationResponse {
                code: p.code,
                applied: p.applied,
                detail: p.detail,
            }),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /bookings
///
/// Reserves the room for the requested dates and prices the stay. A race
/// between two overlapping requests admits exactly one; the loser gets 409.
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking confirmed", body = BookingResponse),
        (status = 400, description = "Malformed date range"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Room unavailable for the requested dates"),
    ),
    tag = "bookings"
)]
pub async fn create_booking(
    workflow: web::Data<Workflow>,
    body: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let range = DateRange::new(body.check_in, body.check_out)?;
    let booking = workflow.create(body.guest_id, body.room_id, range)?;
    Ok(HttpResponse::Created().json(BookingResponse::from(booking)))
}

/// GET /bookings
#[utoipa::path(
    get,
    path = "/bookings",
    responses(
        (status = 200, description = "All bookings", body = [BookingResponse]),
    ),
    tag = "bookings"
)]
pub async fn list_bookings(workflow: web::Data<Workflow>) -> Result<HttpResponse, AppError> {
    let bookings: Vec<BookingResponse> = workflow
        .list()?
        .into_iter()
        .map(BookingResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(bookings))
}

/// GET /bookings/{id}
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking UUID")),
    responses(
        (status = 200, description = "Booking found", body = BookingResponse),
        (status = 404, description = "Booking not found"),
    ),
    tag = "bookings"
)]
pub async fn get_booking(
    workflow: web::Data<Workflow>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let booking = workflow.find(path.into_inner())?;
    Ok(HttpResponse::Ok().json(BookingResponse::from(booking)))
}

/// PUT /bookings/{id}
///
/// Moves the booking to new dates and re-prices it. On conflict the old
/// reservation stays fully intact.
#[utoipa::path(
    put,
    path = "/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking UUID")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = BookingResponse),
        (status = 400, description = "Malformed date range or cancelled booking"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "New dates unavailable"),
    ),
    tag = "bookings"
)]
pub async fn update_booking(
    workflow: web::Data<Workflow>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateBookingRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let range = DateRange::new(body.check_in, body.check_out)?;
    let booking = workflow.edit(path.into_inner(), range)?;
    Ok(HttpResponse::Ok().json(BookingResponse::from(booking)))
}

/// POST /bookings/{id}/cancel
#[utoipa::path(
    post,
    path = "/bookings/{id}/cancel",
    params(("id" = Uuid, Path, description = "Booking UUID")),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingResponse),
        (status = 400, description = "Booking already cancelled"),
        (status = 404, description = "Booking not found"),
    ),
    tag = "bookings"
)]
pub async fn cancel_booking(
    workflow: web::Data<Workflow>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let booking = workflow.cancel(path.into_inner())?;
    Ok(HttpResponse::Ok().json(BookingResponse::from(booking)))
}

/// POST /bookings/{id}/checkout
///
/// Computes the itemized charge for the stay: persisted subtotal, promo
/// discount, and the jurisdiction's taxes and resort fee. An invalid promo
/// code does not fail the request; it is surfaced with zero discount.
#[utoipa::path(
    post,
    path = "/bookings/{id}/checkout",
    params(("id" = Uuid, Path, description = "Booking UUID")),
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Itemized charge breakdown", body = ChargeBreakdownResponse),
        (status = 400, description = "Unknown jurisdiction or cancelled booking"),
        (status = 404, description = "Booking not found"),
    ),
    tag = "bookings"
)]
pub async fn checkout_booking(
    workflow: web::Data<Workflow>,
    path: web::Path<Uuid>,
    body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let jurisdiction = Jurisdiction::new(&body.state_code, &body.county, &body.city);
    let outcome = workflow.checkout(
        path.into_inner(),
        &jurisdiction,
        body.promo_code.as_deref(),
        body.requote,
    )?;
    Ok(HttpResponse::Ok().json(ChargeBreakdownResponse::from(outcome)))
}
